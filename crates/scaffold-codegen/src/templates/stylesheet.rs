pub(crate) const APP_CSS: &str = r#":root {
    --fg: #1f2328;
    --muted: #656d76;
    --accent: #0969da;
    --border: #d0d7de;
    --bg-alt: #f6f8fa;
}

* {
    box-sizing: border-box;
}

body {
    margin: 0;
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    color: var(--fg);
    line-height: 1.5;
}

.container {
    max-width: 960px;
    margin: 0 auto;
    padding: 1.5rem;
}

a {
    color: var(--accent);
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}

.nav {
    color: var(--muted);
}

.form {
    display: flex;
    flex-wrap: wrap;
    gap: 0.75rem;
    align-items: center;
    margin: 1rem 0;
}

.form label {
    display: flex;
    gap: 0.35rem;
    align-items: center;
}

input[type="text"],
input[type="number"] {
    padding: 0.35rem 0.5rem;
    border: 1px solid var(--border);
    border-radius: 4px;
}

button {
    padding: 0.35rem 0.9rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg-alt);
    cursor: pointer;
}

table {
    width: 100%;
    border-collapse: collapse;
}

th,
td {
    padding: 0.5rem;
    border-bottom: 1px solid var(--border);
    text-align: left;
}

thead th {
    background: var(--bg-alt);
}

.actions {
    display: flex;
    gap: 0.5rem;
    align-items: center;
}

.actions form {
    margin: 0;
}

.modules li {
    margin: 0.25rem 0;
}
"#;
