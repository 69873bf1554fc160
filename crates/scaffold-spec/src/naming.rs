//! Naming rules derived from a module name
//!
//! Route segments and labels are part of the generated application's
//! observable surface, so these stay deliberately naive: pluralization is a
//! plain `s` suffix (`category` becomes `categorys`).

/// Uppercase the first character, leave the rest untouched.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Entity (class) name for a module: `reservation` -> `Reservation`.
#[inline]
#[must_use]
pub fn entity_name(module_name: &str) -> String {
    capitalize(module_name)
}

/// Plural URL segment for a module: `todo` -> `todos`.
#[inline]
#[must_use]
pub fn route_segment(module_name: &str) -> String {
    format!("{module_name}s")
}

/// Human label for a module's pages: `todo` -> `Todos`.
#[inline]
#[must_use]
pub fn display_label(module_name: &str) -> String {
    capitalize(&route_segment(module_name))
}

/// ASCII identifier: `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Module names must be identifiers that start lowercase and contain no
/// uppercase letters.
#[must_use]
pub fn is_module_name(s: &str) -> bool {
    is_identifier(s)
        && s.starts_with(|c: char| c.is_ascii_lowercase())
        && !s.chars().any(|c| c.is_ascii_uppercase())
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "var", "void", "volatile", "while", "yield", "_",
];

/// Names the generated code already declares next to module fields.
const GENERATED_MEMBERS: &[&str] = &["id", "service", "repository", "model", "item", "existing"];

/// Accessor suffixes taken by the entity's own `getId` and `Object::getClass`.
const GENERATED_ACCESSORS: &[&str] = &["Id", "Class"];

/// Whether `name` would clash with Java syntax or generated members.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
        || GENERATED_MEMBERS.contains(&name)
        || GENERATED_ACCESSORS.contains(&capitalize(name).as_str())
}

/// Field names are identifiers that are not reserved.
#[must_use]
pub fn is_field_name(s: &str) -> bool {
    is_identifier(s) && !is_reserved(s)
}
