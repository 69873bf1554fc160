//! Thymeleaf list and edit pages

use super::input_type;
use scaffold_spec::{Field, FieldType, ModuleSpec};

fn head(title: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html xmlns:th=\"http://www.thymeleaf.org\">
<head>
    <meta charset=\"UTF-8\" />
    <title>{title}</title>
    <link rel=\"stylesheet\" th:href=\"@{{/css/app.css}}\" />
</head>
<body>
<main class=\"container\">
    <p class=\"nav\"><a th:href=\"@{{/}}\">Home</a></p>
"
    )
}

const FOOT: &str = "</main>
</body>
</html>
";

/// Form control; `source` pre-fills from a model attribute when set
fn control(field: &Field, source: Option<&str>) -> String {
    let name = &field.name;
    let ty = input_type(field.field_type);
    let input = match (field.field_type, source) {
        (FieldType::Boolean, None) => {
            format!("<input type=\"{ty}\" name=\"{name}\" value=\"true\" />")
        }
        (FieldType::Boolean, Some(item)) => format!(
            "<input type=\"{ty}\" name=\"{name}\" value=\"true\" th:checked=\"${{{item}.{name}}}\" />"
        ),
        (_, None) => {
            format!("<input type=\"{ty}\" name=\"{name}\" placeholder=\"{name}\" required />")
        }
        (_, Some(item)) => format!(
            "<input type=\"{ty}\" name=\"{name}\" th:value=\"${{{item}.{name}}}\" required />"
        ),
    };
    format!("        <label>{name} {input}</label>\n")
}

fn cell(field: &Field) -> String {
    let name = &field.name;
    if field.is_boolean() {
        format!(
            "            <td><input type=\"checkbox\" disabled=\"disabled\" th:checked=\"${{item.{name}}}\" /></td>\n"
        )
    } else {
        format!("            <td th:text=\"${{item.{name}}}\"></td>\n")
    }
}

pub(crate) fn render_list(module: &ModuleSpec) -> String {
    let route = module.route_segment();
    let label = module.display_label();

    let controls: String = module.fields.iter().map(|f| control(f, None)).collect();
    let headers: String = module
        .fields
        .iter()
        .map(|f| format!("            <th>{}</th>\n", f.name))
        .collect();
    let cells: String = module.fields.iter().map(cell).collect();

    format!(
        "{head}    <h2>{label}</h2>

    <form method=\"post\" th:action=\"@{{/{route}}}\" class=\"form\">
{controls}        <button type=\"submit\">Add</button>
    </form>

    <table>
        <thead>
        <tr>
            <th>id</th>
{headers}            <th></th>
        </tr>
        </thead>
        <tbody>
        <tr th:each=\"item : ${{items}}\">
            <td th:text=\"${{item.id}}\"></td>
{cells}            <td class=\"actions\">
                <a th:href=\"@{{/{route}/{{id}}/edit(id=${{item.id}})}}\">Edit</a>
                <form method=\"post\" th:action=\"@{{/{route}/{{id}}/delete(id=${{item.id}})}}\">
                    <button type=\"submit\">Delete</button>
                </form>
            </td>
        </tr>
        </tbody>
    </table>
{FOOT}",
        head = head(&label),
    )
}

pub(crate) fn render_edit(module: &ModuleSpec) -> String {
    let route = module.route_segment();
    let label = module.display_label();
    let controls: String = module
        .fields
        .iter()
        .map(|f| control(f, Some("item")))
        .collect();

    format!(
        "{head}    <h2>Edit {entity}</h2>

    <form method=\"post\" th:action=\"@{{/{route}/{{id}}(id=${{item.id}})}}\" class=\"form\">
{controls}        <button type=\"submit\">Save</button>
        <a th:href=\"@{{/{route}}}\">Cancel</a>
    </form>
{FOOT}",
        head = head(&label),
        entity = module.entity_name,
    )
}
