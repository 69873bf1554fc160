use super::arg_list;
use crate::context::GenerationContext;
use scaffold_spec::{Field, ModuleSpec};

/// Request parameter binding; checkboxes post nothing when unticked
fn request_param(field: &Field) -> String {
    if field.is_boolean() {
        format!(
            "@RequestParam(defaultValue = \"false\") {} {}",
            field.field_type, field.name
        )
    } else {
        format!("@RequestParam {} {}", field.field_type, field.name)
    }
}

fn handler_params(leading: &[&str], fields: &[Field]) -> String {
    let indent = " ".repeat(24);
    leading
        .iter()
        .map(|s| (*s).to_string())
        .chain(fields.iter().map(request_param))
        .collect::<Vec<_>>()
        .join(&format!(",\n{indent}"))
}

pub(crate) fn render(ctx: &GenerationContext, module: &ModuleSpec) -> String {
    let fields = &module.fields;
    let args = arg_list(fields);
    let update_args = if fields.is_empty() {
        "id".to_string()
    } else {
        format!("id, {args}")
    };

    format!(
        "package {pkg}.web;

import {pkg}.service.{entity}Service;
import org.springframework.stereotype.Controller;
import org.springframework.ui.Model;
import org.springframework.web.bind.annotation.*;

@Controller
@RequestMapping(\"/{route}\")
public class {entity}Controller {{

    private final {entity}Service service;

    public {entity}Controller({entity}Service service) {{
        this.service = service;
    }}

    @GetMapping
    public String list(Model model) {{
        model.addAttribute(\"items\", service.findAll());
        return \"{module}/list\";
    }}

    @PostMapping
    public String create({create_params}) {{
        service.create({args});
        return \"redirect:/{route}\";
    }}

    @GetMapping(\"/{{id}}/edit\")
    public String edit(@PathVariable Long id, Model model) {{
        return service.findById(id)
                .map(item -> {{
                    model.addAttribute(\"item\", item);
                    return \"{module}/edit\";
                }})
                .orElse(\"redirect:/{route}\");
    }}

    @PostMapping(\"/{{id}}\")
    public String update({update_params}) {{
        service.update({update_args});
        return \"redirect:/{route}\";
    }}

    @PostMapping(\"/{{id}}/delete\")
    public String delete(@PathVariable Long id) {{
        service.delete(id);
        return \"redirect:/{route}\";
    }}
}}
",
        pkg = ctx.base_package,
        entity = module.entity_name,
        module = module.module_name,
        route = module.route_segment(),
        create_params = handler_params(&[], fields),
        update_params = handler_params(&["@PathVariable Long id"], fields),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_spec::FieldType;

    fn todo() -> ModuleSpec {
        ModuleSpec::new(
            "todo",
            vec![
                Field::new("title", FieldType::String),
                Field::new("done", FieldType::Boolean),
            ],
        )
    }

    #[test]
    fn routes_and_bindings() {
        let src = render(&GenerationContext::new("demo", "com.example.demo"), &todo());

        assert!(src.contains("@RequestMapping(\"/todos\")"));
        assert!(src.contains("@GetMapping(\"/{id}/edit\")"));
        assert!(src.contains("@PostMapping(\"/{id}\")"));
        assert!(src.contains("@PostMapping(\"/{id}/delete\")"));
        assert!(src.contains("@RequestParam String title"));
        assert!(src.contains("@RequestParam(defaultValue = \"false\") Boolean done"));
        assert!(src.contains("service.create(title, done);"));
        assert!(src.contains("service.update(id, title, done);"));
        assert!(src.contains("return \"todo/list\";"));
    }

    #[test]
    fn update_leads_with_path_variable() {
        let src = render(&GenerationContext::new("demo", "com.example.demo"), &todo());
        let update = src.find("public String update(").unwrap();
        let id = src[update..].find("@PathVariable Long id").unwrap();
        let title = src[update..].find("@RequestParam String title").unwrap();
        assert!(id < title);
    }
}
