use super::{accessor, typed_params};
use crate::context::GenerationContext;
use scaffold_spec::ModuleSpec;

pub(crate) fn render(ctx: &GenerationContext, module: &ModuleSpec) -> String {
    let entity = &module.entity_name;
    let fields = &module.fields;

    let declarations: String = fields
        .iter()
        .map(|f| format!("    private {} {};\n", f.field_type, f.name))
        .collect();

    // With no fields the all-args constructor would collide with the no-arg one.
    let constructors = if fields.is_empty() {
        format!("    public {entity}() {{}}\n")
    } else {
        let assignments: String = fields
            .iter()
            .map(|f| format!("        this.{0} = {0};\n", f.name))
            .collect();
        format!(
            "    protected {entity}() {{}}\n\n    public {entity}({}) {{\n{assignments}    }}\n",
            typed_params(fields)
        )
    };

    let accessors: String = fields
        .iter()
        .map(|f| {
            format!(
                "\n    public {ty} {getter}() {{\n        return {name};\n    }}\n\n    public void {setter}({ty} {name}) {{\n        this.{name} = {name};\n    }}\n",
                ty = f.field_type,
                name = f.name,
                getter = accessor("get", f),
                setter = accessor("set", f),
            )
        })
        .collect();

    format!(
        "package {pkg}.domain;

import jakarta.persistence.*;

@Entity
public class {entity} {{

    @Id
    @GeneratedValue(strategy = GenerationType.IDENTITY)
    private Long id;

{declarations}
{constructors}
    public Long getId() {{
        return id;
    }}
{accessors}}}
",
        pkg = ctx.base_package,
    )
}
