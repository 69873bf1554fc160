use super::{accessor, arg_list, typed_params};
use crate::context::GenerationContext;
use scaffold_spec::ModuleSpec;

pub(crate) fn render(ctx: &GenerationContext, module: &ModuleSpec) -> String {
    let entity = &module.entity_name;
    let fields = &module.fields;

    let update_params = if fields.is_empty() {
        "Long id".to_string()
    } else {
        format!("Long id, {}", typed_params(fields))
    };
    let setters: String = fields
        .iter()
        .map(|f| format!("                    existing.{}({});\n", accessor("set", f), f.name))
        .collect();

    format!(
        "package {pkg}.service;

import {pkg}.domain.{entity};
import {pkg}.repository.{entity}Repository;
import org.springframework.stereotype.Service;
import org.springframework.transaction.annotation.Transactional;

import java.util.List;
import java.util.Optional;

@Service
@Transactional
public class {entity}Service {{

    private final {entity}Repository repository;

    public {entity}Service({entity}Repository repository) {{
        this.repository = repository;
    }}

    @Transactional(readOnly = true)
    public List<{entity}> findAll() {{
        return repository.findAll();
    }}

    @Transactional(readOnly = true)
    public Optional<{entity}> findById(Long id) {{
        return repository.findById(id);
    }}

    public {entity} create({create_params}) {{
        return repository.save(new {entity}({args}));
    }}

    public Optional<{entity}> update({update_params}) {{
        return repository.findById(id)
                .map(existing -> {{
{setters}                    return repository.save(existing);
                }});
    }}

    public void delete(Long id) {{
        repository.deleteById(id);
    }}
}}
",
        pkg = ctx.base_package,
        create_params = typed_params(fields),
        args = arg_list(fields),
    )
}
