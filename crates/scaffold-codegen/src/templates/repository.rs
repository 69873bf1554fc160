use crate::context::GenerationContext;
use scaffold_spec::ModuleSpec;

pub(crate) fn render(ctx: &GenerationContext, module: &ModuleSpec) -> String {
    format!(
        "package {pkg}.repository;

import {pkg}.domain.{entity};
import org.springframework.data.jpa.repository.JpaRepository;

public interface {entity}Repository extends JpaRepository<{entity}, Long> {{
}}
",
        pkg = ctx.base_package,
        entity = module.entity_name,
    )
}
