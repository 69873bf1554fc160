//! Spec mutation
//!
//! `apply` is a pure, total function: references to missing modules or
//! fields, duplicates and empty module definitions all leave the spec
//! untouched. Every instruction is idempotent.

use crate::instruction::Instruction;
use crate::naming;
use crate::types::{Field, ModuleSpec, ProjectSpec};
use std::collections::HashSet;

/// Result of folding a batch of instructions over a spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// Final spec
    pub spec: ProjectSpec,
    /// Whether the final spec differs from the input
    pub changed: bool,
    /// Number of instructions that changed the spec when applied
    pub applied: usize,
}

/// Apply one instruction, returning the resulting spec
#[must_use]
pub fn apply(mut spec: ProjectSpec, instruction: &Instruction) -> ProjectSpec {
    match instruction {
        Instruction::AddField {
            module,
            name,
            field_type,
        } => {
            let Some(target) = spec.module_mut(module) else {
                tracing::debug!(%module, "add field: unknown module");
                return spec;
            };
            if target.has_field(name) {
                return spec;
            }
            if !naming::is_field_name(name) {
                tracing::warn!(%module, field = %name, "add field: name is reserved or not an identifier");
                return spec;
            }
            target.fields.push(Field::new(name.clone(), *field_type));
        }
        Instruction::RemoveField { module, name } => {
            let Some(target) = spec.module_mut(module) else {
                tracing::debug!(%module, "remove field: unknown module");
                return spec;
            };
            target.fields.retain(|f| &f.name != name);
        }
        Instruction::AddModule { name, fields } => {
            if spec.module(name).is_some() || !naming::is_module_name(name) {
                return spec;
            }
            let mut seen = HashSet::new();
            let fields: Vec<Field> = fields
                .iter()
                .filter(|f| {
                    if naming::is_field_name(&f.name) {
                        seen.insert(f.name.as_str())
                    } else {
                        tracing::warn!(module = %name, field = %f.name, "add module: skipping reserved or invalid field");
                        false
                    }
                })
                .cloned()
                .collect();
            if fields.is_empty() {
                return spec;
            }
            spec.push_module(ModuleSpec::new(name.clone(), fields));
        }
    }
    spec
}

/// Apply instructions strictly in order
///
/// Later instructions observe the effects of earlier ones.
#[must_use]
pub fn apply_all(spec: ProjectSpec, instructions: &[Instruction]) -> Mutation {
    let original = spec.clone();
    let mut applied = 0;
    let spec = instructions.iter().fold(spec, |current, instruction| {
        let before = current.clone();
        let next = apply(current, instruction);
        if next != before {
            applied += 1;
            tracing::debug!(%instruction, "instruction applied");
        } else {
            tracing::debug!(%instruction, "instruction was a no-op");
        }
        next
    });

    Mutation {
        changed: spec != original,
        spec,
        applied,
    }
}
