//! Structured edit instructions
//!
//! The interpreter turns text into these; the mutator folds them over a
//! `ProjectSpec`.

use crate::types::{Field, FieldType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured edit operation on a project spec
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Instruction {
    /// Append a field to an existing module
    AddField {
        module: String,
        name: String,
        #[serde(rename = "type", default)]
        field_type: FieldType,
    },
    /// Remove a field from an existing module
    RemoveField { module: String, name: String },
    /// Add a new module with its initial fields
    AddModule { name: String, fields: Vec<Field> },
}

impl Instruction {
    /// `AddField` with the type defaulting to `String`
    #[must_use]
    pub fn add_field(
        module: impl Into<String>,
        name: impl Into<String>,
        field_type: Option<FieldType>,
    ) -> Self {
        Self::AddField {
            module: module.into(),
            name: name.into(),
            field_type: field_type.unwrap_or_default(),
        }
    }

    /// `RemoveField`
    #[must_use]
    pub fn remove_field(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self::RemoveField {
            module: module.into(),
            name: name.into(),
        }
    }

    /// `AddModule`
    #[must_use]
    pub fn add_module(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::AddModule {
            name: name.into(),
            fields,
        }
    }

    /// Module the instruction targets
    #[must_use]
    pub fn module_name(&self) -> &str {
        match self {
            Self::AddField { module, .. } | Self::RemoveField { module, .. } => module,
            Self::AddModule { name, .. } => name,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddField {
                module,
                name,
                field_type,
            } => write!(f, "add field {name} of type {field_type} to module {module}"),
            Self::RemoveField { module, name } => {
                write!(f, "delete field {name} from module {module}")
            }
            Self::AddModule { name, fields } => {
                write!(f, "add module {name} with fields ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}:{}", field.name, field.field_type)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_field_defaults_to_string() {
        let instr = Instruction::add_field("reservation", "phone", None);
        assert!(matches!(
            instr,
            Instruction::AddField {
                field_type: FieldType::String,
                ..
            }
        ));
        assert_eq!(instr.module_name(), "reservation");
    }

    #[test]
    fn display_uses_canonical_grammar() {
        let instr = Instruction::add_module(
            "todo",
            vec![
                Field::new("title", FieldType::String),
                Field::new("done", FieldType::Boolean),
            ],
        );
        assert_eq!(
            instr.to_string(),
            "add module todo with fields title:String, done:Boolean"
        );
        assert_eq!(
            Instruction::remove_field("todo", "done").to_string(),
            "delete field done from module todo"
        );
    }

    #[test]
    fn serde_tagged_shape() {
        let instr = Instruction::add_field("todo", "due", Some(FieldType::Long));
        let json = serde_json::to_value(&instr).unwrap();
        assert_eq!(json["op"], "addField");
        assert_eq!(json["type"], "Long");
    }
}
