//! Core types for project specifications
//!
//! Defines the fundamental types for the spec document:
//! - Field types and fields
//! - Module specifications
//! - The project specification and its external JSON shape
//!
//! A project is held internally as a non-empty list of modules. The external
//! document carries either a single `module` or a `modules` list; which shape
//! to write back is decided by `list_form`, never by the list length alone,
//! so a document loaded as a one-element `modules` list keeps that shape.

use crate::error::SpecError;
use crate::naming;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Supported field value types
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum FieldType {
    /// Free text
    #[default]
    String,
    /// Toggle
    Boolean,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    Long,
}

impl FieldType {
    /// All supported types, in declaration order
    pub const ALL: [FieldType; 4] = [
        FieldType::String,
        FieldType::Boolean,
        FieldType::Integer,
        FieldType::Long,
    ];

    /// Canonical type name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Boolean => "Boolean",
            FieldType::Integer => "Integer",
            FieldType::Long => "Long",
        }
    }

    /// Resolve an optional type token, falling back to `String` when the
    /// token is absent or not recognized.
    #[must_use]
    pub fn coerce(token: Option<&str>) -> Self {
        token
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SpecError::UnknownFieldType(trimmed.to_string()))
    }
}

/// A named, typed attribute of a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Field identifier
    pub name: String,
    /// Value type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    /// Create new field
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Whether this field binds as a toggle rather than a required value
    #[inline]
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.field_type == FieldType::Boolean
    }
}

/// One generated resource: entity, repository, service, controller and views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSpec {
    /// Lowercase module identifier
    pub module_name: String,
    /// Capitalized entity (class) name
    pub entity_name: String,
    /// Fields in declared order
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl ModuleSpec {
    /// Create module with the entity name derived from `module_name`
    #[must_use]
    pub fn new(module_name: impl Into<String>, fields: Vec<Field>) -> Self {
        let module_name = module_name.into();
        Self {
            entity_name: naming::entity_name(&module_name),
            module_name,
            fields,
        }
    }

    /// Look up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check whether a field exists
    #[inline]
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Plural URL segment for this module
    #[inline]
    #[must_use]
    pub fn route_segment(&self) -> String {
        naming::route_segment(&self.module_name)
    }

    /// Human label for this module's pages
    #[inline]
    #[must_use]
    pub fn display_label(&self) -> String {
        naming::display_label(&self.module_name)
    }

    fn validate(&self) -> Result<(), SpecError> {
        if !naming::is_identifier(&self.module_name) {
            return Err(SpecError::invalid(format!(
                "module name '{}' is not an identifier",
                self.module_name
            )));
        }
        if !naming::is_identifier(&self.entity_name) {
            return Err(SpecError::invalid(format!(
                "entity name '{}' is not an identifier",
                self.entity_name
            )));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !naming::is_identifier(&field.name) {
                return Err(SpecError::invalid(format!(
                    "field name '{}' in module '{}' is not an identifier",
                    field.name, self.module_name
                )));
            }
            if naming::is_reserved(&field.name) {
                return Err(SpecError::invalid(format!(
                    "field name '{}' in module '{}' is reserved",
                    field.name, self.module_name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SpecError::invalid(format!(
                    "duplicate field '{}' in module '{}'",
                    field.name, self.module_name
                )));
            }
        }
        if self.entity_name != naming::entity_name(&self.module_name) {
            tracing::debug!(
                module = %self.module_name,
                entity = %self.entity_name,
                "entity name does not follow module name"
            );
        }
        Ok(())
    }
}

/// The persisted description of a project's modules and fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpecDocument", into = "SpecDocument")]
pub struct ProjectSpec {
    /// Project (directory) name
    pub project_name: String,
    /// Dotted base package
    pub base_package: String,
    modules: Vec<ModuleSpec>,
    list_form: bool,
    extra: Map<String, Value>,
}

impl ProjectSpec {
    /// Create a single-module project
    #[must_use]
    pub fn new(
        project_name: impl Into<String>,
        base_package: impl Into<String>,
        module: ModuleSpec,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            base_package: base_package.into(),
            modules: vec![module],
            list_form: false,
            extra: Map::new(),
        }
    }

    /// All modules, in declared order (never empty)
    #[inline]
    #[must_use]
    pub fn modules(&self) -> &[ModuleSpec] {
        &self.modules
    }

    /// Look up a module by name
    #[must_use]
    pub fn module(&self, module_name: &str) -> Option<&ModuleSpec> {
        self.modules.iter().find(|m| m.module_name == module_name)
    }

    pub(crate) fn module_mut(&mut self, module_name: &str) -> Option<&mut ModuleSpec> {
        self.modules.iter_mut().find(|m| m.module_name == module_name)
    }

    /// Whether the document is written with a `modules` list
    #[inline]
    #[must_use]
    pub fn is_list_form(&self) -> bool {
        self.list_form
    }

    /// Append a module, switching the document to list form
    pub(crate) fn push_module(&mut self, module: ModuleSpec) {
        self.modules.push(module);
        self.list_form = true;
    }

    /// Java package path: `com.example.app` -> `com/example/app`
    #[must_use]
    pub fn package_path(&self) -> String {
        self.base_package.replace('.', "/")
    }

    /// Check the structural invariants of the document
    ///
    /// # Errors
    /// `SpecError::Invalid` when modules are missing, names are not
    /// identifiers, or module/field names repeat.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.modules.is_empty() {
            return Err(SpecError::invalid("project has no modules"));
        }
        // Used as a directory name under the output root.
        if self.project_name.is_empty()
            || matches!(self.project_name.as_str(), "." | "..")
            || self.project_name.contains(['/', '\\'])
        {
            return Err(SpecError::invalid(format!(
                "project name '{}' is not a valid directory name",
                self.project_name
            )));
        }
        if self.base_package.is_empty()
            || !self.base_package.split('.').all(naming::is_identifier)
        {
            return Err(SpecError::invalid(format!(
                "base package '{}' is not a dotted identifier",
                self.base_package
            )));
        }
        let mut seen = HashSet::new();
        for module in &self.modules {
            module.validate()?;
            if !seen.insert(module.module_name.as_str()) {
                return Err(SpecError::invalid(format!(
                    "duplicate module '{}'",
                    module.module_name
                )));
            }
        }
        Ok(())
    }
}

/// External JSON shape of the spec document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecDocument {
    project_name: String,
    base_package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    module: Option<ModuleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modules: Option<Vec<ModuleSpec>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<SpecDocument> for ProjectSpec {
    type Error = SpecError;

    fn try_from(doc: SpecDocument) -> Result<Self, Self::Error> {
        let (modules, list_form) = match (doc.module, doc.modules) {
            (Some(module), None) => (vec![module], false),
            (None, Some(modules)) => (modules, true),
            (Some(_), Some(_)) => {
                return Err(SpecError::invalid(
                    "document has both 'module' and 'modules'",
                ))
            }
            (None, None) => {
                return Err(SpecError::invalid(
                    "document has neither 'module' nor 'modules'",
                ))
            }
        };

        let spec = ProjectSpec {
            project_name: doc.project_name,
            base_package: doc.base_package,
            modules,
            list_form,
            extra: doc.extra,
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl From<ProjectSpec> for SpecDocument {
    fn from(spec: ProjectSpec) -> Self {
        let (module, modules) = if spec.list_form {
            (None, Some(spec.modules))
        } else {
            (spec.modules.into_iter().next(), None)
        };
        SpecDocument {
            project_name: spec.project_name,
            base_package: spec.base_package,
            module,
            modules,
            extra: spec.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn reservation_json() -> Value {
        json!({
            "projectName": "demo-service",
            "basePackage": "com.example.demoservice",
            "module": {
                "moduleName": "reservation",
                "entityName": "Reservation",
                "fields": [{"name": "name", "type": "String"}]
            }
        })
    }

    #[test]
    fn field_type_parse_is_case_insensitive() {
        assert_eq!("boolean".parse::<FieldType>().unwrap(), FieldType::Boolean);
        assert_eq!(" Long ".parse::<FieldType>().unwrap(), FieldType::Long);
        assert!("Date".parse::<FieldType>().is_err());
    }

    #[test]
    fn field_type_coerce_defaults_to_string() {
        assert_eq!(FieldType::coerce(None), FieldType::String);
        assert_eq!(FieldType::coerce(Some("Date")), FieldType::String);
        assert_eq!(FieldType::coerce(Some("Integer")), FieldType::Integer);
    }

    #[test]
    fn single_module_document_roundtrips_in_single_form() {
        let spec: ProjectSpec = serde_json::from_value(reservation_json()).unwrap();
        assert!(!spec.is_list_form());
        assert_eq!(spec.modules().len(), 1);

        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back, reservation_json());
    }

    #[test]
    fn one_element_list_keeps_list_form() {
        let doc = json!({
            "projectName": "p",
            "basePackage": "com.example",
            "modules": [{"moduleName": "todo", "entityName": "Todo", "fields": []}]
        });
        let spec: ProjectSpec = serde_json::from_value(doc.clone()).unwrap();
        assert!(spec.is_list_form());
        assert_eq!(serde_json::to_value(&spec).unwrap(), doc);
    }

    #[test]
    fn unknown_top_level_keys_survive() {
        let mut doc = reservation_json();
        doc["description"] = json!("kept");
        let spec: ProjectSpec = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(serde_json::to_value(&spec).unwrap(), doc);
    }

    #[test]
    fn rejects_both_or_neither_module_shapes() {
        let mut both = reservation_json();
        both["modules"] = json!([]);
        assert!(serde_json::from_value::<ProjectSpec>(both).is_err());

        let mut neither = reservation_json();
        neither.as_object_mut().unwrap().remove("module");
        assert!(serde_json::from_value::<ProjectSpec>(neither).is_err());
    }

    #[test]
    fn rejects_duplicate_fields_and_modules() {
        let mut dup_field = reservation_json();
        dup_field["module"]["fields"] = json!([
            {"name": "name", "type": "String"},
            {"name": "name", "type": "Long"}
        ]);
        assert!(serde_json::from_value::<ProjectSpec>(dup_field).is_err());

        let dup_module = json!({
            "projectName": "p",
            "basePackage": "com.example",
            "modules": [
                {"moduleName": "todo", "entityName": "Todo", "fields": []},
                {"moduleName": "todo", "entityName": "Todo", "fields": []}
            ]
        });
        assert!(serde_json::from_value::<ProjectSpec>(dup_module).is_err());
    }

    #[test]
    fn rejects_reserved_field_names() {
        for name in ["id", "service", "class"] {
            let mut doc = reservation_json();
            doc["module"]["fields"] = json!([{"name": name, "type": "String"}]);
            let err = serde_json::from_value::<ProjectSpec>(doc).unwrap_err();
            assert!(err.to_string().contains("is reserved"), "{name}: {err}");
        }
    }

    #[test]
    fn rejects_empty_modules_list() {
        let doc = json!({"projectName": "p", "basePackage": "com.example", "modules": []});
        assert!(serde_json::from_value::<ProjectSpec>(doc).is_err());
    }

    #[test]
    fn package_path_uses_slashes() {
        let spec: ProjectSpec = serde_json::from_value(reservation_json()).unwrap();
        assert_eq!(spec.package_path(), "com/example/demoservice");
    }
}
