//! Source templates, one module per artifact family
//!
//! Templates are plain functions from the generation context and a module
//! to a `String`. They never read the clock, the environment or the locale.

pub(crate) mod controller;
pub(crate) mod entity;
pub(crate) mod home;
pub(crate) mod repository;
pub(crate) mod service;
pub(crate) mod stylesheet;
pub(crate) mod view;

use scaffold_spec::naming::capitalize;
use scaffold_spec::{Field, FieldType};

/// `String title, Boolean done`
pub(crate) fn typed_params(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| format!("{} {}", f.field_type, f.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `title, done`
pub(crate) fn arg_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `getTitle` / `setTitle`
pub(crate) fn accessor(prefix: &str, field: &Field) -> String {
    format!("{prefix}{}", capitalize(&field.name))
}

/// Quote a value as a Java string literal
pub(crate) fn java_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// HTML `<input>` attributes for a field's form control
pub(crate) fn input_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Boolean => "checkbox",
        FieldType::Integer | FieldType::Long => "number",
        FieldType::String => "text",
    }
}
