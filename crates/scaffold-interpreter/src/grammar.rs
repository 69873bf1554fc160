//! Instruction grammar
//!
//! An ordered table of matchers, tried in priority order against a
//! normalized line. The first matcher that fires decides the instruction.
//! Lines that match nothing yield `None`; the grammar never fails.
//!
//! Two phrasings are accepted with identical semantics: English
//! (`add field phone to module reservation`) and the Korean forms the agent
//! has always understood (`reservation에 phone 필드 추가`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scaffold_spec::naming::is_field_name;
use scaffold_spec::{Field, FieldType, Instruction};

const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";

type Build = fn(&Captures<'_>) -> Instruction;

struct Matcher {
    name: &'static str,
    pattern: Regex,
    build: Build,
}

impl Matcher {
    fn new(name: &'static str, pattern: &str, build: Build) -> Self {
        let pattern = pattern.replace("{IDENT}", IDENT);
        Self {
            name,
            pattern: Regex::new(&pattern).unwrap_or_else(|e| panic!("matcher {name}: {e}")),
            build,
        }
    }
}

static MATCHERS: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::new(
            "add-field",
            r"(?i)^add\s+(?:a\s+)?(?:new\s+)?field\s+(?P<field>{IDENT})(?:\s+(?:of\s+type|with\s+type|as)\s+(?P<ty>[A-Za-z]+))?\s+to\s+(?:the\s+)?module\s+(?P<module>{IDENT})$",
            build_add_field,
        ),
        Matcher::new(
            "remove-field",
            r"(?i)^(?:delete|remove)\s+(?:the\s+)?field\s+(?P<field>{IDENT})\s+from\s+(?:the\s+)?module\s+(?P<module>{IDENT})$",
            build_remove_field,
        ),
        Matcher::new(
            "add-module",
            r"(?i)^add\s+(?:a\s+)?(?:new\s+)?module\s+(?P<module>{IDENT})\s+with\s+fields?\s*:?\s*(?P<fields>.+)$",
            build_add_module,
        ),
        Matcher::new(
            "add-field-ko",
            r"^(?P<module>{IDENT})에\s+(?P<field>{IDENT})\s+필드\s+(?:(?P<ty>[A-Za-z]+)\s*(?:으로|로)\s+)?추가$",
            build_add_field,
        ),
        Matcher::new(
            "remove-field-ko",
            r"^(?P<module>{IDENT})(?:에서|에)\s+(?P<field>{IDENT})\s+필드\s+삭제$",
            build_remove_field,
        ),
        Matcher::new(
            "add-module-ko",
            r"^(?P<module>{IDENT})\s+모듈\s+추가\s*,?\s*필드(?:는)?\s*:?\s*(?P<fields>.+)$",
            build_add_module,
        ),
    ]
});

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[-*•]|\d+[.)])(?:\s+|$)").unwrap_or_else(|e| panic!("list marker: {e}"))
});

/// Interpret one line of text
///
/// Returns `None` for blank lines, comments and anything the grammar does
/// not recognize.
#[must_use]
pub fn interpret(line: &str) -> Option<Instruction> {
    let line = normalize_line(line)?;
    MATCHERS.iter().find_map(|m| {
        m.pattern.captures(&line).map(|caps| {
            let instruction = (m.build)(&caps);
            tracing::trace!(matcher = m.name, %instruction, "line matched");
            instruction
        })
    })
}

/// Strip list markers, quoting and trailing periods from a line
///
/// Returns `None` for blank lines and `#` comments.
pub(crate) fn normalize_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let unlisted = strip_list_marker(trimmed);
    let cleaned: String = unlisted
        .chars()
        .filter(|c| !matches!(c, '`' | '"' | '\''))
        .collect();
    let cleaned = cleaned.trim().trim_end_matches('.').trim_end();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Remove a leading bullet (`-`, `*`, `•`) or number (`1.`, `1)`)
pub(crate) fn strip_list_marker(line: &str) -> &str {
    match LIST_MARKER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

fn capture<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn build_add_field(caps: &Captures<'_>) -> Instruction {
    Instruction::add_field(
        capture(caps, "module"),
        capture(caps, "field"),
        Some(FieldType::coerce(caps.name("ty").map(|m| m.as_str()))),
    )
}

fn build_remove_field(caps: &Captures<'_>) -> Instruction {
    Instruction::remove_field(capture(caps, "module"), capture(caps, "field"))
}

fn build_add_module(caps: &Captures<'_>) -> Instruction {
    Instruction::add_module(
        capture(caps, "module"),
        parse_field_list(capture(caps, "fields")),
    )
}

/// Parse `title:String, done:Boolean, note`
///
/// Tokens without a type default to `String`, unknown types are coerced to
/// `String`, and tokens whose name is not an identifier or is reserved by
/// the generated code (`id`, `service`, Java keywords) are skipped.
fn parse_field_list(list: &str) -> Vec<Field> {
    list.split(',')
        .filter_map(|token| {
            let token = token.trim();
            let (name, ty) = match token.split_once(':') {
                Some((name, ty)) => (name.trim(), Some(ty.trim())),
                None => (token, None),
            };
            is_field_name(name).then(|| Field::new(name, FieldType::coerce(ty)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_matchers_compile() {
        assert_eq!(MATCHERS.len(), 6);
        assert!(LIST_MARKER.is_match("- x"));
    }

    #[test]
    fn add_field_default_type() {
        assert_eq!(
            interpret("add field phone to module reservation"),
            Some(Instruction::add_field("reservation", "phone", None))
        );
    }

    #[test]
    fn add_field_with_type_variants() {
        for line in [
            "add field count of type Integer to module stock",
            "Add field count with type integer to the module stock",
            "add a new field count as INTEGER to module stock",
        ] {
            assert_eq!(
                interpret(line),
                Some(Instruction::add_field("stock", "count", Some(FieldType::Integer))),
                "{line}"
            );
        }
    }

    #[test]
    fn add_field_unknown_type_coerces_to_string() {
        assert_eq!(
            interpret("add field due of type Date to module todo"),
            Some(Instruction::add_field("todo", "due", Some(FieldType::String)))
        );
    }

    #[test]
    fn remove_field_forms() {
        let expected = Some(Instruction::remove_field("reservation", "phone"));
        assert_eq!(interpret("delete field phone from module reservation"), expected);
        assert_eq!(interpret("Remove the field phone from the module reservation."), expected);
    }

    #[test]
    fn add_module_field_list() {
        assert_eq!(
            interpret("add module todo with fields title:String, done:Boolean"),
            Some(Instruction::add_module(
                "todo",
                vec![
                    Field::new("title", FieldType::String),
                    Field::new("done", FieldType::Boolean),
                ]
            ))
        );
    }

    #[test]
    fn add_module_coerces_and_skips_tokens() {
        assert_eq!(
            interpret("add module note with fields body, pinned:bool, 9bad:Long, when:Date"),
            Some(Instruction::add_module(
                "note",
                vec![
                    Field::new("body", FieldType::String),
                    Field::new("pinned", FieldType::String),
                    Field::new("when", FieldType::String),
                ]
            ))
        );
    }

    #[test]
    fn add_module_skips_reserved_field_names() {
        assert_eq!(
            interpret("add module ticket with fields id:Long, class, subject, service:String"),
            Some(Instruction::add_module(
                "ticket",
                vec![Field::new("subject", FieldType::String)]
            ))
        );
    }

    #[test]
    fn reserved_add_field_still_matches() {
        // Recognized here so it is never sent for translation; the mutator drops it.
        assert_eq!(
            interpret("add field id to module todo"),
            Some(Instruction::add_field("todo", "id", None))
        );
    }

    #[test]
    fn add_module_with_no_valid_fields_still_parses() {
        assert_eq!(
            interpret("add module todo with fields 1x, -"),
            Some(Instruction::add_module("todo", vec![]))
        );
    }

    #[test]
    fn korean_forms() {
        assert_eq!(
            interpret("reservation에 phone 필드 추가"),
            Some(Instruction::add_field("reservation", "phone", None))
        );
        assert_eq!(
            interpret("todo에 priority 필드 Integer으로 추가"),
            Some(Instruction::add_field("todo", "priority", Some(FieldType::Integer)))
        );
        assert_eq!(
            interpret("reservation에서 phone 필드 삭제"),
            Some(Instruction::remove_field("reservation", "phone"))
        );
        assert_eq!(
            interpret("reservation에 phone 필드 삭제"),
            Some(Instruction::remove_field("reservation", "phone"))
        );
        assert_eq!(
            interpret("todo 모듈 추가, 필드 title:String, done:Boolean"),
            Some(Instruction::add_module(
                "todo",
                vec![
                    Field::new("title", FieldType::String),
                    Field::new("done", FieldType::Boolean),
                ]
            ))
        );
    }

    #[test]
    fn list_markers_and_quotes_are_stripped() {
        let expected = Some(Instruction::add_field("reservation", "phone", None));
        assert_eq!(interpret("- add field phone to module reservation"), expected);
        assert_eq!(interpret("2) add field `phone` to module `reservation`"), expected);
        assert_eq!(interpret("  3. add field \"phone\" to module reservation.  "), expected);
    }

    #[test]
    fn unmatched_lines_are_none() {
        assert_eq!(interpret(""), None);
        assert_eq!(interpret("   "), None);
        assert_eq!(interpret("# add field phone to module reservation"), None);
        assert_eq!(interpret("please add a phone number to reservations"), None);
        assert_eq!(interpret("add field phone to module"), None);
    }

    #[test]
    fn display_output_reparses() {
        let instructions = [
            Instruction::add_field("todo", "due", Some(FieldType::Long)),
            Instruction::remove_field("todo", "due"),
            Instruction::add_module("todo", vec![Field::new("title", FieldType::String)]),
        ];
        for instr in instructions {
            assert_eq!(interpret(&instr.to_string()), Some(instr));
        }
    }
}
