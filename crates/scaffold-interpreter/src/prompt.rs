//! Prompt construction and completion cleanup for the free-text translator

use crate::grammar::strip_list_marker;

/// Fixed instruction-format constraint sent with every translation request.
pub const SYSTEM_PROMPT: &str = "\
You edit the specification of a generated web project. Convert the user's request \
into a list of instructions, one instruction per line, using only these forms:

- add field <field> to module <module>
- add field <field> of type <type> to module <module>
- delete field <field> from module <module>
- add module <module> with fields <field>:<type>, <field>:<type>, ...

<type> is one of String, Boolean, Integer, Long.
Module and field names must be lowercase English identifiers. Translate names \
written in other languages into English (for example 할일 -> todo, 담당자 -> assignee).
Output only instructions. Do not output anything unrelated to the request.";

/// User message wrapping the caller's prose
#[must_use]
pub fn user_message(text: &str) -> String {
    format!(
        "Convert the following request into instructions in the format above, one per line.\n\
         Request: {text}"
    )
}

/// Split completion text into candidate instruction lines
///
/// Drops blank lines and `#` comments and strips bullets or numbering.
#[must_use]
pub fn completion_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| strip_list_marker(line).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
