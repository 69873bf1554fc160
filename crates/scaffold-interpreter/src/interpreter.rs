//! Request-level interpretation
//!
//! Every line of a request is matched against the grammar. Lines the grammar
//! cannot match are treated as free text and sent to the translator once;
//! its output lines go back through the same grammar.

use crate::grammar::{interpret, normalize_line};
use crate::translator::{DisabledTranslator, Translator};
use scaffold_spec::Instruction;
use std::sync::Arc;

/// Instructions recovered from one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpretation {
    /// Instructions matched directly, in request order
    pub direct: Vec<Instruction>,
    /// Instructions recovered from translated free text, in output order
    pub translated: Vec<Instruction>,
    /// Lines that matched nothing and were handed to the translator
    pub free_text: Vec<String>,
}

impl Interpretation {
    /// Direct instructions followed by translated ones
    #[must_use]
    pub fn instructions(&self) -> Vec<Instruction> {
        self.direct
            .iter()
            .chain(&self.translated)
            .cloned()
            .collect()
    }

    /// Whether nothing usable was recovered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.translated.is_empty()
    }
}

/// Grammar plus translator fallback
#[derive(Clone)]
pub struct Interpreter {
    translator: Arc<dyn Translator>,
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter").finish_non_exhaustive()
    }
}

impl Interpreter {
    /// Create interpreter with a translator
    #[inline]
    #[must_use]
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Interpreter that drops free text
    #[inline]
    #[must_use]
    pub fn offline() -> Self {
        Self::new(Arc::new(DisabledTranslator))
    }

    /// Interpret a whole request
    pub async fn interpret_request(&self, text: &str) -> Interpretation {
        let mut out = Interpretation::default();

        for line in text.lines() {
            match interpret(line) {
                Some(instruction) => out.direct.push(instruction),
                None => {
                    if let Some(free) = normalize_line(line) {
                        out.free_text.push(free);
                    }
                }
            }
        }

        if !out.free_text.is_empty() {
            let prose = out.free_text.join("\n");
            let lines = self.translator.translate(&prose).await;
            let total = lines.len();
            out.translated = lines.iter().filter_map(|l| interpret(l)).collect();
            if out.translated.len() < total {
                tracing::debug!(
                    dropped = total - out.translated.len(),
                    "translated lines outside the grammar"
                );
            }
        }

        tracing::info!(
            direct = out.direct.len(),
            translated = out.translated.len(),
            "request interpreted"
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use scaffold_spec::{Field, FieldType};
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedTranslator {
        reply: Vec<String>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Translator for ScriptedTranslator {
        async fn translate(&self, text: &str) -> Vec<String> {
            self.seen.lock().unwrap().push(text.to_string());
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn direct_lines_skip_translator() {
        let translator = Arc::new(ScriptedTranslator::default());
        let interpreter = Interpreter::new(translator.clone());

        let out = interpreter
            .interpret_request("add field phone to module reservation\n\n")
            .await;

        assert_eq!(
            out.instructions(),
            vec![Instruction::add_field("reservation", "phone", None)]
        );
        assert!(translator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn free_text_goes_through_translator_once() {
        let translator = Arc::new(ScriptedTranslator {
            reply: vec![
                "add module todo with fields title:String, done:Boolean".to_string(),
                "Sure! Here you go".to_string(),
            ],
            ..Default::default()
        });
        let interpreter = Interpreter::new(translator.clone());

        let out = interpreter
            .interpret_request(
                "delete field memo from module reservation\n할일 모듈을 만들어줘\n제목과 완료 여부",
            )
            .await;

        assert_eq!(
            out.instructions(),
            vec![
                Instruction::remove_field("reservation", "memo"),
                Instruction::add_module(
                    "todo",
                    vec![
                        Field::new("title", FieldType::String),
                        Field::new("done", FieldType::Boolean),
                    ]
                ),
            ]
        );
        let seen = translator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], "할일 모듈을 만들어줘\n제목과 완료 여부");
    }

    #[tokio::test]
    async fn offline_interpreter_drops_free_text() {
        let out = Interpreter::offline()
            .interpret_request("make it nicer")
            .await;
        assert!(out.is_empty());
        assert_eq!(out.free_text, vec!["make it nicer".to_string()]);
    }
}
