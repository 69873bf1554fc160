//! Testing utilities for the scaffold workspace
//!
//! Shared fixtures, signing helpers and test doubles.

#![allow(missing_docs)]

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use scaffold_interpreter::Translator;
use scaffold_spec::{Field, FieldType, ModuleSpec, ProjectSpec};
use scaffold_verify::{Verifier, VerifyError, VerifyReport};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const PROJECT_NAME: &str = "demo-service";
pub const BASE_PACKAGE: &str = "com.example.demoservice";

/// `reservation` with a single `name:String` field
pub fn reservation_spec() -> ProjectSpec {
    ProjectSpec::new(
        PROJECT_NAME,
        BASE_PACKAGE,
        ModuleSpec::new("reservation", vec![Field::new("name", FieldType::String)]),
    )
}

/// `todo` with `title:String, done:Boolean`
pub fn todo_spec() -> ProjectSpec {
    ProjectSpec::new(
        PROJECT_NAME,
        BASE_PACKAGE,
        ModuleSpec::new(
            "todo",
            vec![
                Field::new("title", FieldType::String),
                Field::new("done", FieldType::Boolean),
            ],
        ),
    )
}

/// On-disk form of [`reservation_spec`]
pub fn reservation_json() -> String {
    serde_json::json!({
        "projectName": PROJECT_NAME,
        "basePackage": BASE_PACKAGE,
        "module": {
            "moduleName": "reservation",
            "entityName": "Reservation",
            "fields": [{ "name": "name", "type": "String" }]
        }
    })
    .to_string()
}

/// Write [`reservation_json`] to `dir/name`
pub fn write_reservation_spec(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, reservation_json()).unwrap();
    path
}

/// Deterministic signing key
pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

/// Hex public key matching [`signing_key`]
pub fn public_key_hex() -> String {
    hex::encode(signing_key().verifying_key().to_bytes())
}

/// Hex signature over `timestamp || body`
pub fn sign(timestamp: &str, body: &[u8]) -> String {
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(signing_key().sign(&message).to_bytes())
}

/// Translator returning fixed lines and counting calls
#[derive(Debug, Default)]
pub struct StubTranslator {
    lines: Vec<String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubTranslator {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, text: &str) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());
        self.lines.clone()
    }
}

/// Scripted verification result
#[derive(Debug, Clone)]
pub enum StubOutcome {
    Pass,
    Fail { exit_code: i32, stderr: String },
}

/// Verifier with a scripted result that records project dirs
#[derive(Debug)]
pub struct StubVerifier {
    outcome: StubOutcome,
    dirs: Mutex<Vec<PathBuf>>,
}

impl StubVerifier {
    pub fn passing() -> Self {
        Self {
            outcome: StubOutcome::Pass,
            dirs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(exit_code: i32, stderr: &str) -> Self {
        Self {
            outcome: StubOutcome::Fail {
                exit_code,
                stderr: stderr.to_string(),
            },
            dirs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.dirs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Verifier for StubVerifier {
    async fn verify(&self, project_dir: &Path) -> Result<VerifyReport, VerifyError> {
        self.dirs.lock().unwrap().push(project_dir.to_path_buf());
        match &self.outcome {
            StubOutcome::Pass => Ok(VerifyReport {
                command: "stub".to_string(),
                ..VerifyReport::default()
            }),
            StubOutcome::Fail { exit_code, stderr } => Err(VerifyError::BuildFailure {
                command: "stub".to_string(),
                stdout: String::new(),
                stderr: stderr.clone(),
                exit_code: Some(*exit_code),
            }),
        }
    }
}
