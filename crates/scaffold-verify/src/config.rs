//! Verification settings

use serde::{Deserialize, Serialize};

/// `[verify]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Run verification at all
    pub enabled: bool,
    /// Build program, resolved relative to the project directory when it has a path
    pub program: String,
    /// Build arguments
    pub args: Vec<String>,
    /// File whose absence triggers the bootstrap step
    pub bootstrap_marker: Option<String>,
    /// Bootstrap program
    pub bootstrap_program: Option<String>,
    /// Bootstrap arguments
    pub bootstrap_args: Vec<String>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        let program = if cfg!(windows) { "gradlew.bat" } else { "./gradlew" };
        Self {
            enabled: true,
            program: program.to_string(),
            args: vec!["test".to_string()],
            bootstrap_marker: Some(
                if cfg!(windows) { "gradlew.bat" } else { "gradlew" }.to_string(),
            ),
            bootstrap_program: Some("gradle".to_string()),
            bootstrap_args: vec!["wrapper".to_string()],
        }
    }
}

impl VerifyConfig {
    /// Config with verification switched off
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
