//! Gateway configuration
//!
//! Loaded from a TOML file where every section and key is optional, then
//! adjusted from `SCAFFOLD_*` environment variables:
//!
//! | Variable | Key |
//! |---|---|
//! | `SCAFFOLD_BIND` | `server.bind` |
//! | `SCAFFOLD_PUBLIC_KEY` | `auth.public_key` |
//! | `SCAFFOLD_TRANSLATOR_URL` | `translator.base_url` |
//! | `SCAFFOLD_TRANSLATOR_MODEL` | `translator.model` |
//! | `SCAFFOLD_TRANSLATOR_API_KEY` | `translator.api_key` |
//! | `SCAFFOLD_VERIFY_ENABLED` | `verify.enabled` |
//! | `SCAFFOLD_CALLBACK_URL` | `notify.default_callback_url` |
//! | `SCAFFOLD_LOG_FORMAT` | `logging.format` |

use crate::auth::SignatureVerifier;
use crate::error::GatewayError;
use crate::notifier::NotifyConfig;
use scaffold_interpreter::TranslatorConfig;
use scaffold_verify::VerifyConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Full gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// `[server]`
    pub server: ServerConfig,
    /// `[paths]`
    pub paths: PathsConfig,
    /// `[auth]`
    pub auth: AuthConfig,
    /// `[translator]`
    pub translator: TranslatorConfig,
    /// `[verify]`
    pub verify: VerifyConfig,
    /// `[notify]`
    pub notify: NotifyConfig,
    /// `[logging]`
    pub logging: LoggingConfig,
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Largest accepted request body in bytes
    pub max_body_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// `[paths]` section; relative paths resolve against `workspace_root`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory that request spec paths are relative to
    pub workspace_root: PathBuf,
    /// Parent of generated project directories
    pub output_root: PathBuf,
    /// Spec used when a request names none
    pub default_spec: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            output_root: PathBuf::from("generated"),
            default_spec: PathBuf::from("specs/app.json"),
        }
    }
}

impl PathsConfig {
    /// Output root resolved against the workspace root
    #[must_use]
    pub fn resolved_output_root(&self) -> PathBuf {
        self.workspace_root.join(&self.output_root)
    }

    /// Default spec resolved against the workspace root
    #[must_use]
    pub fn resolved_default_spec(&self) -> PathBuf {
        self.workspace_root.join(&self.default_spec)
    }
}

/// `[auth]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Hex Ed25519 public key of the trusted caller
    pub public_key: Option<String>,
    /// Maximum accepted distance between request timestamp and now
    pub max_clock_skew_secs: Option<u64>,
}

impl AuthConfig {
    /// Build the request verifier
    ///
    /// # Errors
    /// `GatewayError::Config` if no key is set, `GatewayError::Auth` if it is invalid.
    pub fn verifier(&self) -> Result<SignatureVerifier, GatewayError> {
        let key = self
            .public_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GatewayError::Config("auth.public_key is required".to_string()))?;
        let verifier = SignatureVerifier::from_hex(key)?;
        Ok(match self.max_clock_skew_secs {
            Some(secs) => verifier.with_max_skew(Duration::from_secs(secs)),
            None => verifier,
        })
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Parse TOML text
    ///
    /// # Errors
    /// `GatewayError::ConfigParse` on invalid TOML or unknown value types.
    pub fn from_toml_str(text: &str) -> Result<Self, GatewayError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file and apply environment overrides
    ///
    /// # Errors
    /// `GatewayError::ConfigIo` or `GatewayError::ConfigParse`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GatewayError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `SCAFFOLD_*` overrides from `lookup`
    ///
    /// # Errors
    /// `GatewayError::Config` when a variable has an unusable value.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("SCAFFOLD_BIND") {
            self.server.bind = bind
                .parse()
                .map_err(|_| GatewayError::Config(format!("SCAFFOLD_BIND: invalid address '{bind}'")))?;
        }
        if let Some(key) = lookup("SCAFFOLD_PUBLIC_KEY") {
            self.auth.public_key = Some(key);
        }
        if let Some(url) = lookup("SCAFFOLD_TRANSLATOR_URL") {
            self.translator.base_url = url;
        }
        if let Some(model) = lookup("SCAFFOLD_TRANSLATOR_MODEL") {
            self.translator.model = model;
        }
        if let Some(key) = lookup("SCAFFOLD_TRANSLATOR_API_KEY") {
            self.translator.api_key = Some(key);
        }
        if let Some(flag) = lookup("SCAFFOLD_VERIFY_ENABLED") {
            self.verify.enabled = parse_bool("SCAFFOLD_VERIFY_ENABLED", &flag)?;
        }
        if let Some(url) = lookup("SCAFFOLD_CALLBACK_URL") {
            self.notify.default_callback_url = Some(url);
        }
        if let Some(format) = lookup("SCAFFOLD_LOG_FORMAT") {
            self.logging.format = match format.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(GatewayError::Config(format!(
                        "SCAFFOLD_LOG_FORMAT: expected pretty or json, got '{format}'"
                    )))
                }
            };
        }
        Ok(())
    }

    /// Check settings needed to serve signed requests
    ///
    /// # Errors
    /// `GatewayError::Config` or `GatewayError::Auth` for a missing or bad key.
    pub fn validate(&self) -> Result<(), GatewayError> {
        self.auth.verifier()?;
        if self.server.max_body_bytes == 0 {
            return Err(GatewayError::Config(
                "server.max_body_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, GatewayError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(GatewayError::Config(format!("{name}: expected a boolean, got '{value}'"))),
    }
}
