//! Outbound completion notifications
//!
//! One attempt per run. Delivery failures are the caller's to log; they
//! never change the run outcome.

use crate::pipeline::Outcome;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[notify]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Used when a trigger carries no `callbackUrl`
    pub default_callback_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            default_callback_url: None,
            timeout_secs: 10,
        }
    }
}

/// Notification delivery failures
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// HTTP client could not be constructed
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure or non-success status
    #[error("callback to {url} failed: {source}")]
    Http {
        /// Callback URL
        url: String,
        /// Underlying error
        #[source]
        source: reqwest::Error,
    },
}

/// What happened to a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Posted to this URL
    Sent(String),
    /// No callback target configured
    NoTarget,
}

/// Reports run outcomes to the caller
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `outcome`, preferring `callback_url` over any default
    ///
    /// # Errors
    /// `NotifyError` when the single delivery attempt fails.
    async fn notify(
        &self,
        callback_url: Option<&str>,
        outcome: &Outcome,
    ) -> Result<Delivery, NotifyError>;
}

#[derive(Debug, Serialize)]
struct CallbackPayload<'a> {
    content: &'a str,
}

/// Posts `{"content": message}` to a webhook
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    default_url: Option<String>,
}

impl HttpNotifier {
    /// Create notifier from config
    ///
    /// # Errors
    /// `NotifyError::Client` if the HTTP client cannot be built.
    pub fn new(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(NotifyError::Client)?;
        Ok(Self {
            client,
            default_url: config
                .default_callback_url
                .clone()
                .filter(|u| !u.trim().is_empty()),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(
        &self,
        callback_url: Option<&str>,
        outcome: &Outcome,
    ) -> Result<Delivery, NotifyError> {
        let Some(url) = callback_url
            .filter(|u| !u.trim().is_empty())
            .or(self.default_url.as_deref())
        else {
            tracing::info!(message = %outcome.message(), "no callback target, outcome logged only");
            return Ok(Delivery::NoTarget);
        };

        let message = outcome.message();
        self.client
            .post(url)
            .json(&CallbackPayload { content: &message })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| NotifyError::Http {
                url: url.to_string(),
                source,
            })?;

        tracing::info!(url, "notification sent");
        Ok(Delivery::Sent(url.to_string()))
    }
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        _callback_url: Option<&str>,
        outcome: &Outcome,
    ) -> Result<Delivery, NotifyError> {
        tracing::info!(message = %outcome.message(), "run finished");
        Ok(Delivery::NoTarget)
    }
}
