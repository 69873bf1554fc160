//! HTTP surface
//!
//! - `POST /api/trigger`: signed; replies 202 and runs in the background
//! - `POST /api/run`: signed; runs in the foreground and replies with the outcome
//! - `GET /api/health`
//!
//! Signed routes verify the raw body before parsing it. Nothing touches the
//! filesystem or the pipeline until authentication and the precondition
//! checks pass.

use crate::auth::{SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::config::PathsConfig;
use crate::error::GatewayError;
use crate::pipeline::{Outcome, Pipeline, RunRequest};
use scaffold_spec::SpecStore;
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{self, Reply, Response};
use warp::{Filter, Rejection};

/// Shared state behind the routes
#[derive(Debug)]
pub struct AppState {
    verifier: SignatureVerifier,
    pipeline: Arc<Pipeline>,
    workspace_root: PathBuf,
    default_spec: PathBuf,
    max_body_bytes: u64,
    store: SpecStore,
}

impl AppState {
    /// Create state
    #[must_use]
    pub fn new(verifier: SignatureVerifier, pipeline: Arc<Pipeline>, paths: &PathsConfig) -> Self {
        Self {
            verifier,
            pipeline,
            workspace_root: paths.workspace_root.clone(),
            default_spec: paths.resolved_default_spec(),
            max_body_bytes: 64 * 1024,
            store: SpecStore::new(),
        }
    }

    /// Override the body size limit
    #[inline]
    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Get pipeline
    #[inline]
    #[must_use]
    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }

    /// Authenticate, parse and check preconditions
    async fn accept(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<RunRequest, GatewayError> {
        self.verifier.verify(signature, timestamp, body)?;

        let body: TriggerBody = serde_json::from_slice(body)
            .map_err(|e| GatewayError::bad_request(format!("malformed body: {e}")))?;
        if body.instruction.trim().is_empty() {
            return Err(GatewayError::bad_request("instruction is empty"));
        }

        let spec_path = self.resolve_spec(body.spec.as_deref())?;
        if !self.store.exists(&spec_path).await {
            return Err(GatewayError::SpecNotFound(
                body.spec.map_or_else(|| self.default_spec.clone(), PathBuf::from),
            ));
        }

        Ok(RunRequest::new(spec_path, body.instruction).with_callback(body.callback_url))
    }

    fn resolve_spec(&self, spec: Option<&str>) -> Result<PathBuf, GatewayError> {
        match spec.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(self.default_spec.clone()),
            Some(raw) => {
                let relative = Path::new(raw);
                let confined = relative
                    .components()
                    .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
                if !confined {
                    return Err(GatewayError::InvalidSpecPath(raw.to_string()));
                }
                Ok(self.workspace_root.join(relative))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggerBody {
    instruction: String,
    #[serde(default)]
    spec: Option<String>,
    #[serde(default)]
    callback_url: Option<String>,
}

fn error_reply(err: &GatewayError) -> Response {
    tracing::warn!(error = %err, status = err.status().as_u16(), "request rejected");
    reply::with_status(reply::json(&json!({ "error": err.to_string() })), err.status())
        .into_response()
}

/// All routes, with JSON errors for unmatched requests
pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let limit = state.max_body_bytes;

    let health = warp::path!("api" / "health")
        .and(warp::get())
        .map(|| reply::json(&json!({ "status": "ok" })));

    let signed = warp::post()
        .and(with_state(state))
        .and(warp::header::optional::<String>(SIGNATURE_HEADER))
        .and(warp::header::optional::<String>(TIMESTAMP_HEADER))
        .and(warp::body::content_length_limit(limit))
        .and(warp::body::bytes());

    let trigger = warp::path!("api" / "trigger")
        .and(signed.clone())
        .and_then(handle_trigger);

    let run = warp::path!("api" / "run").and(signed).and_then(handle_run);

    health
        .or(trigger)
        .or(run)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

async fn handle_trigger(
    state: Arc<AppState>,
    signature: Option<String>,
    timestamp: Option<String>,
    body: Bytes,
) -> Result<Response, Infallible> {
    let request = match state
        .accept(signature.as_deref(), timestamp.as_deref(), &body)
        .await
    {
        Ok(request) => request,
        Err(e) => return Ok(error_reply(&e)),
    };

    let run_id = request.run_id;
    tracing::info!(%run_id, spec = %request.spec_path.display(), "trigger accepted");

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run_and_notify(&request).await;
    });

    Ok(reply::with_status(
        reply::json(&json!({ "status": "accepted", "runId": run_id })),
        StatusCode::ACCEPTED,
    )
    .into_response())
}

async fn handle_run(
    state: Arc<AppState>,
    signature: Option<String>,
    timestamp: Option<String>,
    body: Bytes,
) -> Result<Response, Infallible> {
    let request = match state
        .accept(signature.as_deref(), timestamp.as_deref(), &body)
        .await
    {
        Ok(request) => request,
        Err(e) => return Ok(error_reply(&e)),
    };

    let outcome = state.pipeline.run(&request).await;
    let status = match &outcome {
        Outcome::Success { .. } => StatusCode::OK,
        Outcome::Failure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    Ok(reply::with_status(reply::json(&outcome), status).into_response())
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "payload too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "content length required".to_string())
    } else {
        tracing::error!(?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
    };
    Ok(reply::with_status(reply::json(&json!({ "error": message })), status).into_response())
}
