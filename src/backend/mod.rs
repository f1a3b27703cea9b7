use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::api::dto::Role;

pub mod http;

pub use http::HttpBackend;

/// Failure of the single outbound call made for an inbound request.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend answered with a non-2xx status. The raw response body is
    /// captured for the trace log and never returned to clients.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    /// Connection, TLS, or timeout failure before a response arrived.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// 2xx response whose body was not JSON.
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Raw upstream error body, when one was captured.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            BackendError::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

// ---- Backend wire types ----

#[derive(Debug, Clone, Serialize)]
pub struct BackendMessage {
    pub role: Role,
    pub content: String,
}

/// Body of the POST to `{base_url}/{model}/invocations`.
///
/// The sampling fields are optional and omitted from the serialized body
/// when unset: the chat endpoint forwards all of them, the completions
/// endpoint none. That asymmetry is a compatibility contract with the
/// backend and must survive refactors.
#[derive(Debug, Clone, Serialize)]
pub struct BackendRequest {
    pub model: String,
    pub messages: Vec<BackendMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

/// Successful backend reply: HTTP status plus the decoded JSON body. The
/// body stays a raw [`Value`]; response translation applies per-field
/// defaults instead of insisting on a schema.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: u16,
    pub body: Value,
}

/// Seam between the gateway engine and the inference provider.
///
/// Exactly one `invoke` happens per inbound chat/completion request. No
/// retries anywhere.
#[async_trait]
pub trait BackendInvoker: Send + Sync {
    /// Target URL of the invocation, for trace logging.
    fn invocation_url(&self, model_id: &str) -> String;

    async fn invoke(
        &self,
        model_id: &str,
        request: &BackendRequest,
    ) -> Result<BackendReply, BackendError>;
}
