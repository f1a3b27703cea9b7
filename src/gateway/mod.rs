use std::sync::Arc;

use serde_json::Value;

use crate::api::dto::{
    ChatCompletionRequest, ChatCompletionResponse, CompletionRequest, CompletionResponse,
    EmbeddingObject, EmbeddingUsage, EmbeddingsResponse, ModelsResponse,
};
use crate::api::error::ApiError;
use crate::backend::{BackendInvoker, BackendReply, BackendRequest};
use crate::registry::ModelRegistry;
use crate::trace::RequestTrace;

pub mod translate;

/// Width of the placeholder embedding vector.
const EMBEDDING_DIM: usize = 1536;

/// The translation engine: validates the model, reshapes the request for
/// the backend, performs the single outbound call, and reshapes the reply
/// into the OpenAI-compatible schema.
///
/// Holds no mutable state; everything here is built once at startup and
/// shared read-only across request handlers.
pub struct Gateway {
    registry: ModelRegistry,
    backend: Arc<dyn BackendInvoker>,
    trace: Arc<RequestTrace>,
    default_model: String,
}

impl Gateway {
    pub fn new(
        registry: ModelRegistry,
        backend: Arc<dyn BackendInvoker>,
        trace: Arc<RequestTrace>,
        default_model: &str,
    ) -> Self {
        Self {
            registry,
            backend,
            trace,
            default_model: default_model.to_string(),
        }
    }

    pub fn trace(&self) -> &RequestTrace {
        &self.trace
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn models(&self) -> ModelsResponse {
        ModelsResponse {
            data: self.registry.descriptors().to_vec(),
            object: "list".to_string(),
        }
    }

    pub async fn chat_completions(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiError> {
        let model_id = self.resolve_model(request.model.as_deref())?;
        let backend_request = translate::chat_request(&model_id, &request);
        let reply = self.invoke(&model_id, &backend_request).await?;
        Ok(translate::chat_response(&model_id, &reply.body))
    }

    pub async fn completions(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ApiError> {
        let model_id = self.resolve_model(request.model.as_deref())?;
        let backend_request = translate::completion_request(&model_id, &request);
        let reply = self.invoke(&model_id, &backend_request).await?;
        Ok(translate::completion_response(&model_id, &reply.body))
    }

    /// Placeholder: echoes the requested model and a zero vector without
    /// calling the backend. Deliberately skips registry validation, matching
    /// the other side of this endpoint's "200 always" contract.
    pub fn embeddings(&self, body: &Value) -> EmbeddingsResponse {
        let model_id = body
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or(&self.default_model);
        EmbeddingsResponse {
            object: "list".to_string(),
            data: vec![EmbeddingObject {
                object: "embedding".to_string(),
                embedding: vec![0.0; EMBEDDING_DIM],
                index: 0,
            }],
            model: model_id.to_string(),
            usage: EmbeddingUsage {
                prompt_tokens: 0,
                total_tokens: 0,
            },
        }
    }

    fn resolve_model(&self, requested: Option<&str>) -> Result<String, ApiError> {
        let model_id = requested.unwrap_or(&self.default_model);
        if self.registry.contains(model_id) {
            Ok(model_id.to_string())
        } else {
            Err(ApiError::ModelNotFound(model_id.to_string()))
        }
    }

    /// The one outbound call for this request, traced on both sides.
    async fn invoke(
        &self,
        model_id: &str,
        request: &BackendRequest,
    ) -> Result<BackendReply, ApiError> {
        let url = self.backend.invocation_url(model_id);
        self.trace.debug(&format!("OUTGOING REQUEST - POST {url}"));
        self.trace
            .debug("Outgoing Headers: {'Authorization': 'Bearer [REDACTED]'}");
        if let Ok(body) = serde_json::to_string(request) {
            self.trace.debug(&format!("Outgoing Body: {body}"));
        }

        match self.backend.invoke(model_id, request).await {
            Ok(reply) => {
                self.trace
                    .debug(&format!("RESPONSE from backend - Status Code: {}", reply.status));
                self.trace.debug(&format!("Response Body: {}", reply.body));
                Ok(reply)
            }
            Err(err) => {
                self.trace
                    .error(&format!("ERROR in request to backend: {err}"));
                if let Some(body) = err.response_body() {
                    self.trace.error(&format!("Error Response Body: {body}"));
                }
                tracing::error!("error making request to backend: {err}");
                Err(ApiError::Backend(err))
            }
        }
    }
}
