use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use uuid::Uuid;

use crate::api::{
    dto::{ChatCompletionRequest, CompletionRequest, ModelsResponse},
    error::{ApiError, ErrorBody},
};
use crate::gateway::Gateway;

/// Assemble the gateway's HTTP surface over a shared [`Gateway`].
pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/v1/models", get(list_models))
        .route("/v1/chat/completions", post(chat_completions))
        .route("/v1/completions", post(completions))
        .route("/v1/embeddings", post(embeddings))
        .route("/healthcheck", get(healthcheck))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(gateway)
}

pub async fn list_models(
    State(gateway): State<Arc<Gateway>>,
    headers: HeaderMap,
) -> Json<ModelsResponse> {
    tracing::info!("GET request to /v1/models");
    gateway
        .trace()
        .debug(&format!("GET /v1/models - Headers: {}", headers_json(&headers)));
    Json(gateway.models())
}

pub async fn chat_completions(
    State(gateway): State<Arc<Gateway>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        model = body.get("model").and_then(serde_json::Value::as_str).unwrap_or(gateway.default_model()),
        "POST request to /v1/chat/completions"
    );

    let trace = gateway.trace();
    trace.debug("INCOMING REQUEST - POST /v1/chat/completions");
    trace.debug(&format!("Request Headers: {}", headers_json(&headers)));
    trace.debug(&format!("Request Body: {}", body));

    let request: ChatCompletionRequest =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let response = gateway.chat_completions(request).await?;
    Ok(Json(response).into_response())
}

pub async fn completions(
    State(gateway): State<Arc<Gateway>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        model = body.get("model").and_then(serde_json::Value::as_str).unwrap_or(gateway.default_model()),
        "POST request to /v1/completions"
    );

    let trace = gateway.trace();
    trace.debug("INCOMING REQUEST - POST /v1/completions");
    trace.debug(&format!("Request Headers: {}", headers_json(&headers)));
    trace.debug(&format!("Request Body: {}", body));

    let request: CompletionRequest =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let response = gateway.completions(request).await?;
    Ok(Json(response).into_response())
}

pub async fn embeddings(
    State(gateway): State<Arc<Gateway>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    tracing::info!(
        model = body.get("model").and_then(serde_json::Value::as_str).unwrap_or(gateway.default_model()),
        "POST request to /v1/embeddings"
    );

    let trace = gateway.trace();
    trace.debug("INCOMING REQUEST - POST /v1/embeddings");
    trace.debug(&format!("Request Headers: {}", headers_json(&headers)));
    trace.debug(&format!("Request Body: {}", body));

    Ok(Json(gateway.embeddings(&body)).into_response())
}

pub async fn healthcheck(State(gateway): State<Arc<Gateway>>, headers: HeaderMap) -> Response {
    gateway
        .trace()
        .debug(&format!("GET /healthcheck - Headers: {}", headers_json(&headers)));
    Json(serde_json::json!({"status": "ok"})).into_response()
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}

fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    ApiError::Internal.into_response()
}

fn headers_json(headers: &HeaderMap) -> String {
    let map: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();
    Value::Object(map).to_string()
}
