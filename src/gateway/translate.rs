//! Request and response translation between the OpenAI-compatible surface
//! and the backend's invocation schema.
//!
//! Response translation never fails: every field the gateway reads from a
//! backend reply goes through an explicit defaulting accessor that tolerates
//! a missing or differently-typed value.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::api::dto::{
    ChatCompletionChoice, ChatCompletionRequest, ChatCompletionResponse, CompletionChoice,
    CompletionRequest, CompletionResponse, MessageContent, ResponseMessage, Role, Usage,
};
use crate::backend::{BackendMessage, BackendRequest};

const CHAT_MAX_TOKENS: u32 = 2048;
const COMPLETION_MAX_TOKENS: u32 = 256;
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_TOP_P: f64 = 1.0;

static NULL: Value = Value::Null;

/// Collapse content into the single string the backend requires.
///
/// Strings pass through unchanged. Part lists keep only `"type": "text"`
/// elements, joined with newlines; anything else (wrong tag, missing tag,
/// non-object) is skipped, not errored.
pub fn normalize_content(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(parts) => parts
            .iter()
            .filter(|part| part.get("type").and_then(Value::as_str) == Some("text"))
            .map(|part| part.get("text").and_then(Value::as_str).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn chat_request(model_id: &str, request: &ChatCompletionRequest) -> BackendRequest {
    let messages = request
        .messages
        .iter()
        .map(|message| BackendMessage {
            role: message.role,
            content: normalize_content(&message.content),
        })
        .collect();

    BackendRequest {
        model: model_id.to_string(),
        messages,
        max_tokens: request.max_tokens.unwrap_or(CHAT_MAX_TOKENS),
        temperature: Some(request.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
        top_p: Some(request.top_p.unwrap_or(DEFAULT_TOP_P)),
        stop: Some(request.stop.clone().unwrap_or_default()),
    }
}

/// The legacy endpoint becomes a single-user-message chat invocation. Its
/// backend body carries only the model, message, and token budget: sampling
/// parameters are accepted from clients but never forwarded, a compatibility
/// contract with the backend's observed behavior.
pub fn completion_request(model_id: &str, request: &CompletionRequest) -> BackendRequest {
    let prompt = request
        .prompt
        .as_ref()
        .map(normalize_content)
        .unwrap_or_default();

    BackendRequest {
        model: model_id.to_string(),
        messages: vec![BackendMessage {
            role: Role::User,
            content: prompt,
        }],
        max_tokens: request.max_tokens.unwrap_or(COMPLETION_MAX_TOKENS),
        temperature: None,
        top_p: None,
        stop: None,
    }
}

pub fn chat_response(model_id: &str, body: &Value) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: format!("chatcmpl-{}", response_id(body)),
        object: "chat.completion".to_string(),
        created: created_at(body),
        model: model_id.to_string(),
        choices: vec![ChatCompletionChoice {
            index: 0,
            message: ResponseMessage {
                role: Role::Assistant,
                content: message_content(body),
            },
            finish_reason: finish_reason(body),
        }],
        usage: token_usage(body),
    }
}

pub fn completion_response(model_id: &str, body: &Value) -> CompletionResponse {
    CompletionResponse {
        id: format!("cmpl-{}", response_id(body)),
        object: "text_completion".to_string(),
        created: created_at(body),
        model: model_id.to_string(),
        choices: vec![CompletionChoice {
            text: message_content(body),
            index: 0,
            logprobs: None,
            finish_reason: finish_reason(body),
        }],
        usage: token_usage(body),
    }
}

// ---- Per-field defaulting ----

pub fn response_id(body: &Value) -> &str {
    body.get("id").and_then(Value::as_str).unwrap_or("unknown")
}

pub fn created_at(body: &Value) -> u64 {
    body.get("created")
        .and_then(Value::as_u64)
        .unwrap_or_else(now_epoch_secs)
}

/// `choices[0]`, or null when `choices` is missing, malformed, or empty, so
/// the field accessors below fall back to their defaults instead of
/// indexing out of range.
fn first_choice(body: &Value) -> &Value {
    body.get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .unwrap_or(&NULL)
}

pub fn message_content(body: &Value) -> String {
    first_choice(body)
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

pub fn finish_reason(body: &Value) -> String {
    first_choice(body)
        .get("finish_reason")
        .and_then(Value::as_str)
        .unwrap_or("stop")
        .to_string()
}

pub fn token_usage(body: &Value) -> Usage {
    let usage = body.get("usage").unwrap_or(&NULL);
    let field = |name: &str| usage.get(name).and_then(Value::as_u64).unwrap_or(0) as u32;
    Usage {
        prompt_tokens: field("prompt_tokens"),
        completion_tokens: field("completion_tokens"),
        total_tokens: field("total_tokens"),
    }
}

fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
