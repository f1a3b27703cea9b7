mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, post_json, StubBackend, TEST_MODEL};

#[tokio::test]
async fn completion_translates_into_the_legacy_text_shape() {
    let backend = StubBackend::replying(json!({
        "id": "y7",
        "choices": [{"message": {"content": "the answer"}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 4, "completion_tokens": 5, "total_tokens": 9}
    }));

    let payload = json!({"model": TEST_MODEL, "prompt": "question"});
    let (status, body) = post_json(app(backend), "/v1/completions", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "cmpl-y7");
    assert_eq!(body["object"], "text_completion");
    assert_eq!(body["choices"][0]["text"], "the answer");
    assert_eq!(body["choices"][0]["index"], 0);
    assert!(body["choices"][0]["logprobs"].is_null());
    assert_eq!(body["choices"][0]["finish_reason"], "stop");
    assert_eq!(body["usage"]["total_tokens"], 9);
}

#[tokio::test]
async fn sampling_parameters_are_never_forwarded_to_the_backend() {
    let backend = StubBackend::replying(json!({}));
    let payload = json!({
        "model": TEST_MODEL,
        "prompt": "continue",
        "temperature": 0.2,
        "top_p": 0.9,
        "stop": ["###"],
        "max_tokens": 64
    });
    let (status, _) = post_json(app(backend.clone()), "/v1/completions", payload).await;
    assert_eq!(status, StatusCode::OK);

    let outbound = &backend.recorded()[0];
    assert!(outbound.get("temperature").is_none());
    assert!(outbound.get("top_p").is_none());
    assert!(outbound.get("stop").is_none());
    assert_eq!(outbound["max_tokens"], 64);
    assert_eq!(outbound["model"], TEST_MODEL);
}

#[tokio::test]
async fn prompt_becomes_a_single_user_message() {
    let backend = StubBackend::replying(json!({}));
    let payload = json!({"model": TEST_MODEL, "prompt": "hello backend"});
    post_json(app(backend.clone()), "/v1/completions", payload).await;

    let outbound = &backend.recorded()[0];
    let messages = outbound["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "hello backend");
    // Endpoint-specific token budget.
    assert_eq!(outbound["max_tokens"], 256);
}

#[tokio::test]
async fn structured_prompt_parts_are_normalized() {
    let backend = StubBackend::replying(json!({}));
    let payload = json!({
        "model": TEST_MODEL,
        "prompt": [
            {"type": "text", "text": "first"},
            {"type": "audio", "data": "…"},
            {"type": "text", "text": "second"}
        ]
    });
    post_json(app(backend.clone()), "/v1/completions", payload).await;

    assert_eq!(backend.recorded()[0]["messages"][0]["content"], "first\nsecond");
}

#[tokio::test]
async fn missing_prompt_defaults_to_empty() {
    let backend = StubBackend::replying(json!({}));
    let (status, _) = post_json(
        app(backend.clone()),
        "/v1/completions",
        json!({"model": TEST_MODEL}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.recorded()[0]["messages"][0]["content"], "");
}

#[tokio::test]
async fn unknown_model_is_rejected_with_404() {
    let backend = StubBackend::replying(json!({}));
    let payload = json!({"model": "missing-model", "prompt": "x"});
    let (status, body) = post_json(app(backend), "/v1/completions", payload).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Model missing-model not found");
}
