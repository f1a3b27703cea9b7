// Not every test binary uses every helper.
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use llm_gateway::api::routes::router;
use llm_gateway::backend::{BackendError, BackendInvoker, BackendReply, BackendRequest};
use llm_gateway::gateway::Gateway;
use llm_gateway::registry::ModelRegistry;
use llm_gateway::trace::{RequestTrace, TraceLevel};

pub const TEST_MODEL: &str = "test-model";

/// In-process stand-in for the inference provider: replies with a canned
/// body (or error) and records every serialized outbound request body.
pub struct StubBackend {
    reply: Result<Value, (u16, String)>,
    pub requests: Mutex<Vec<Value>>,
}

impl StubBackend {
    pub fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, body.to_string())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendInvoker for StubBackend {
    fn invocation_url(&self, model_id: &str) -> String {
        format!("http://backend.test/serving-endpoints/{model_id}/invocations")
    }

    async fn invoke(
        &self,
        _model_id: &str,
        request: &BackendRequest,
    ) -> Result<BackendReply, BackendError> {
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(request).unwrap());
        match &self.reply {
            Ok(body) => Ok(BackendReply {
                status: 200,
                body: body.clone(),
            }),
            Err((status, body)) => Err(BackendError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Router over a gateway wired to the given stub, with one registered model
/// and the trace stream discarded.
pub fn app(backend: Arc<StubBackend>) -> Router {
    let registry = ModelRegistry::from_ids([TEST_MODEL]);
    let trace = Arc::new(RequestTrace::with_writer(
        TraceLevel::Debug,
        Box::new(io::sink()),
    ));
    let gateway = Arc::new(Gateway::new(registry, backend, trace, TEST_MODEL));
    router(gateway)
}

pub async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, value)
}
