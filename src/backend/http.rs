use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{BackendError, BackendInvoker, BackendReply, BackendRequest};

/// One attempt, no retries; slow generations are expected, so the ceiling
/// is generous.
const INVOCATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Production [`BackendInvoker`]: a single POST per request to the
/// provider's `/invocations` endpoint with bearer authentication.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(INVOCATION_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait]
impl BackendInvoker for HttpBackend {
    fn invocation_url(&self, model_id: &str) -> String {
        format!("{}/{}/invocations", self.base_url, model_id)
    }

    async fn invoke(
        &self,
        model_id: &str,
        request: &BackendRequest,
    ) -> Result<BackendReply, BackendError> {
        let mut call = self.client.post(self.invocation_url(model_id)).json(request);
        if let Some(token) = &self.token {
            call = call.bearer_auth(token);
        }

        let response = call.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(BackendReply {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_url_joins_base_model_and_suffix() {
        let backend = HttpBackend::new("https://workspace.example/serving-endpoints", None).unwrap();
        assert_eq!(
            backend.invocation_url("some-model"),
            "https://workspace.example/serving-endpoints/some-model/invocations"
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let backend = HttpBackend::new("https://workspace.example/serving-endpoints/", None).unwrap();
        assert_eq!(
            backend.invocation_url("m"),
            "https://workspace.example/serving-endpoints/m/invocations"
        );
    }
}
