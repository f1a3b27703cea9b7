use std::env;

/// Fixed workspace the gateway forwards to when no base URL is configured.
pub const DEFAULT_BASE_URL: &str =
    "https://dbc-dc8dabd2-571d.cloud.databricks.com/serving-endpoints";

/// Model assumed when a request omits `model` and when `AVAILABLE_MODELS`
/// is not set.
pub const DEFAULT_MODEL: &str = "databricks-meta-llama-3-1-405b-instruct";

const DEFAULT_PORT: u16 = 5000;

/// Static gateway configuration, read from the environment once at startup
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bearer token for the backend. Startup continues without one, but
    /// every outbound call will go out unauthenticated.
    pub token: Option<String>,
    pub base_url: String,
    /// Model identifiers the gateway accepts, in configured order.
    pub models: Vec<String>,
    pub port: u16,
    pub debug: bool,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let token = env::var("DATABRICKS_TOKEN").ok().filter(|t| !t.is_empty());
        let base_url =
            env::var("DATABRICKS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let models = parse_model_list(
            &env::var("AVAILABLE_MODELS").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        );
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let debug = env::var("DEBUG")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            token,
            base_url,
            models,
            port,
            debug,
        }
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
