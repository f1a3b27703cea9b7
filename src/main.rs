use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use llm_gateway::api;
use llm_gateway::backend::HttpBackend;
use llm_gateway::config::{self, GatewayConfig};
use llm_gateway::gateway::Gateway;
use llm_gateway::registry::ModelRegistry;
use llm_gateway::trace::{RequestTrace, TraceLevel};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = GatewayConfig::from_env();

    let default_directive = if config.debug {
        "llm_gateway=debug"
    } else {
        "llm_gateway=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.token.is_none() {
        tracing::warn!("DATABRICKS_TOKEN environment variable not set");
    }

    let registry = ModelRegistry::from_ids(config.models.iter().map(String::as_str));
    let backend = HttpBackend::new(&config.base_url, config.token.clone())
        .expect("failed to build backend HTTP client");
    let trace = Arc::new(RequestTrace::stdout(TraceLevel::Debug));

    let gateway = Arc::new(Gateway::new(
        registry,
        Arc::new(backend),
        trace.clone(),
        config::DEFAULT_MODEL,
    ));
    let app = api::routes::router(gateway);

    tracing::info!(
        "Starting API server on port {}, debug={}",
        config.port,
        config.debug
    );
    trace.info("Detailed request logging enabled to console output");

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
