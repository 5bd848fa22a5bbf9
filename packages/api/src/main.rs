use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use contractrisk_api::client::{LlmClient, OpenAiClient};
use contractrisk_api::config::{AnalyzerConfig, LangfuseConfig, ServerConfig};
use contractrisk_api::http::{self, AppState};
use contractrisk_api::observability::{LangfuseTracer, TracedClient};
use contractrisk_api::ClauseAnalyzer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let analyzer_config = AnalyzerConfig::from_env();
    if analyzer_config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; analysis requests will fail until it is");
    }

    let openai = match OpenAiClient::new(&analyzer_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create LLM client");
            std::process::exit(1);
        }
    };

    let client: Arc<dyn LlmClient> = match LangfuseConfig::from_env().map(LangfuseTracer::new) {
        Some(Ok(tracer)) => {
            tracing::info!("Langfuse tracing is enabled");
            Arc::new(TracedClient::new(openai, tracer))
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "failed to create Langfuse tracer, tracing disabled");
            Arc::new(openai)
        }
        None => Arc::new(openai),
    };

    tracing::info!(
        model = %analyzer_config.model,
        temperature = analyzer_config.temperature,
        "model gateway configured"
    );

    let state = AppState::new(ClauseAnalyzer::new(client, analyzer_config.temperature));
    let app = http::router(state);

    let addr = server_config.bind_addr;
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to bind on {addr}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
