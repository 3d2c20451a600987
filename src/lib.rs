pub mod agents;
pub mod claude;
pub mod config;
pub mod export;
pub mod extract;
pub mod orchestrator;
pub mod web;

use anyhow::Context;
use claude::Generator;
use config::Config;
use export::CsvArtifact;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use web::AppState;

const DEFAULT_LOG_FILTER: &str = "ba_testgen=info,ba_testgen_lib=info,tower_http=info";

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = config
        .claude_client()
        .context("ANTHROPIC_API_KEY must be set")?;
    tracing::info!(model = %client.model(), max_iterations = config.max_iterations, "generation client ready");

    let generator: Arc<dyn Generator> = Arc::new(client);
    let artifact = CsvArtifact::new(config.output_path.clone());
    let state = AppState::new(generator, artifact, config.policy())
        .context("Failed to compile page templates")?;

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, output = %config.output_path.display(), "listening");

    axum::serve(listener, web::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("ba-testgen shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
