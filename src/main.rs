//! Evaluation engine server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evaluation_engine::api::{AppState, create_router};
use evaluation_engine::config::CatalogLoader;
use evaluation_engine::store::Store;

/// Command-line arguments for the evaluation engine server.
#[derive(Parser, Debug)]
#[command(name = "evaluation-engine")]
#[command(about = "Performance evaluation engine for HR review cycles")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "EVAL_ENGINE_PORT")]
    port: u16,

    /// Directory containing the HR catalog configuration
    #[arg(short, long, default_value = "./config/hr", env = "EVAL_ENGINE_CONFIG")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evaluation_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let loader = CatalogLoader::load(&args.config_dir).with_context(|| {
        format!(
            "Failed to load catalog configuration from {}",
            args.config_dir.display()
        )
    })?;
    info!(
        company = %loader.company().name,
        templates = loader.config().templates().len(),
        employees = loader.config().employees().len(),
        "Catalog configuration loaded"
    );

    let state = AppState::new(Store::from_catalog(&loader));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Evaluation engine listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
