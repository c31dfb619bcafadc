//! MindEase HTTP server binary.
//!
//! Starts an axum HTTP server exposing mood logging, mood insights, coping
//! suggestions and sentiment analysis.
//!
//! # Environment Variables
//!
//! See [`mindease::config`] for the full list. `RUST_LOG` sets the tracing
//! filter (default: "info,mindease=debug").
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! # offline analysis, persistent store:
//! SENTIMENT_SERVICE_URL=off MINDEASE_STORE=sqlite cargo run --bin server
//! ```

use anyhow::Context;
use mindease::config::{AnalyzerMode, StoreBackend};
use mindease::server::{app_router, AppState};
use mindease::MindEaseConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mindease=debug".into()),
        )
        .init();

    let config = MindEaseConfig::from_env().context("invalid configuration")?;

    match &config.analyzer {
        AnalyzerMode::Remote { base_url, timeout } => {
            tracing::info!("Sentiment classifier: {} (timeout {:?})", base_url, timeout)
        }
        AnalyzerMode::Offline => {
            tracing::warn!("Sentiment classifier disabled, keyword analysis only")
        }
    }
    match &config.store {
        StoreBackend::Memory => tracing::info!("Mood store: in-memory"),
        StoreBackend::Sqlite { path } => tracing::info!("Mood store: sqlite at {}", path.display()),
    }

    let pipeline = config.build_pipeline().context("failed to build mood pipeline")?;
    let app = app_router(AppState::new(pipeline));

    let bind_addr = config.bind_addr();
    tracing::info!("mindease server starting on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
