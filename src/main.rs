//! Document Split Service - Main Entry Point
//!
//! Accepts Word document uploads, splits them into branded chunks, and
//! serves the results back as zip archives.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsplit::api::{create_router, AppState};
use docsplit::types::ServiceConfig;
use docsplit::SWEEP_INTERVAL_SECS;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "docsplit=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env();

    info!("Starting Document Split Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Chunk size: {} paragraphs, upload limit: {} bytes",
        config.paragraphs_per_job(),
        config.max_upload_bytes
    );

    std::fs::create_dir_all(&config.upload_dir)?;

    let state = Arc::new(AppState::new(config));
    let app = create_router(state.clone());

    spawn_expiry_sweep(state);

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drop archives nobody claimed within the TTL.
fn spawn_expiry_sweep(state: Arc<AppState>) {
    tokio::spawn(async move {
        let ttl = chrono::Duration::seconds(state.config.archive_ttl_secs as i64);
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            let removed = state.sessions.write().await.cleanup_expired(ttl);
            if removed > 0 {
                info!(removed, "expired unclaimed archives");
            }
        }
    });
}
