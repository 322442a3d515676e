//! Remedix Web Server
//!
//! Run with: cargo run -p remedix-web

use std::net::SocketAddr;

use remedix_web::{config::Config, router::build_router, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("remedix=debug,info")),
        )
        .init();

    info!("Starting Remedix...");

    let config = Config::load()?;
    let state = AppState::from_config(&config);
    let app = build_router(state);

    let bind = std::env::var("REMEDIX_BIND").unwrap_or_else(|_| config.server.bind.clone());
    let addr: SocketAddr = bind.parse()?;

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
