// ABOUTME: Edge proxy in front of raw.githubusercontent.com adding CORS and cache headers
// ABOUTME: Builds the axum router around a shared reqwest client and serves it until Ctrl-C

pub mod config;
pub mod handler;
pub mod rewrite;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;

pub use config::{ProxyConfig, ProxyMode};

/// Shared, read-only state behind every request
#[derive(Debug)]
pub struct ProxyState {
    pub config: ProxyConfig,
    pub client: reqwest::Client,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build upstream HTTP client")?;
        Ok(Self { config, client })
    }
}

/// Every method and path lands on the one fallback handler
pub fn router(config: ProxyConfig) -> Result<Router> {
    let state = Arc::new(ProxyState::new(config)?);
    Ok(Router::new().fallback(handler::handle).with_state(state))
}

pub async fn serve(config: ProxyConfig, addr: SocketAddr) -> Result<()> {
    let upstream = config.upstream_base().to_string();
    let mode = config.mode;
    let app = router(config)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!(
        "Proxying http://{} -> {} ({:?} mode)",
        listener.local_addr().unwrap_or(addr),
        upstream,
        mode
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Proxy server stopped unexpectedly")?;

    log::info!("Proxy shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
