//! # warden-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `PORT` (default 3000).

use std::net::SocketAddr;
use std::sync::Arc;

use warden_api::config::AppConfig;
use warden_api::AppState;
use warden_idp::{HttpTokenVerifier, IdpConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration invalid: {e}");
        e
    })?;

    let idp_config = IdpConfig::from_env().map_err(|e| {
        tracing::error!("Identity provider not configured: {e}");
        e
    })?;
    tracing::info!(
        verify_url = %idp_config.verify_url,
        project_id = %idp_config.project_id,
        "identity provider configured"
    );
    let verifier = HttpTokenVerifier::new(idp_config)?;

    let state = AppState::new(Arc::new(verifier), &config);
    let app = warden_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, mode = %config.mode, "warden API listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured tracing. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
