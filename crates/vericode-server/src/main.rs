//! Vericode HTTP server binary

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vericode_config::Settings;
use vericode_core::Vericode;
use vericode_server::{app, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load()?;
    let state = Arc::new(AppState::new(Vericode::new(settings.secret), settings.params));

    let cfg = ServerConfig::from_env();
    let listener = TcpListener::bind(cfg.bind_addr).await?;
    tracing::info!("vericode-server listening on {}", cfg.bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
