pub mod config;
pub mod error;
pub mod learning_log;
pub mod openai;
pub mod persona;
pub mod session;
pub mod signature;
pub mod types;
pub mod webhook;
pub mod whatsapp;

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info};
use tokio::net::TcpListener;

use config::Config;
use error::Result;
use session::{InMemorySessionStore, SessionStore};
use webhook::{AppState, build_router};

/// Run the webhook server until Ctrl-C.
pub async fn run() -> Result<()> {
    info!("Initializing webhook bridge");
    let config = Config::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    debug!("Initializing in-memory session store");
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let state = Arc::new(AppState::new(config, sessions));
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Luna is listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, shutting down...");
}
