//! Entry point: wires up configuration, logging, the session manager and
//! router, then serves the tool surface over stdio.
mod handlers;
mod params;
mod tools;

use std::sync::Arc;

use dab_config::BridgeConfig;
use dab_router::Router;
use dab_session::SessionManager;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use handlers::Context;
use tools::DeviceBridgeServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = BridgeConfig::from_env();
    if config.scrcpy_server_path.is_none() {
        tracing::warn!(
            "no scrcpy-server.jar located; scrcpy-backed operations will fail until \
             SCRCPY_SERVER_PATH is set. ADB-shell fallbacks remain available."
        );
    }

    let sessions = Arc::new(SessionManager::new(config.clone()));
    let router = Router::new(config.clone(), sessions.clone());

    let ctx = Context {
        config,
        router,
        sessions,
    };

    tracing::info!("device-bridge starting on stdio transport");
    let server = DeviceBridgeServer::new(ctx).serve(stdio()).await?;
    server.waiting().await?;
    Ok(())
}
