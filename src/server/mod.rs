//! HTTP surface for the map client.
//!
//! Every route is a GET; responses are provider JSON passed through
//! or lightly reshaped, errors are `{"detail": "..."}`.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::adapters::{OrsClient, OverpassClient};
use crate::config::GatewayConfig;
use crate::core::{ConfigProvider, Gateway};

pub type ProviderGateway = Gateway<OrsClient, OverpassClient>;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ProviderGateway>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let gateway = Gateway::new(
            OrsClient::from_config(&config),
            OverpassClient::from_config(&config),
        )
        .with_bulk_concurrency(config.bulk_concurrency());

        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// Start the web server.
pub async fn serve(config: GatewayConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config.bind_address().parse()?;
    let app = create_router(AppState::new(config));

    tracing::info!("🚀 Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
