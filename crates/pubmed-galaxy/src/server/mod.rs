//! HTTP server for the research network API.

pub mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::client::PubMedClient;
use crate::network::NetworkBuilder;

/// Research network HTTP server.
pub struct GalaxyServer {
    /// Network builder shared by all requests.
    builder: NetworkBuilder,

    /// Directory with the pre-built presentation bundle, if served.
    static_dir: Option<PathBuf>,
}

impl GalaxyServer {
    /// Create a new server around one client. All requests share its rate limiter.
    #[must_use]
    pub fn new(client: PubMedClient) -> Self {
        Self { builder: NetworkBuilder::new(Arc::new(client)), static_dir: None }
    }

    /// Serve static files from `dir` for paths outside `/api`.
    #[must_use]
    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }

    /// Get the network builder.
    #[must_use]
    pub const fn builder(&self) -> &NetworkBuilder {
        &self.builder
    }

    /// Run the server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error if binding or serving fails.
    pub async fn run_http(self, addr: SocketAddr) -> anyhow::Result<()> {
        if let Some(ref dir) = self.static_dir {
            tracing::info!(dir = %dir.display(), "Serving static files");
        }

        let router = routes::create_router(self.builder, self.static_dir);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for GalaxyServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalaxyServer").field("static_dir", &self.static_dir).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
