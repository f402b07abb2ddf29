//! HTTP server

mod router;

pub use router::{AppState, RouterLimits, create_router};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::assistant::Assistant;
use crate::config::Config;
use crate::{Error, Result};

/// SEO assistant HTTP server
pub struct Server {
    /// Configuration
    config: Config,
    /// Operations served over HTTP
    assistant: Arc<Assistant>,
}

impl Server {
    /// Create a server from configuration
    pub fn new(config: Config) -> Result<Self> {
        let assistant = Arc::new(Assistant::from_config(&config)?);
        Ok(Self { config, assistant })
    }

    /// Run until Ctrl+C or SIGTERM
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {e}")))?;

        let state = Arc::new(AppState {
            assistant: Arc::clone(&self.assistant),
        });
        let limits = RouterLimits {
            request_timeout: self.config.server.request_timeout,
            max_body_size: self.config.server.max_body_size,
        };
        let app = create_router(state, limits);

        let listener = TcpListener::bind(addr).await?;
        info!("SEO assistant listening on http://{addr}");
        info!(
            textrazor = self.assistant.has_extractor(),
            gemini = self.assistant.has_generator(),
            "Remote services"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;

        info!("Server stopped");
        Ok(())
    }
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
