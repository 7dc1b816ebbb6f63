//! Server instance management

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use crate::config::Config;
use crate::error::ApiError;
use crate::handlers::{create_router, AppState};

/// LeQR HTTP server
///
/// Manages Axum server lifecycle including startup and graceful shutdown.
pub struct Server {
    /// Server configuration
    config: Config,
}

impl Server {
    /// Create new server instance
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    ///
    /// # Returns
    ///
    /// `Result<Server, ApiError>` - Server or error
    pub fn new(config: Config) -> Result<Self, ApiError> {
        if let Err(e) = config.validate() {
            return Err(ApiError::internal(format!("Invalid config: {}", e)));
        }

        Ok(Self { config })
    }

    /// Get socket address for binding
    ///
    /// # Returns
    ///
    /// `Result<SocketAddr, ApiError>` - Parsed address or error
    pub fn socket_addr(&self) -> Result<SocketAddr, ApiError> {
        self.config
            .socket_addr()
            .map_err(|e| ApiError::internal(format!("Failed to parse address: {}", e)))
    }

    /// Start server and serve until a shutdown signal arrives
    ///
    /// # Returns
    ///
    /// `Result<(), ApiError>` - Success or error
    pub async fn start(&self) -> Result<(), ApiError> {
        let addr = self.socket_addr()?;

        let state = AppState::from_config(&self.config)?;
        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            error!("Failed to bind to {}: {:?}", addr, e);
            ApiError::internal(format!("Failed to bind to {}: {}", addr, e))
        })?;

        info!(
            "Server listening on: http://{}:{}",
            self.config.host, self.config.port
        );
        info!("Statistics service: {}", self.config.stats_url);

        axum::serve(listener, app)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))
    }

    /// Resolve when Ctrl+C or SIGTERM is received
    async fn shutdown_signal() {
        let ctrl_c = async {
            if signal::ctrl_c().await.is_err() {
                error!("Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
            info!("Received shutdown signal");
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut term) => {
                    term.recv().await;
                    info!("Received TERM signal");
                }
                Err(_) => {
                    error!("Failed to install TERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }

    /// Get server URL
    ///
    /// # Returns
    ///
    /// Formatted server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        self.config.server_url()
    }
}
