//! Server Implementation
//!
//! HTTP server startup and shutdown handling.

use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create a server over existing state (for tests and embedding)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(self.config.clone())?,
        };

        let app = crate::api::create_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Order server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
