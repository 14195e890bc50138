use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::error::ServerError;
use super::handler::{handle_get, handle_put, reject_head};
use crate::QueueRegistry;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on how long an unclaimed PUT value stays claimable.
    /// `None` keeps it pending for the life of the process.
    pub send_ttl: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            send_ttl: None,
        }
    }
}

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<QueueRegistry>,
    pub send_ttl: Option<Duration>,
}

/// Build the router: every path is a queue name accepting GET and PUT.
pub fn router(state: AppState) -> Router {
    // Without an explicit HEAD route axum serves HEAD from the GET handler,
    // which would claim a value and discard the body.
    let queue_routes = get(handle_get).head(reject_head).put(handle_put);

    Router::new()
        .route("/", queue_routes.clone())
        .route("/*queue", queue_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server
pub struct Server {
    config: ServerConfig,
    registry: Arc<QueueRegistry>,
}

impl Server {
    pub fn new(config: ServerConfig, registry: Arc<QueueRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn router(&self) -> Router {
        router(AppState {
            registry: self.registry.clone(),
            send_ttl: self.config.send_ttl,
        })
    }

    pub async fn run(self) -> Result<(), ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            send_ttl = ?self.config.send_ttl,
            "relayq HTTP server listening on {}",
            local_addr
        );

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
