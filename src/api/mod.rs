//! HTTP API: liveness and file upload into blob storage.

pub mod blob;
pub mod error;
pub mod health;
pub mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::{AppConfig, ConfigError};
use crate::shutdown::Shutdown;

pub use blob::{BlobError, BlobEvent, BlobListener, BlobStore, LocalBlobStore, LoggingBlobListener};
pub use error::ApiError;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

#[derive(Clone)]
pub struct ApiState {
    pub blobs: Arc<dyn BlobStore>,
    pub listener: Arc<dyn BlobListener>,
    pub container: String,
    pub max_file_size: u64,
}

impl ApiState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            blobs: Arc::new(LocalBlobStore::new(
                &config.server.blob_root,
                &config.server.public_base_url,
            )),
            listener: Arc::new(LoggingBlobListener),
            container: config.server.container_name.clone(),
            max_file_size: config.storage.max_file_size,
        }
    }
}

pub fn build_router(state: ApiState) -> Router {
    let body_limit = state.max_file_size.saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    Router::new()
        .route("/api/upload/{file_type}", post(upload::upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .merge(health::router())
}

pub struct ApiServer {
    pub addr: SocketAddr,
    state: ApiState,
    shutdown: Shutdown,
}

impl ApiServer {
    pub fn new(config: &AppConfig, state: ApiState, shutdown: Shutdown) -> Result<Self, ConfigError> {
        let addr = config
            .server
            .bind_addr
            .parse()
            .map_err(|err| ConfigError::ValidationError {
                message: format!("invalid server.bind_addr '{}': {err}", config.server.bind_addr),
            })?;
        Ok(Self {
            addr,
            state,
            shutdown,
        })
    }

    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("API server listening on {}", listener.local_addr()?);

        let app = build_router(self.state.clone());
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("API server stopped");
        Ok(())
    }
}
