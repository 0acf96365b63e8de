use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Heartbeat {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn heartbeat() -> Json<Heartbeat> {
    Json(Heartbeat {
        status: "Healthy",
        timestamp: Utc::now(),
    })
}

/// Unauthenticated liveness routes.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/health", get(heartbeat))
}
