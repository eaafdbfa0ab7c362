use std::time::Instant;

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/db/ping", get(db_ping))
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, Deserialize)]
pub struct DbPingResponse {
    pub status: String,
    pub rtt_ms: u128,
}

#[tracing::instrument(name = "GET /health")]
pub async fn health() -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

#[tracing::instrument(name = "GET /db/ping", skip(state))]
pub async fn db_ping(State(state): State<AppState>) -> Result<Json<DbPingResponse>, ApiError> {
    let now = Instant::now();
    state.db.ping().await?;
    Ok(Json(DbPingResponse {
        status: "ok".to_string(),
        rtt_ms: now.elapsed().as_millis(),
    }))
}
