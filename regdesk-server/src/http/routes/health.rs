//! Readiness endpoint
//!
//! Answers 200 only when the registrations store is reachable, so a load
//! balancer stops routing submissions to an instance that cannot save them.

use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::db;
use crate::http::error::ApiError;
use crate::http::server::AppState;

pub const HEALTH_PATH: &str = "/health";

/// Readiness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /health - ping the store
async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    db::ping(&state.pool).await?;

    Ok(Json(HealthResponse {
        status: "ok",
        database: "reachable",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(HEALTH_PATH, get(health))
}
