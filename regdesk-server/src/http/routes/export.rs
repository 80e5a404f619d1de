//! Registration CSV export endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use super::method_not_allowed;
use crate::export::export_document;
use crate::http::error::ApiError;
use crate::http::server::AppState;

pub const EXPORT_PATH: &str = "/api/export";

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_DISPOSITION: &str = "attachment; filename=\"registrations.csv\"";

/// GET /api/export - every registration as CSV, newest first
async fn export(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let csv = export_document(&state.pool).await?;

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
            (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
        ],
        csv,
    ))
}

/// Export routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(EXPORT_PATH, get(export).fallback(method_not_allowed("GET")))
}
