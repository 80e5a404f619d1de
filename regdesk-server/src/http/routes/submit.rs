//! Registration submit endpoint

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::method_not_allowed;
use crate::db::{schema, RegistrationRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonSubmission, MAX_SUBMISSION_BYTES};
use crate::http::server::AppState;
use crate::models::{ClientContext, NewRegistration, SubmissionFields};

pub const SUBMIT_PATH: &str = "/api/submit";

/// Submit response
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub id: Option<i64>,
    pub created_at: Option<String>,
}

/// POST /api/submit - validate and store one registration
async fn submit(
    State(state): State<Arc<AppState>>,
    context: ClientContext,
    JsonSubmission(body): JsonSubmission,
) -> Result<Json<SubmitResponse>, ApiError> {
    let fields = SubmissionFields::from_json(&body);
    let registration = NewRegistration::validate(fields, context)?;

    schema::ensure(&state.pool).await?;
    let inserted = RegistrationRepo::new(&state.pool)
        .insert(&registration)
        .await?;

    if inserted.is_none() {
        tracing::warn!("Insert returned no row");
    }

    Ok(Json(SubmitResponse {
        ok: true,
        id: inserted.as_ref().map(|row| row.id),
        created_at: inserted.map(|row| response_timestamp(row.created_at)),
    }))
}

/// `2024-01-02T03:04:05.678Z`: UTC, millisecond precision.
fn response_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Submit routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            SUBMIT_PATH,
            post(submit).fallback(method_not_allowed("POST")),
        )
        .layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES))
}
