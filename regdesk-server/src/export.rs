//! Export pipeline shared by the HTTP route and the CLI

use sqlx::PgPool;

use crate::db::{schema, DbError, RegistrationRepo};
use crate::render_csv::{render_registrations, RenderError};

/// Export failure
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Ensure the schema, read every registration newest first and render CSV.
///
/// Succeeds with a header-only document when nothing has been submitted.
pub async fn export_document(pool: &PgPool) -> Result<String, ExportError> {
    schema::ensure(pool).await?;
    let rows = RegistrationRepo::new(pool).list_newest_first().await?;
    tracing::debug!(rows = rows.len(), "Rendering registrations export");
    Ok(render_registrations(&rows)?)
}
