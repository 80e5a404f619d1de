//! Registration repository
//!
//! - insert: parameterized INSERT, store assigns `id` and `created_at`
//! - list: every row, newest first

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::NewRegistration;

/// Registration record from database
#[derive(Debug, Clone, FromRow)]
pub struct Registration {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub date: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub ip_country: Option<String>,
    pub ip_region: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values assigned by the store on insert
#[derive(Debug, Clone, FromRow)]
pub struct Inserted {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Registration repository
pub struct RegistrationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert one registration.
    ///
    /// Returns `None` only if the store answers without a row.
    pub async fn insert(&self, registration: &NewRegistration) -> Result<Option<Inserted>, DbError> {
        let inserted = sqlx::query_as::<_, Inserted>(
            r#"
            INSERT INTO registrations
                (name, email, company, date, ip, user_agent, ip_country, ip_region)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, created_at
            "#,
        )
        .bind(registration.name())
        .bind(registration.email())
        .bind(registration.company())
        .bind(registration.date())
        .bind(registration.ip())
        .bind(registration.user_agent())
        .bind(registration.ip_country())
        .bind(registration.ip_region())
        .fetch_optional(self.pool)
        .await?;

        Ok(inserted)
    }

    /// All registrations, most recent first.
    pub async fn list_newest_first(&self) -> Result<Vec<Registration>, DbError> {
        let rows = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, name, email, company, date, ip, user_agent,
                   ip_country, ip_region, created_at
            FROM registrations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
