//! Idempotent schema for the registrations table
//!
//! Every statement is `IF NOT EXISTS`, so concurrent requests may all run
//! it without coordination. Evolution is additive only.

use sqlx::PgPool;

use super::repos::DbError;

const CREATE_REGISTRATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS registrations (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        company TEXT,
        date TEXT NOT NULL,
        ip TEXT,
        user_agent TEXT,
        ip_country TEXT,
        ip_region TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Columns added after the first deployment.
const EVOLVED_COLUMNS: [&str; 2] = [
    "ALTER TABLE registrations ADD COLUMN IF NOT EXISTS ip_country TEXT",
    "ALTER TABLE registrations ADD COLUMN IF NOT EXISTS ip_region TEXT",
];

/// Create the registrations table and backfill evolved columns.
pub async fn ensure(pool: &PgPool) -> Result<(), DbError> {
    tracing::debug!("Ensuring registrations schema");

    sqlx::query(CREATE_REGISTRATIONS).execute(pool).await?;

    for statement in EVOLVED_COLUMNS {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, connection::{select, EnvSnapshot}};

    #[test]
    fn ddl_is_idempotent() {
        assert!(CREATE_REGISTRATIONS.contains("CREATE TABLE IF NOT EXISTS"));
        for statement in EVOLVED_COLUMNS {
            assert!(statement.contains("ADD COLUMN IF NOT EXISTS"));
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_twice_and_concurrently() {
        let strategy = select(&EnvSnapshot::from_process()).expect("connection env required");
        let pool = create_pool(&strategy).expect("pool creation failed");

        ensure(&pool).await.expect("first ensure");
        ensure(&pool).await.expect("second ensure");

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { ensure(&pool).await })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task panicked").expect("concurrent ensure");
        }
    }
}
