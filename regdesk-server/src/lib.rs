//! regdesk-server: registration intake and CSV export over HTTP
//!
//! Two handlers share one connection selector:
//! - `POST /api/submit` validates and stores a registration
//! - `GET /api/export` returns every registration as CSV, newest first

pub mod db;
pub mod export;
pub mod http;
pub mod models;
pub mod render_csv;

pub use db::connection::{select, ConfigError, ConnectionStrategy, EnvSnapshot};
pub use db::create_pool;
pub use http::{run_server, ServerConfig};
pub use sqlx::PgPool;
