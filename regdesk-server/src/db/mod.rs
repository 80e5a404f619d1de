//! Database layer - connection selection, pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection strategy resolved once from the environment, then injected
//! - Pool connects lazily; nothing touches the network until the first query
//! - Schema changes are additive and idempotent (`IF NOT EXISTS`)

pub mod connection;
pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options, ping};
pub use repos::*;
