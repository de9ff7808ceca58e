//! Redis (RediSearch) vector-store backend
//!
//! Provides connection management, data-driven command construction, and
//! the [`RedisVectorSearch`] implementation of
//! [`VectorStore`](crate::store::VectorStore).

mod command;
mod config;
mod connector;
mod health;
mod search;

pub use command::{SCORE_FIELD, TAG_SEPARATOR, VECTOR_FIELD};
pub use config::RedisConfig;
pub use connector::{connect, connect_from_config};
pub use health::{check_health, index_exists};
pub use search::RedisVectorSearch;

// Re-export redis types for convenience
pub use redis::aio::ConnectionManager;
pub use redis::{Client, RedisResult};
