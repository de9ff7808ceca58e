//! Vector-search client library for Redis-compatible stores
//!
//! This library wraps the RediSearch vector capability: it builds
//! index-creation commands, writes hash records carrying an embedded
//! float32 vector, runs K-nearest-neighbor queries with optional tag
//! filtering, and deletes records. The nearest-neighbor algorithm itself
//! (HNSW/FLAT) runs inside the store; this crate is the command/response
//! marshaling around it.
//!
//! # Features
//!
//! - `redis` (default) - Redis/RediSearch backend
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use vector_search::redis::{connect, RedisVectorSearch};
//! use vector_search::{FieldType, IndexAlgorithm, Schema, VectorStore};
//!
//! let conn = connect("redis://127.0.0.1:6379").await?;
//! let schema = Schema::new([
//!     ("title".to_string(), FieldType::Text),
//!     ("tags".to_string(), FieldType::Tag),
//! ]);
//! let store = RedisVectorSearch::new(conn, "articles", schema, IndexAlgorithm::Hnsw, 768)?;
//!
//! store.create_index().await?;
//! store.add("a", &embedding, &props).await?;
//! let hits = store.search(5, &query, &["title"], &["blue"]).await?;
//! ```

pub mod error;
pub mod models;
pub mod store;

// Backend implementations (conditional based on features)
#[cfg(feature = "redis")]
pub mod redis;

// Re-exports for convenience
pub use error::{VectorSearchError, VectorSearchResult};
pub use models::{FieldType, IndexAlgorithm, Schema, SearchHit};
pub use store::VectorStore;
