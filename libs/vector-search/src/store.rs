use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::VectorSearchResult;
use crate::models::SearchHit;

/// Capability surface of a vector store backend
///
/// Every operation is a single stateless round trip; the only persistent
/// state lives inside the store. Callers hold the trait object, so
/// alternative backends slot in without touching call sites. Cancellation
/// and deadlines are the caller's: wrap a call in `tokio::time::timeout`
/// or drop the future — the store adds no timeout or retry policy of its
/// own.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the server-side index for this store's schema and algorithm.
    ///
    /// Not idempotent: recreating an existing index surfaces the store's
    /// error to the caller.
    async fn create_index(&self) -> VectorSearchResult<()>;

    /// Write a record: a vector of exactly the index dimensionality plus
    /// scalar properties.
    ///
    /// Writing to an existing key merges per field (last write wins,
    /// untouched fields remain).
    async fn add(
        &self,
        key: &str,
        vector: &[f32],
        properties: &HashMap<String, String>,
    ) -> VectorSearchResult<()>;

    /// Top-`k` nearest neighbors of `vector`, nearest first.
    ///
    /// A non-empty `tags` list pre-filters to records whose tag set
    /// intersects it. Each hit's property map carries only the
    /// `return_fields` that were present on the record; requested fields a
    /// record lacks are omitted, not an error.
    async fn search(
        &self,
        k: usize,
        vector: &[f32],
        return_fields: &[&str],
        tags: &[&str],
    ) -> VectorSearchResult<Vec<SearchHit>>;

    /// Delete the record stored under `key`. Deleting an absent key
    /// succeeds.
    async fn delete(&self, key: &str) -> VectorSearchResult<()>;
}
