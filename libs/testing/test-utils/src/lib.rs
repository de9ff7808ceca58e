//! Shared test utilities for vector-search testing
//!
//! - `TestSearchRedis`: Redis Stack container (search module included) with
//!   automatic cleanup
//! - `VectorDataBuilder`: deterministic test vector generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestSearchRedis, VectorDataBuilder};
//!
//! #[tokio::test]
//! async fn my_search_test() {
//!     let redis = TestSearchRedis::new().await;
//!     let conn = redis.manager();
//!
//!     let vectors = VectorDataBuilder::from_test_name("my_search_test");
//!     let embedding = vectors.vector(768, 0);
//! }
//! ```

mod redis;

pub use redis::TestSearchRedis;

/// Builder for test vectors with deterministic randomization
///
/// Seeded generation keeps tests reproducible: the same seed and salt
/// always produce the same vector.
pub struct VectorDataBuilder {
    seed: u64,
}

impl VectorDataBuilder {
    /// Create a new builder with an explicit seed
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from a test name (seed derived from the name's hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a vector of `dim` values in [0, 1)
    ///
    /// `salt` distinguishes multiple vectors inside one test.
    pub fn vector(&self, dim: usize, salt: u64) -> Vec<f32> {
        let mut state = self
            .seed
            .wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
            | 1;

        (0..dim)
            .map(|_| {
                // xorshift64
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state % 1_000_000) as f32 / 1_000_000.0
            })
            .collect()
    }

    /// Generate a unique index name for a test
    pub fn index_name(&self, prefix: &str) -> String {
        format!("test-{}-{}", prefix, self.seed)
    }
}
