use thiserror::Error;

/// Unified error type for all vector-store operations
///
/// Configuration problems (bad algorithm name, zero dimensionality,
/// mismatched vector length) are caught before any network call; store and
/// protocol errors are reported verbatim with no local interpretation.
#[derive(Debug, Error)]
pub enum VectorSearchError {
    /// Redis-specific errors (connection, command, protocol)
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Algorithm name did not parse to a supported index algorithm
    #[error("Unsupported index algorithm: '{0}'")]
    UnsupportedAlgorithm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Vector length does not match the index dimensionality
    #[error("Vector has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Invalid query parameter
    #[error("Invalid query: {0}")]
    Query(String),

    /// Search reply did not have the expected shape
    #[error("Failed to decode search reply: {0}")]
    Decode(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for vector-store operations
pub type VectorSearchResult<T> = Result<T, VectorSearchError>;
