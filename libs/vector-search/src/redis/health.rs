use redis::aio::ConnectionManager;
use tracing::debug;

use crate::error::{VectorSearchError, VectorSearchResult};

/// Check Redis health with a PING round trip
///
/// Useful for readiness and liveness probes.
pub async fn check_health(conn: &mut ConnectionManager) -> VectorSearchResult<()> {
    debug!("Running Redis health check");

    let response: String = redis::cmd("PING").query_async(conn).await.map_err(|e| {
        VectorSearchError::HealthCheckFailed(format!("Redis health check failed: {e}"))
    })?;

    if response != "PONG" {
        return Err(VectorSearchError::HealthCheckFailed(format!(
            "Redis PING returned unexpected response: {response}"
        )));
    }

    debug!("Redis health check passed");
    Ok(())
}

/// Check whether a search index exists
///
/// Probes with `FT.INFO`; the store's unknown-index error maps to
/// `Ok(false)`, anything else propagates.
pub async fn index_exists(conn: &mut ConnectionManager, index: &str) -> VectorSearchResult<bool> {
    match redis::cmd("FT.INFO")
        .arg(index)
        .query_async::<redis::Value>(conn)
        .await
    {
        Ok(_) => Ok(true),
        Err(e) if is_unknown_index(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// RediSearch has reported this as "Unknown Index name" and, in newer
// versions, "no such index"
fn is_unknown_index(err: &redis::RedisError) -> bool {
    let message = err.to_string().to_lowercase();
    message.contains("unknown index") || message.contains("no such index")
}
