use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use super::RedisConfig;

/// Connect to Redis and return a ConnectionManager
///
/// The ConnectionManager multiplexes concurrent commands over one
/// connection and transparently reconnects after failures, so one handle
/// can be shared by every vector-store call. The connection is verified
/// with a PING before it is handed out; connection failures are returned
/// verbatim, without retries.
///
/// # Arguments
/// * `url` - Redis connection string (e.g. "redis://127.0.0.1:6379")
///
/// # Example
/// ```ignore
/// use vector_search::redis::connect;
///
/// let conn = connect("redis://127.0.0.1:6379").await?;
/// ```
pub async fn connect(url: &str) -> redis::RedisResult<ConnectionManager> {
    info!("Attempting to connect to Redis at {}", url);

    let client = Client::open(url)?;
    let manager = ConnectionManager::new(client).await?;

    // Verify connection with PING
    let mut conn = manager.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    info!("Successfully connected to Redis");
    Ok(manager)
}

/// Connect using a RedisConfig
///
/// # Example
/// ```ignore
/// use vector_search::redis::{connect_from_config, RedisConfig};
///
/// let config = RedisConfig::new("redis://127.0.0.1:6379");
/// let conn = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &RedisConfig) -> redis::RedisResult<ConnectionManager> {
    connect(&config.url).await
}
