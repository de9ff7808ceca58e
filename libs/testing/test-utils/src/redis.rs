//! Redis Stack test infrastructure
//!
//! `TestSearchRedis` runs a Redis Stack container, which ships the search
//! module needed for `FT.*` commands.

use redis::Client;
use redis::aio::ConnectionManager;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::redis::RedisStack;

/// Test Redis Stack wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestSearchRedis;
///
/// # async fn example() {
/// let redis = TestSearchRedis::new().await;
/// let conn = redis.manager();
/// // Pass conn to RedisVectorSearch
/// # }
/// ```
pub struct TestSearchRedis {
    #[allow(dead_code)]
    container: ContainerAsync<RedisStack>,
    manager: ConnectionManager,
    pub connection_string: String,
}

impl TestSearchRedis {
    /// Start a Redis Stack container and connect to it
    pub async fn new() -> Self {
        let container = RedisStack::default()
            .start()
            .await
            .expect("Failed to start Redis Stack container");

        let host_port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let connection_string = format!("redis://127.0.0.1:{}", host_port);

        let client =
            Client::open(connection_string.clone()).expect("Failed to create Redis client");

        let manager = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!(port = host_port, "Test Redis Stack ready");

        Self {
            container,
            manager,
            connection_string,
        }
    }

    /// Get a cloned ConnectionManager (useful for passing to clients)
    pub fn manager(&self) -> ConnectionManager {
        self.manager.clone()
    }

    /// Get the connection string for manual client creation
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

// Container is cleaned up when TestSearchRedis is dropped
impl Drop for TestSearchRedis {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test Redis Stack container");
    }
}
