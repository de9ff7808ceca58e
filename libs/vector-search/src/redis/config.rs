#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// Redis connection settings for the vector store
///
/// Construct manually or load from environment variables (with the
/// `config` feature).
///
/// # Example
///
/// ```ignore
/// use vector_search::redis::{connect_from_config, RedisConfig};
///
/// let config = RedisConfig::new("redis://127.0.0.1:6379");
/// let conn = connect_from_config(&config).await?;
/// ```
#[derive(Clone, Debug)]
pub struct RedisConfig {
    /// Redis connection URL (required)
    pub url: String,

    /// Optional username for Redis ACL
    pub username: Option<String>,

    /// Optional password for authentication
    pub password: Option<String>,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_auth(
        url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username,
            password,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new("redis://127.0.0.1:6379")
    }
}

/// Load RedisConfig from environment variables
///
/// - `REDIS_URL` or `REDIS_HOST` (required) - connection string
/// - `REDIS_USERNAME` (optional)
/// - `REDIS_PASSWORD` (optional)
#[cfg(feature = "config")]
impl FromEnv for RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("REDIS_URL")
            .or_else(|_| std::env::var("REDIS_HOST"))
            .map_err(|_| ConfigError::MissingEnvVar("REDIS_URL or REDIS_HOST".to_string()))?;

        Ok(Self {
            url,
            username: std::env::var("REDIS_USERNAME").ok(),
            password: std::env::var("REDIS_PASSWORD").ok(),
        })
    }
}
