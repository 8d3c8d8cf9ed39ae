use crate::error::Result;
use redis::aio::ConnectionManager;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const REDIS_PORT: u16 = 6379;

/// Configuration for a single Redis test container.
///
/// ```rust
/// use zoorl_test_infra::redis::RedisConfig;
///
/// let config = RedisConfig::builder().tag("7.4".to_string()).build();
/// assert_eq!(config.image, "redis");
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisConfig {
    /// Docker image name.
    #[builder(default = "redis".to_string())]
    pub image: String,

    /// Docker image tag.
    #[builder(default = "8.6.0".to_string())]
    pub tag: String,

    /// Grace period after the ready message before handing out connections.
    #[builder(default = Duration::from_millis(200))]
    pub settle: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A standalone Redis server running in a container.
///
/// The container is stopped when this value is dropped.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
}

impl RedisServer {
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let container = GenericImage::new(config.image, config.tag)
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await?;

        tokio::time::sleep(config.settle).await;

        Ok(Self { container })
    }

    pub async fn host(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();

        Ok(match host.as_str() {
            "localhost" => String::from("127.0.0.1"),
            _ => host,
        })
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(REDIS_PORT).await?)
    }

    /// Connection URL, e.g. `redis://127.0.0.1:32768`.
    pub async fn url(&self) -> Result<String> {
        Ok(format!("redis://{}:{}", self.host().await?, self.port().await?))
    }

    /// Opens a fresh managed connection to the server.
    pub async fn connection(&self) -> Result<ConnectionManager> {
        let client = redis::Client::open(self.url().await?)?;
        Ok(ConnectionManager::new(client).await?)
    }
}
