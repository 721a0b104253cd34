//! Connection helper for the time-series command traits
//!
//! [`TimeSeriesClient`] turns a [`ClientConfig`] into blocking or
//! multiplexed async connections. Both connection types implement the
//! redis `ConnectionLike` traits, so the `ts_*` methods are available on
//! them directly. There is no pooling and no retry: a failed command is
//! returned to the caller as is.
//!
//! # Example
//!
//! ```rust,no_run
//! use redis_ts_client::config::ClientConfig;
//! use redis_ts_client::redis::{AsyncTimeSeriesCommands, CreateOptions, TimeSeriesClient};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::with_url("redis://localhost:6379")
//!     .connection_timeout(Duration::from_secs(2));
//! let client = TimeSeriesClient::new(config)?;
//!
//! let mut con = client.async_connection().await?;
//! con.ts_create("temp:1", &CreateOptions::new().with_retention(5000)).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use redis::aio::MultiplexedConnection;
use redis::{Client, Connection};
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Factory for connections to a RedisTimeSeries server
#[derive(Debug, Clone)]
pub struct TimeSeriesClient {
    client: Client,
    config: ClientConfig,
}

impl TimeSeriesClient {
    /// Validate the config and create the client
    ///
    /// No connection is opened until [`connection`](Self::connection) or
    /// [`async_connection`](Self::async_connection) is called.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::open(config.url.as_str())
            .map_err(|e| connect_error(&config.url, e.category()))?;

        debug!("Time-series client created for {}", redacted_target(&config.url));
        Ok(Self { client, config })
    }

    /// Client for a URL with default timeouts
    pub fn open(url: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::with_url(url))
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open a blocking connection
    ///
    /// The connect timeout bounds the handshake; the command timeout is set
    /// as the socket read and write timeout.
    pub fn connection(&self) -> Result<Connection> {
        let start = Instant::now();

        let con = self
            .client
            .get_connection_with_timeout(self.config.connection_timeout_duration())
            .map_err(|e| connect_error(&self.config.url, e.category()))?;

        let command_timeout = Some(self.config.command_timeout_duration());
        con.set_read_timeout(command_timeout)?;
        con.set_write_timeout(command_timeout)?;

        debug!("Blocking connection established in {:?}", start.elapsed());
        Ok(con)
    }

    /// Open a multiplexed async connection
    ///
    /// The connection can be cloned and shared between tasks.
    pub async fn async_connection(&self) -> Result<MultiplexedConnection> {
        let start = Instant::now();
        let url = &self.config.url;

        let connect = self.client.get_multiplexed_async_connection();
        let con = tokio::time::timeout(self.config.connection_timeout_duration(), connect)
            .await
            .map_err(|_| connect_error(url, "connection timeout"))?
            .map_err(|e| connect_error(url, e.category()))?;

        debug!("Async connection established in {:?}", start.elapsed());
        Ok(con)
    }
}

/// `host:port` of a connection URL, never its credentials
fn redacted_target(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}:{}", host, parsed.port().unwrap_or(6379)),
            None => "[no-host]".to_string(),
        },
        Err(_) => "[invalid-url]".to_string(),
    }
}

/// Only the error category is reported; the full redis error text may echo
/// the URL.
fn connect_error(url: &str, detail: &str) -> Error {
    Error::Configuration(format!(
        "Time-series connection to {} failed: {}",
        redacted_target(url),
        detail
    ))
}
