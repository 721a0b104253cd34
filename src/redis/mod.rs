//! RedisTimeSeries bindings
//!
//! Typed access to the `TS.*` commands of the RedisTimeSeries module on top
//! of the `redis` crate.
//!
//! # Architecture
//!
//! ```text
//! typed parameters ──> args ──> Vec<String> ──> redis::Cmd ──> server
//!                                                                │
//! domain values    <── reply <── redis::Value <──────────────────┘
//! ```
//!
//! - `protocol`: command names and keyword tokens
//! - `args`: option structs and argument builders (pure, validating)
//! - `reply`: `redis::Value` to domain type parsers (pure)
//! - `commands`: blocking and async extension traits on redis connections
//! - `connection`: client construction from [`crate::config::ClientConfig`]
//!
//! # Example
//!
//! ```rust,no_run
//! use redis_ts_client::redis::{MultiRangeOptions, TimeSeriesClient, TimeSeriesCommands};
//! use redis_ts_client::types::Timestamp;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TimeSeriesClient::open("redis://localhost:6379")?;
//! let mut con = client.connection()?;
//!
//! let options = MultiRangeOptions::new(["area=32"]).with_labels();
//! for series in con.ts_mrange(Timestamp::Min, Timestamp::Max, &options)? {
//!     println!("{}: {} samples", series.key, series.samples.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod commands;
pub mod connection;
pub mod protocol;
pub mod reply;

// Re-export main types
pub use args::{
    AddOptions, AlterOptions, CreateOptions, IncrByOptions, MGetOptions, MultiRangeOptions,
    RangeOptions,
};
pub use commands::{AsyncTimeSeriesCommands, TimeSeriesCommands};
pub use connection::TimeSeriesClient;
