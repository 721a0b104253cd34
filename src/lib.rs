//! redis-ts-client - Typed client bindings for the RedisTimeSeries module
//!
//! This library provides:
//! - Domain types for samples, labels, compaction rules and series metadata
//! - Validating argument builders for every `TS.*` command
//! - Reply parsers from `redis::Value` into those domain types
//! - Blocking and async command traits on any redis connection

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod operators;
pub mod types;

/// Client configuration with TOML support
pub mod config;

/// RedisTimeSeries argument building, reply parsing and commands
pub mod redis;

// Re-export main types
pub use config::ClientConfig;
pub use error::{Error, ParseError, Result, ValidationError};
pub use operators::{Aggregation, DuplicatePolicy, Reduce};
pub use self::redis::{AsyncTimeSeriesCommands, TimeSeriesClient, TimeSeriesCommands};
pub use types::{CompactionRule, Label, Sample, SeriesInfo, SeriesRange, SeriesSample, Timestamp};
