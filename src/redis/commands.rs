//! RedisTimeSeries commands as extension traits on redis connections
//!
//! [`TimeSeriesCommands`] is implemented for every blocking
//! `redis::ConnectionLike` and [`AsyncTimeSeriesCommands`] for every
//! `redis::aio::ConnectionLike`, the same way redis-rs provides
//! `Commands` and `AsyncCommands`. Each method:
//!
//! 1. builds the argument list ([`super::args`]), rejecting invalid
//!    combinations before anything is sent
//! 2. issues exactly one command on the connection
//! 3. decodes the reply ([`super::reply`])
//!
//! # Example
//!
//! ```rust,no_run
//! use redis_ts_client::redis::{AddOptions, CreateOptions, TimeSeriesCommands};
//! use redis_ts_client::types::Timestamp;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = redis::Client::open("redis://127.0.0.1/")?;
//! let mut con = client.get_connection()?;
//!
//! con.ts_create("temp:1", &CreateOptions::new().with_retention(5000))?;
//! con.ts_add("temp:1", Timestamp::Auto, 21.5, &AddOptions::new())?;
//! let latest = con.ts_get("temp:1")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::types::{CompactionRule, Sample, SeriesInfo, SeriesRange, SeriesSample, Timestamp};
use async_trait::async_trait;
use redis::{aio, ConnectionLike, Value};
use tracing::debug;

use super::args::{
    build_add_args, build_alter_args, build_create_args, build_create_rule_args,
    build_del_args, build_delete_rule_args, build_get_args, build_incr_decr_args,
    build_info_args, build_madd_args, build_mget_args, build_multi_range_args,
    build_query_index_args, build_range_args, AddOptions, AlterOptions, CreateOptions,
    IncrByOptions, MGetOptions, MultiRangeOptions, RangeOptions,
};
use super::protocol::command;
use super::reply::{
    parse_boolean, parse_info, parse_integer, parse_mget_reply, parse_mrange_reply,
    parse_optional_sample, parse_sample_array, parse_string_array, parse_timestamp,
    parse_timestamp_array,
};

fn log_command(name: &str, key: Option<&str>, args: &[String]) {
    match key {
        Some(key) => debug!("{} {} ({} args)", name, key, args.len()),
        None => debug!("{} ({} args)", name, args.len()),
    }
}

fn execute<C: ConnectionLike>(
    con: &mut C,
    name: &'static str,
    key: Option<&str>,
    args: &[String],
) -> Result<Value> {
    log_command(name, key, args);
    let reply: Value = redis::cmd(name).arg(args).query(con)?;
    Ok(reply)
}

async fn execute_async<C: aio::ConnectionLike + Send>(
    con: &mut C,
    name: &'static str,
    key: Option<&str>,
    args: &[String],
) -> Result<Value> {
    log_command(name, key, args);
    let reply: Value = redis::cmd(name).arg(args).query_async(con).await?;
    Ok(reply)
}

/// Blocking RedisTimeSeries commands
pub trait TimeSeriesCommands: ConnectionLike + Sized {
    /// TS.CREATE; true when the server acknowledged with OK
    fn ts_create(&mut self, key: &str, options: &CreateOptions) -> Result<bool> {
        let args = build_create_args(key, options);
        let reply = execute(self, command::CREATE, Some(key), &args)?;
        Ok(parse_boolean(&reply))
    }

    /// TS.ALTER
    fn ts_alter(&mut self, key: &str, options: &AlterOptions) -> Result<bool> {
        let args = build_alter_args(key, options);
        let reply = execute(self, command::ALTER, Some(key), &args)?;
        Ok(parse_boolean(&reply))
    }

    /// TS.ADD; returns the timestamp the server stored
    fn ts_add(
        &mut self,
        key: &str,
        timestamp: Timestamp,
        value: f64,
        options: &AddOptions,
    ) -> Result<Timestamp> {
        let args = build_add_args(key, timestamp, value, options);
        let reply = execute(self, command::ADD, Some(key), &args)?;
        Ok(parse_timestamp(&reply)?)
    }

    /// TS.MADD; one stored timestamp per input sample, in order
    fn ts_madd(&mut self, samples: &[(&str, Timestamp, f64)]) -> Result<Vec<Timestamp>> {
        let args = build_madd_args(samples)?;
        let reply = execute(self, command::MADD, None, &args)?;
        Ok(parse_timestamp_array(&reply)?)
    }

    /// TS.INCRBY
    fn ts_incrby(&mut self, key: &str, value: f64, options: &IncrByOptions) -> Result<Timestamp> {
        let args = build_incr_decr_args(key, value, options);
        let reply = execute(self, command::INCRBY, Some(key), &args)?;
        Ok(parse_timestamp(&reply)?)
    }

    /// TS.DECRBY
    fn ts_decrby(&mut self, key: &str, value: f64, options: &IncrByOptions) -> Result<Timestamp> {
        let args = build_incr_decr_args(key, value, options);
        let reply = execute(self, command::DECRBY, Some(key), &args)?;
        Ok(parse_timestamp(&reply)?)
    }

    /// TS.DEL; number of samples removed
    fn ts_del(&mut self, key: &str, from: Timestamp, to: Timestamp) -> Result<u64> {
        let args = build_del_args(key, from, to);
        let reply = execute(self, command::DEL, Some(key), &args)?;
        Ok(parse_integer(&reply)?)
    }

    /// TS.CREATERULE from `source_key` into `rule.dest_key`
    fn ts_create_rule(&mut self, source_key: &str, rule: &CompactionRule) -> Result<bool> {
        let args = build_create_rule_args(source_key, rule)?;
        let reply = execute(self, command::CREATERULE, Some(source_key), &args)?;
        Ok(parse_boolean(&reply))
    }

    /// TS.DELETERULE
    fn ts_delete_rule(&mut self, source_key: &str, dest_key: &str) -> Result<bool> {
        let args = build_delete_rule_args(source_key, dest_key);
        let reply = execute(self, command::DELETERULE, Some(source_key), &args)?;
        Ok(parse_boolean(&reply))
    }

    /// TS.GET; `None` for a series without samples
    fn ts_get(&mut self, key: &str) -> Result<Option<Sample>> {
        let args = build_get_args(key);
        let reply = execute(self, command::GET, Some(key), &args)?;
        Ok(parse_optional_sample(&reply)?)
    }

    /// TS.MGET
    fn ts_mget(&mut self, options: &MGetOptions) -> Result<Vec<SeriesSample>> {
        let args = build_mget_args(options)?;
        let reply = execute(self, command::MGET, None, &args)?;
        Ok(parse_mget_reply(&reply)?)
    }

    /// TS.RANGE
    fn ts_range(
        &mut self,
        key: &str,
        from: Timestamp,
        to: Timestamp,
        options: &RangeOptions,
    ) -> Result<Vec<Sample>> {
        let args = build_range_args(key, from, to, options)?;
        let reply = execute(self, command::RANGE, Some(key), &args)?;
        Ok(parse_sample_array(&reply)?)
    }

    /// TS.REVRANGE
    fn ts_revrange(
        &mut self,
        key: &str,
        from: Timestamp,
        to: Timestamp,
        options: &RangeOptions,
    ) -> Result<Vec<Sample>> {
        let args = build_range_args(key, from, to, options)?;
        let reply = execute(self, command::REVRANGE, Some(key), &args)?;
        Ok(parse_sample_array(&reply)?)
    }

    /// TS.MRANGE
    fn ts_mrange(
        &mut self,
        from: Timestamp,
        to: Timestamp,
        options: &MultiRangeOptions,
    ) -> Result<Vec<SeriesRange>> {
        let args = build_multi_range_args(command::MRANGE, from, to, options)?;
        let reply = execute(self, command::MRANGE, None, &args)?;
        Ok(parse_mrange_reply(&reply)?)
    }

    /// TS.MREVRANGE
    fn ts_mrevrange(
        &mut self,
        from: Timestamp,
        to: Timestamp,
        options: &MultiRangeOptions,
    ) -> Result<Vec<SeriesRange>> {
        let args = build_multi_range_args(command::MREVRANGE, from, to, options)?;
        let reply = execute(self, command::MREVRANGE, None, &args)?;
        Ok(parse_mrange_reply(&reply)?)
    }

    /// TS.INFO
    fn ts_info(&mut self, key: &str) -> Result<SeriesInfo> {
        let args = build_info_args(key);
        let reply = execute(self, command::INFO, Some(key), &args)?;
        Ok(parse_info(&reply)?)
    }

    /// TS.QUERYINDEX; keys of the series matching every filter
    fn ts_query_index(&mut self, filters: &[String]) -> Result<Vec<String>> {
        let args = build_query_index_args(filters)?;
        let reply = execute(self, command::QUERYINDEX, None, &args)?;
        Ok(parse_string_array(&reply)?)
    }
}

impl<T: ConnectionLike> TimeSeriesCommands for T {}

/// Async RedisTimeSeries commands
///
/// Same operations and semantics as [`TimeSeriesCommands`].
#[async_trait]
pub trait AsyncTimeSeriesCommands: aio::ConnectionLike + Send + Sized {
    /// TS.CREATE
    async fn ts_create(&mut self, key: &str, options: &CreateOptions) -> Result<bool> {
        let args = build_create_args(key, options);
        let reply = execute_async(self, command::CREATE, Some(key), &args).await?;
        Ok(parse_boolean(&reply))
    }

    /// TS.ALTER
    async fn ts_alter(&mut self, key: &str, options: &AlterOptions) -> Result<bool> {
        let args = build_alter_args(key, options);
        let reply = execute_async(self, command::ALTER, Some(key), &args).await?;
        Ok(parse_boolean(&reply))
    }

    /// TS.ADD
    async fn ts_add(
        &mut self,
        key: &str,
        timestamp: Timestamp,
        value: f64,
        options: &AddOptions,
    ) -> Result<Timestamp> {
        let args = build_add_args(key, timestamp, value, options);
        let reply = execute_async(self, command::ADD, Some(key), &args).await?;
        Ok(parse_timestamp(&reply)?)
    }

    /// TS.MADD
    async fn ts_madd(&mut self, samples: &[(&str, Timestamp, f64)]) -> Result<Vec<Timestamp>> {
        let args = build_madd_args(samples)?;
        let reply = execute_async(self, command::MADD, None, &args).await?;
        Ok(parse_timestamp_array(&reply)?)
    }

    /// TS.INCRBY
    async fn ts_incrby(
        &mut self,
        key: &str,
        value: f64,
        options: &IncrByOptions,
    ) -> Result<Timestamp> {
        let args = build_incr_decr_args(key, value, options);
        let reply = execute_async(self, command::INCRBY, Some(key), &args).await?;
        Ok(parse_timestamp(&reply)?)
    }

    /// TS.DECRBY
    async fn ts_decrby(
        &mut self,
        key: &str,
        value: f64,
        options: &IncrByOptions,
    ) -> Result<Timestamp> {
        let args = build_incr_decr_args(key, value, options);
        let reply = execute_async(self, command::DECRBY, Some(key), &args).await?;
        Ok(parse_timestamp(&reply)?)
    }

    /// TS.DEL
    async fn ts_del(&mut self, key: &str, from: Timestamp, to: Timestamp) -> Result<u64> {
        let args = build_del_args(key, from, to);
        let reply = execute_async(self, command::DEL, Some(key), &args).await?;
        Ok(parse_integer(&reply)?)
    }

    /// TS.CREATERULE
    async fn ts_create_rule(&mut self, source_key: &str, rule: &CompactionRule) -> Result<bool> {
        let args = build_create_rule_args(source_key, rule)?;
        let reply = execute_async(self, command::CREATERULE, Some(source_key), &args).await?;
        Ok(parse_boolean(&reply))
    }

    /// TS.DELETERULE
    async fn ts_delete_rule(&mut self, source_key: &str, dest_key: &str) -> Result<bool> {
        let args = build_delete_rule_args(source_key, dest_key);
        let reply = execute_async(self, command::DELETERULE, Some(source_key), &args).await?;
        Ok(parse_boolean(&reply))
    }

    /// TS.GET
    async fn ts_get(&mut self, key: &str) -> Result<Option<Sample>> {
        let args = build_get_args(key);
        let reply = execute_async(self, command::GET, Some(key), &args).await?;
        Ok(parse_optional_sample(&reply)?)
    }

    /// TS.MGET
    async fn ts_mget(&mut self, options: &MGetOptions) -> Result<Vec<SeriesSample>> {
        let args = build_mget_args(options)?;
        let reply = execute_async(self, command::MGET, None, &args).await?;
        Ok(parse_mget_reply(&reply)?)
    }

    /// TS.RANGE
    async fn ts_range(
        &mut self,
        key: &str,
        from: Timestamp,
        to: Timestamp,
        options: &RangeOptions,
    ) -> Result<Vec<Sample>> {
        let args = build_range_args(key, from, to, options)?;
        let reply = execute_async(self, command::RANGE, Some(key), &args).await?;
        Ok(parse_sample_array(&reply)?)
    }

    /// TS.REVRANGE
    async fn ts_revrange(
        &mut self,
        key: &str,
        from: Timestamp,
        to: Timestamp,
        options: &RangeOptions,
    ) -> Result<Vec<Sample>> {
        let args = build_range_args(key, from, to, options)?;
        let reply = execute_async(self, command::REVRANGE, Some(key), &args).await?;
        Ok(parse_sample_array(&reply)?)
    }

    /// TS.MRANGE
    async fn ts_mrange(
        &mut self,
        from: Timestamp,
        to: Timestamp,
        options: &MultiRangeOptions,
    ) -> Result<Vec<SeriesRange>> {
        let args = build_multi_range_args(command::MRANGE, from, to, options)?;
        let reply = execute_async(self, command::MRANGE, None, &args).await?;
        Ok(parse_mrange_reply(&reply)?)
    }

    /// TS.MREVRANGE
    async fn ts_mrevrange(
        &mut self,
        from: Timestamp,
        to: Timestamp,
        options: &MultiRangeOptions,
    ) -> Result<Vec<SeriesRange>> {
        let args = build_multi_range_args(command::MREVRANGE, from, to, options)?;
        let reply = execute_async(self, command::MREVRANGE, None, &args).await?;
        Ok(parse_mrange_reply(&reply)?)
    }

    /// TS.INFO
    async fn ts_info(&mut self, key: &str) -> Result<SeriesInfo> {
        let args = build_info_args(key);
        let reply = execute_async(self, command::INFO, Some(key), &args).await?;
        Ok(parse_info(&reply)?)
    }

    /// TS.QUERYINDEX
    async fn ts_query_index(&mut self, filters: &[String]) -> Result<Vec<String>> {
        let args = build_query_index_args(filters)?;
        let reply = execute_async(self, command::QUERYINDEX, None, &args).await?;
        Ok(parse_string_array(&reply)?)
    }
}

impl<T: aio::ConnectionLike + Send> AsyncTimeSeriesCommands for T {}
