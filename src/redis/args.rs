//! Argument builders for RedisTimeSeries commands
//!
//! Every builder is a pure function from typed parameters to the ordered
//! token list the command grammar expects, without the command name itself.
//! Optional parameters that are unset never appear in the output, and
//! invalid parameter combinations are rejected before anything is sent.
//!
//! # Example
//!
//! ```rust
//! use redis_ts_client::redis::args::{build_create_args, CreateOptions};
//! use redis_ts_client::operators::DuplicatePolicy;
//!
//! let options = CreateOptions::new()
//!     .with_retention(5000)
//!     .with_label("sensor", "t1")
//!     .with_duplicate_policy(DuplicatePolicy::Last);
//!
//! assert_eq!(
//!     build_create_args("temp:1", &options),
//!     vec!["temp:1", "RETENTION", "5000", "LABELS", "sensor", "t1", "DUPLICATE_POLICY", "LAST"]
//! );
//! ```

use crate::error::ValidationError;
use crate::operators::{Aggregation, DuplicatePolicy, Reduce};
use crate::types::{CompactionRule, Label, Timestamp};

use super::protocol::{command, keyword};

/// Options for TS.CREATE
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    /// Maximum sample age in milliseconds
    pub retention: Option<u64>,
    /// Labels attached to the new series
    pub labels: Vec<Label>,
    /// Store samples without compression
    pub uncompressed: bool,
    /// Chunk size in bytes
    pub chunk_size: Option<u64>,
    /// Policy for samples with an existing timestamp
    pub duplicate_policy: Option<DuplicatePolicy>,
}

impl CreateOptions {
    /// Create empty options (server defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention period in milliseconds
    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention = Some(retention_ms);
        self
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(Label::new(key, value));
        self
    }

    /// Add several labels
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels.extend(labels);
        self
    }

    /// Disable compression
    pub fn uncompressed(mut self) -> Self {
        self.uncompressed = true;
        self
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }
}

/// Options for TS.ALTER
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterOptions {
    /// New retention period in milliseconds
    pub retention: Option<u64>,
    /// New chunk size in bytes
    pub chunk_size: Option<u64>,
    /// Replacement label set
    pub labels: Vec<Label>,
    /// New duplicate policy
    pub duplicate_policy: Option<DuplicatePolicy>,
}

impl AlterOptions {
    /// Create empty options (nothing altered)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention period in milliseconds
    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention = Some(retention_ms);
        self
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(Label::new(key, value));
        self
    }

    /// Set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }
}

/// Options for TS.ADD
///
/// Retention, labels, compression and chunk size only take effect when the
/// series is created implicitly by the add.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddOptions {
    /// Retention period in milliseconds
    pub retention: Option<u64>,
    /// Labels for an implicitly created series
    pub labels: Vec<Label>,
    /// Store samples without compression
    pub uncompressed: bool,
    /// Chunk size in bytes
    pub chunk_size: Option<u64>,
    /// Override of the duplicate policy for this sample
    pub on_duplicate: Option<DuplicatePolicy>,
}

impl AddOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention period in milliseconds
    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention = Some(retention_ms);
        self
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(Label::new(key, value));
        self
    }

    /// Disable compression
    pub fn uncompressed(mut self) -> Self {
        self.uncompressed = true;
        self
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Override the duplicate policy for this sample
    pub fn with_on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = Some(policy);
        self
    }
}

/// Options for TS.INCRBY and TS.DECRBY
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncrByOptions {
    /// Sample timestamp, server time when unset
    pub timestamp: Option<Timestamp>,
    /// Retention period in milliseconds
    pub retention: Option<u64>,
    /// Labels for an implicitly created series
    pub labels: Vec<Label>,
    /// Store samples without compression
    pub uncompressed: bool,
    /// Chunk size in bytes
    pub chunk_size: Option<u64>,
}

impl IncrByOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set the retention period in milliseconds
    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention = Some(retention_ms);
        self
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(Label::new(key, value));
        self
    }

    /// Disable compression
    pub fn uncompressed(mut self) -> Self {
        self.uncompressed = true;
        self
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }
}

/// Options for TS.RANGE and TS.REVRANGE
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeOptions {
    /// Maximum number of samples returned
    pub count: Option<u64>,
    /// Aggregation per time bucket
    pub aggregation: Option<Aggregation>,
    /// Bucket duration in milliseconds, required with `aggregation`
    pub time_bucket: Option<u64>,
    /// Only return samples at these timestamps
    pub filter_by_ts: Vec<Timestamp>,
    /// Only return samples with `min <= value <= max`
    pub filter_by_value: Option<(f64, f64)>,
    /// Bucket alignment
    pub align: Option<Timestamp>,
}

impl RangeOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of samples
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Aggregate samples into buckets of `time_bucket` milliseconds
    pub fn with_aggregation(mut self, aggregation: Aggregation, time_bucket: u64) -> Self {
        self.aggregation = Some(aggregation);
        self.time_bucket = Some(time_bucket);
        self
    }

    /// Keep only samples at the given timestamps
    pub fn with_filter_by_ts(mut self, timestamps: impl IntoIterator<Item = Timestamp>) -> Self {
        self.filter_by_ts.extend(timestamps);
        self
    }

    /// Keep only samples within `[min, max]`
    pub fn with_filter_by_value(mut self, min: f64, max: f64) -> Self {
        self.filter_by_value = Some((min, max));
        self
    }

    /// Align buckets to `align`
    pub fn with_align(mut self, align: impl Into<Timestamp>) -> Self {
        self.align = Some(align.into());
        self
    }
}

/// Options for TS.MRANGE and TS.MREVRANGE
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiRangeOptions {
    /// Label filter expressions, at least one required
    pub filters: Vec<String>,
    /// Maximum number of samples per series
    pub count: Option<u64>,
    /// Aggregation per time bucket
    pub aggregation: Option<Aggregation>,
    /// Bucket duration in milliseconds, required with `aggregation`
    pub time_bucket: Option<u64>,
    /// Return every label of each series
    pub with_labels: bool,
    /// Return only these labels of each series
    pub selected_labels: Vec<String>,
    /// Group series by a label and merge them with a reducer
    pub group_by: Option<(String, Reduce)>,
    /// Only return samples at these timestamps
    pub filter_by_ts: Vec<Timestamp>,
    /// Only return samples with `min <= value <= max`
    pub filter_by_value: Option<(f64, f64)>,
    /// Bucket alignment
    pub align: Option<Timestamp>,
}

impl MultiRangeOptions {
    /// Create options with the given filter expressions
    pub fn new<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filters: filters.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Limit the number of samples per series
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Aggregate samples into buckets of `time_bucket` milliseconds
    pub fn with_aggregation(mut self, aggregation: Aggregation, time_bucket: u64) -> Self {
        self.aggregation = Some(aggregation);
        self.time_bucket = Some(time_bucket);
        self
    }

    /// Return every label of each series
    pub fn with_labels(mut self) -> Self {
        self.with_labels = true;
        self
    }

    /// Return only the named labels of each series
    pub fn with_selected_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_labels
            .extend(labels.into_iter().map(Into::into));
        self
    }

    /// Group by `label` and merge each group with `reduce`
    pub fn with_group_by(mut self, label: impl Into<String>, reduce: Reduce) -> Self {
        self.group_by = Some((label.into(), reduce));
        self
    }

    /// Keep only samples at the given timestamps
    pub fn with_filter_by_ts(mut self, timestamps: impl IntoIterator<Item = Timestamp>) -> Self {
        self.filter_by_ts.extend(timestamps);
        self
    }

    /// Keep only samples within `[min, max]`
    pub fn with_filter_by_value(mut self, min: f64, max: f64) -> Self {
        self.filter_by_value = Some((min, max));
        self
    }

    /// Align buckets to `align`
    pub fn with_align(mut self, align: impl Into<Timestamp>) -> Self {
        self.align = Some(align.into());
        self
    }
}

/// Options for TS.MGET
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MGetOptions {
    /// Label filter expressions, at least one required
    pub filters: Vec<String>,
    /// Return every label of each series
    pub with_labels: bool,
    /// Return only these labels of each series
    pub selected_labels: Vec<String>,
}

impl MGetOptions {
    /// Create options with the given filter expressions
    pub fn new<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filters: filters.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Return every label of each series
    pub fn with_labels(mut self) -> Self {
        self.with_labels = true;
        self
    }

    /// Return only the named labels of each series
    pub fn with_selected_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_labels
            .extend(labels.into_iter().map(Into::into));
        self
    }
}

// =============================================================================
// Token helpers
// =============================================================================

fn format_value(value: f64) -> String {
    value.to_string()
}

fn push_retention(args: &mut Vec<String>, retention: Option<u64>) {
    if let Some(retention) = retention {
        args.push(keyword::RETENTION.to_string());
        args.push(retention.to_string());
    }
}

fn push_chunk_size(args: &mut Vec<String>, chunk_size: Option<u64>) {
    if let Some(bytes) = chunk_size {
        args.push(keyword::CHUNK_SIZE.to_string());
        args.push(bytes.to_string());
    }
}

fn push_labels(args: &mut Vec<String>, labels: &[Label]) {
    if labels.is_empty() {
        return;
    }
    args.push(keyword::LABELS.to_string());
    for label in labels {
        args.push(label.key.clone());
        args.push(label.value.clone());
    }
}

fn push_uncompressed(args: &mut Vec<String>, uncompressed: bool) {
    if uncompressed {
        args.push(keyword::UNCOMPRESSED.to_string());
    }
}

fn push_policy(args: &mut Vec<String>, token: &str, policy: Option<DuplicatePolicy>) {
    if let Some(policy) = policy {
        args.push(token.to_string());
        args.push(policy.as_str().to_string());
    }
}

fn push_count(args: &mut Vec<String>, count: Option<u64>) {
    if let Some(count) = count {
        args.push(keyword::COUNT.to_string());
        args.push(count.to_string());
    }
}

fn push_align(args: &mut Vec<String>, align: Option<Timestamp>) {
    if let Some(align) = align {
        args.push(keyword::ALIGN.to_string());
        args.push(align.to_string());
    }
}

fn push_timestamp(args: &mut Vec<String>, timestamp: Option<Timestamp>) {
    if let Some(timestamp) = timestamp {
        args.push(keyword::TIMESTAMP.to_string());
        args.push(timestamp.to_string());
    }
}

fn push_aggregation(
    args: &mut Vec<String>,
    aggregation: Option<Aggregation>,
    time_bucket: Option<u64>,
) -> Result<(), ValidationError> {
    if let Some(aggregation) = aggregation {
        let bucket = time_bucket.ok_or(ValidationError::MissingTimeBucket)?;
        args.push(keyword::AGGREGATION.to_string());
        args.push(aggregation.as_str().to_string());
        args.push(bucket.to_string());
    }
    Ok(())
}

fn push_filters(
    args: &mut Vec<String>,
    command: &'static str,
    filters: &[String],
) -> Result<(), ValidationError> {
    if filters.is_empty() {
        return Err(ValidationError::MissingFilter { command });
    }
    args.push(keyword::FILTER.to_string());
    args.extend(filters.iter().cloned());
    Ok(())
}

fn push_filter_by_ts(args: &mut Vec<String>, timestamps: &[Timestamp]) {
    if timestamps.is_empty() {
        return;
    }
    args.push(keyword::FILTER_BY_TS.to_string());
    args.extend(timestamps.iter().map(Timestamp::to_string));
}

fn push_filter_by_value(args: &mut Vec<String>, range: Option<(f64, f64)>) {
    if let Some((min, max)) = range {
        args.push(keyword::FILTER_BY_VALUE.to_string());
        args.push(format_value(min));
        args.push(format_value(max));
    }
}

fn push_label_selection(
    args: &mut Vec<String>,
    with_labels: bool,
    selected_labels: &[String],
) -> Result<(), ValidationError> {
    if with_labels && !selected_labels.is_empty() {
        return Err(ValidationError::ConflictingLabelOptions);
    }
    if with_labels {
        args.push(keyword::WITHLABELS.to_string());
    }
    if !selected_labels.is_empty() {
        args.push(keyword::SELECTED_LABELS.to_string());
        args.extend(selected_labels.iter().cloned());
    }
    Ok(())
}

fn push_group_by(args: &mut Vec<String>, group_by: Option<&(String, Reduce)>) {
    if let Some((label, reduce)) = group_by {
        args.push(keyword::GROUPBY.to_string());
        args.push(label.clone());
        args.push(keyword::REDUCE.to_string());
        args.push(reduce.as_str().to_string());
    }
}

// =============================================================================
// Builders
// =============================================================================

/// `key [RETENTION] [CHUNK_SIZE] [LABELS ...] [UNCOMPRESSED] [DUPLICATE_POLICY]`
pub fn build_create_args(key: &str, options: &CreateOptions) -> Vec<String> {
    let mut args = vec![key.to_string()];
    push_retention(&mut args, options.retention);
    push_chunk_size(&mut args, options.chunk_size);
    push_labels(&mut args, &options.labels);
    push_uncompressed(&mut args, options.uncompressed);
    push_policy(&mut args, keyword::DUPLICATE_POLICY, options.duplicate_policy);
    args
}

/// `key [RETENTION] [CHUNK_SIZE] [LABELS ...] [DUPLICATE_POLICY]`
pub fn build_alter_args(key: &str, options: &AlterOptions) -> Vec<String> {
    let mut args = vec![key.to_string()];
    push_retention(&mut args, options.retention);
    push_chunk_size(&mut args, options.chunk_size);
    push_labels(&mut args, &options.labels);
    push_policy(&mut args, keyword::DUPLICATE_POLICY, options.duplicate_policy);
    args
}

/// `key timestamp value [RETENTION] [CHUNK_SIZE] [LABELS ...] [UNCOMPRESSED] [ON_DUPLICATE]`
pub fn build_add_args(
    key: &str,
    timestamp: Timestamp,
    value: f64,
    options: &AddOptions,
) -> Vec<String> {
    let mut args = vec![key.to_string(), timestamp.to_string(), format_value(value)];
    push_retention(&mut args, options.retention);
    push_chunk_size(&mut args, options.chunk_size);
    push_labels(&mut args, &options.labels);
    push_uncompressed(&mut args, options.uncompressed);
    push_policy(&mut args, keyword::ON_DUPLICATE, options.on_duplicate);
    args
}

/// `(key timestamp value)+`
pub fn build_madd_args(samples: &[(&str, Timestamp, f64)]) -> Result<Vec<String>, ValidationError> {
    if samples.is_empty() {
        return Err(ValidationError::EmptySequence {
            command: command::MADD,
        });
    }
    let mut args = Vec::with_capacity(samples.len() * 3);
    for (key, timestamp, value) in samples {
        args.push(key.to_string());
        args.push(timestamp.to_string());
        args.push(format_value(*value));
    }
    Ok(args)
}

/// `key value [TIMESTAMP] [RETENTION] [CHUNK_SIZE] [LABELS ...] [UNCOMPRESSED]`
pub fn build_incr_decr_args(key: &str, value: f64, options: &IncrByOptions) -> Vec<String> {
    let mut args = vec![key.to_string(), format_value(value)];
    push_timestamp(&mut args, options.timestamp);
    push_retention(&mut args, options.retention);
    push_chunk_size(&mut args, options.chunk_size);
    push_labels(&mut args, &options.labels);
    push_uncompressed(&mut args, options.uncompressed);
    args
}

/// `key from to`
pub fn build_del_args(key: &str, from: Timestamp, to: Timestamp) -> Vec<String> {
    vec![key.to_string(), from.to_string(), to.to_string()]
}

/// `source dest AGGREGATION agg bucket`
///
/// A rule read back from TS.INFO may lack an aggregation; such a rule
/// cannot be created.
pub fn build_create_rule_args(
    source_key: &str,
    rule: &CompactionRule,
) -> Result<Vec<String>, ValidationError> {
    let aggregation = rule.aggregation.ok_or(ValidationError::MissingAggregation)?;
    Ok(vec![
        source_key.to_string(),
        rule.dest_key.clone(),
        keyword::AGGREGATION.to_string(),
        aggregation.as_str().to_string(),
        rule.time_bucket.to_string(),
    ])
}

/// `source dest`
pub fn build_delete_rule_args(source_key: &str, dest_key: &str) -> Vec<String> {
    vec![source_key.to_string(), dest_key.to_string()]
}

/// `key`
pub fn build_get_args(key: &str) -> Vec<String> {
    vec![key.to_string()]
}

/// `key`
pub fn build_info_args(key: &str) -> Vec<String> {
    vec![key.to_string()]
}

/// `[WITHLABELS | SELECTED_LABELS ...] FILTER ...`
pub fn build_mget_args(options: &MGetOptions) -> Result<Vec<String>, ValidationError> {
    let mut args = Vec::new();
    push_label_selection(&mut args, options.with_labels, &options.selected_labels)?;
    push_filters(&mut args, command::MGET, &options.filters)?;
    Ok(args)
}

/// `key from to [FILTER_BY_TS ...] [FILTER_BY_VALUE] [COUNT] [ALIGN] [AGGREGATION]`
pub fn build_range_args(
    key: &str,
    from: Timestamp,
    to: Timestamp,
    options: &RangeOptions,
) -> Result<Vec<String>, ValidationError> {
    let mut args = vec![key.to_string(), from.to_string(), to.to_string()];
    push_filter_by_ts(&mut args, &options.filter_by_ts);
    push_filter_by_value(&mut args, options.filter_by_value);
    push_count(&mut args, options.count);
    push_align(&mut args, options.align);
    push_aggregation(&mut args, options.aggregation, options.time_bucket)?;
    Ok(args)
}

/// `from to [FILTER_BY_TS ...] [FILTER_BY_VALUE] [COUNT] [ALIGN] [AGGREGATION]
/// [WITHLABELS | SELECTED_LABELS ...] FILTER ... [GROUPBY label REDUCE r]`
///
/// `command` names the caller (TS.MRANGE or TS.MREVRANGE) in validation
/// errors.
pub fn build_multi_range_args(
    command: &'static str,
    from: Timestamp,
    to: Timestamp,
    options: &MultiRangeOptions,
) -> Result<Vec<String>, ValidationError> {
    let mut args = vec![from.to_string(), to.to_string()];
    push_filter_by_ts(&mut args, &options.filter_by_ts);
    push_filter_by_value(&mut args, options.filter_by_value);
    push_count(&mut args, options.count);
    push_align(&mut args, options.align);
    push_aggregation(&mut args, options.aggregation, options.time_bucket)?;
    push_label_selection(&mut args, options.with_labels, &options.selected_labels)?;
    push_filters(&mut args, command, &options.filters)?;
    push_group_by(&mut args, options.group_by.as_ref());
    Ok(args)
}

/// `filter ...`
pub fn build_query_index_args(filters: &[String]) -> Result<Vec<String>, ValidationError> {
    if filters.is_empty() {
        return Err(ValidationError::MissingFilter {
            command: command::QUERYINDEX,
        });
    }
    Ok(filters.to_vec())
}
