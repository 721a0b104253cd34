//! Domain values exchanged with RedisTimeSeries
//!
//! # Key Types
//!
//! - **`Timestamp`**: millisecond epoch value or one of the `-`, `+`, `*` sentinels
//! - **`Sample`**: a single (timestamp, value) point
//! - **`Label`**: key/value metadata attached to a series
//! - **`CompactionRule`**: destination, bucket duration and aggregation of a rule
//! - **`SeriesInfo`**: snapshot returned by TS.INFO
//! - **`SeriesSample`** / **`SeriesRange`**: rows of TS.MGET and TS.MRANGE replies
//!
//! All values are immutable and own no connection.
//!
//! # Example
//!
//! ```rust
//! use redis_ts_client::types::{Label, Sample, Timestamp};
//!
//! let ts: Timestamp = "1700000000000".parse().unwrap();
//! let sample = Sample::new(ts, 42.5);
//! assert_eq!(sample.time.to_string(), "1700000000000");
//!
//! assert_eq!(Timestamp::Auto.to_string(), "*");
//! let label = Label::new("host", "server1");
//! assert_eq!(label.key, "host");
//! ```

use crate::error::ValidationError;
use crate::operators::{Aggregation, DuplicatePolicy};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A point in time as understood by the RedisTimeSeries grammar
///
/// Either an absolute millisecond epoch value or one of the protocol
/// sentinels. `Timestamp::Value(0)` is a real timestamp; an absent
/// timestamp is expressed with `Option<Timestamp>`.
///
/// # Ordering
///
/// Values compare numerically, `Min` sorts below every value and `Max`
/// above. `Auto` is resolved by the server and only compares equal to
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch
    Value(u64),
    /// Earliest sample of the series (`-`)
    Min,
    /// Latest sample of the series (`+`)
    Max,
    /// Server clock at insertion time (`*`)
    Auto,
}

impl Timestamp {
    /// Current wall-clock time in milliseconds
    pub fn now() -> Self {
        Utc::now().into()
    }

    /// Parse a date/time string with a `chrono` format string
    ///
    /// The parsed time is interpreted as UTC. A format that only carries a
    /// date resolves to midnight of that day.
    ///
    /// # Example
    ///
    /// ```rust
    /// use redis_ts_client::types::Timestamp;
    ///
    /// let ts = Timestamp::parse_from_str("2021-01-01 00:00:01", "%Y-%m-%d %H:%M:%S").unwrap();
    /// assert_eq!(ts, Timestamp::Value(1_609_459_201_000));
    /// ```
    pub fn parse_from_str(input: &str, format: &str) -> Result<Self, ValidationError> {
        let naive = NaiveDateTime::parse_from_str(input, format)
            .or_else(|_| {
                NaiveDate::parse_from_str(input, format)
                    .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
            })
            .map_err(|e| ValidationError::InvalidTimestamp(format!("{}: {}", input, e)))?;

        let millis = Utc.from_utc_datetime(&naive).timestamp_millis();
        u64::try_from(millis)
            .map(Timestamp::Value)
            .map_err(|_| ValidationError::InvalidTimestamp(format!("{} is before 1970", input)))
    }

    /// Numeric value, `None` for sentinels
    pub fn value(&self) -> Option<u64> {
        match self {
            Timestamp::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// True for `-`, `+` and `*`
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Timestamp::Value(_))
    }

    fn rank(&self) -> Option<(u8, u64)> {
        match self {
            Timestamp::Min => Some((0, 0)),
            Timestamp::Value(v) => Some((1, *v)),
            Timestamp::Max => Some((2, 0)),
            Timestamp::Auto => None,
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Value(0)
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Timestamp::Auto, Timestamp::Auto) => Some(Ordering::Equal),
            _ => Some(self.rank()?.cmp(&other.rank()?)),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Value(v) => write!(f, "{}", v),
            Timestamp::Min => f.write_str("-"),
            Timestamp::Max => f.write_str("+"),
            Timestamp::Auto => f.write_str("*"),
        }
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Timestamp::Min),
            "+" => Ok(Timestamp::Max),
            "*" => Ok(Timestamp::Auto),
            _ => s
                .parse::<u64>()
                .map(Timestamp::Value)
                .map_err(|_| ValidationError::InvalidTimestamp(s.to_string())),
        }
    }
}

impl From<u64> for Timestamp {
    fn from(millis: u64) -> Self {
        Timestamp::Value(millis)
    }
}

impl From<SystemTime> for Timestamp {
    /// Times before the epoch saturate to zero
    fn from(time: SystemTime) -> Self {
        let millis = time
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Timestamp::Value(millis)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    /// Times before the epoch saturate to zero
    fn from(time: DateTime<Utc>) -> Self {
        Timestamp::Value(time.timestamp_millis().max(0) as u64)
    }
}

/// A single (timestamp, value) point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample time
    pub time: Timestamp,
    /// Sample value
    pub value: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(time: impl Into<Timestamp>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

/// Key/value metadata tag attached to a series
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Label name
    pub key: String,
    /// Label value
    pub value: String,
}

impl Label {
    /// Create a new label
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Compaction rule from a source series into `dest_key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionRule {
    /// Destination series key
    pub dest_key: String,
    /// Bucket duration in milliseconds
    pub time_bucket: u64,
    /// Aggregation applied per bucket
    pub aggregation: Option<Aggregation>,
}

impl CompactionRule {
    /// Create a new rule targeting `dest_key`
    pub fn new(
        dest_key: impl Into<String>,
        time_bucket: u64,
        aggregation: Option<Aggregation>,
    ) -> Self {
        Self {
            dest_key: dest_key.into(),
            time_bucket,
            aggregation,
        }
    }
}

/// Snapshot of a series as reported by TS.INFO
///
/// Fields the server did not report keep their default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    /// Number of samples in the series
    pub total_samples: u64,
    /// Memory used by the series in bytes
    pub memory_usage: u64,
    /// Timestamp of the oldest sample
    pub first_timestamp: Timestamp,
    /// Timestamp of the newest sample
    pub last_timestamp: Timestamp,
    /// Retention period in milliseconds (0 = unlimited)
    pub retention_time: u64,
    /// Number of memory chunks
    pub chunk_count: u64,
    /// Chunk size in bytes
    pub chunk_size: u64,
    /// Labels attached to the series
    pub labels: Vec<Label>,
    /// Source series when this series is a compaction destination
    pub source_key: Option<String>,
    /// Compaction rules with this series as source
    pub rules: Vec<CompactionRule>,
    /// Per-series duplicate policy, `None` when the server default applies
    pub duplicate_policy: Option<DuplicatePolicy>,
}

impl SeriesInfo {
    /// Look up a label value by key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.key == key)
            .map(|label| label.value.as_str())
    }
}

/// One row of a TS.MGET reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    /// Series key
    pub key: String,
    /// Labels returned for the series (empty unless requested)
    pub labels: Vec<Label>,
    /// Latest sample, `None` for an empty series
    pub sample: Option<Sample>,
}

/// One row of a TS.MRANGE / TS.MREVRANGE reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRange {
    /// Series key (or group name with GROUPBY)
    pub key: String,
    /// Labels returned for the series (empty unless requested)
    pub labels: Vec<Label>,
    /// Samples in reply order
    pub samples: Vec<Sample>,
}
