//! Closed enumerations of the RedisTimeSeries command grammar
//!
//! - **`Aggregation`**: bucket aggregators for AGGREGATION and compaction rules
//! - **`DuplicatePolicy`**: conflict resolution for DUPLICATE_POLICY / ON_DUPLICATE
//! - **`Reduce`**: reducers for GROUPBY ... REDUCE
//!
//! Each enum renders to its upper-case protocol token and parses it back.
//! Parsing ignores ASCII case because TS.INFO reports names in lower case.
//!
//! # Example
//!
//! ```rust
//! use redis_ts_client::operators::Aggregation;
//!
//! let agg: Aggregation = "std.p".parse().unwrap();
//! assert_eq!(agg, Aggregation::StdP);
//! assert_eq!(agg.as_str(), "STD.P");
//! ```

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregation applied to each time bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    /// Arithmetic mean
    Avg,
    /// Sum of values
    Sum,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Difference between max and min
    Range,
    /// Number of samples
    Count,
    /// First value in the bucket
    First,
    /// Last value in the bucket
    Last,
    /// Population standard deviation
    StdP,
    /// Sample standard deviation
    StdS,
    /// Population variance
    VarP,
    /// Sample variance
    VarS,
}

impl Aggregation {
    /// Every aggregation, in protocol documentation order
    pub const ALL: [Aggregation; 12] = [
        Aggregation::Avg,
        Aggregation::Sum,
        Aggregation::Min,
        Aggregation::Max,
        Aggregation::Range,
        Aggregation::Count,
        Aggregation::First,
        Aggregation::Last,
        Aggregation::StdP,
        Aggregation::StdS,
        Aggregation::VarP,
        Aggregation::VarS,
    ];

    /// Protocol token for this aggregation
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Avg => "AVG",
            Aggregation::Sum => "SUM",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
            Aggregation::Range => "RANGE",
            Aggregation::Count => "COUNT",
            Aggregation::First => "FIRST",
            Aggregation::Last => "LAST",
            Aggregation::StdP => "STD.P",
            Aggregation::StdS => "STD.S",
            Aggregation::VarP => "VAR.P",
            Aggregation::VarS => "VAR.S",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aggregation::ALL
            .iter()
            .copied()
            .find(|agg| agg.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownAggregation(s.to_string()))
    }
}

/// Policy applied when a sample arrives for an existing timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Reject the new sample
    Block,
    /// Keep the existing sample
    First,
    /// Overwrite with the new sample
    Last,
    /// Keep the smaller value
    Min,
    /// Keep the larger value
    Max,
    /// Add the new value to the existing one
    Sum,
}

impl DuplicatePolicy {
    /// Every duplicate policy
    pub const ALL: [DuplicatePolicy; 6] = [
        DuplicatePolicy::Block,
        DuplicatePolicy::First,
        DuplicatePolicy::Last,
        DuplicatePolicy::Min,
        DuplicatePolicy::Max,
        DuplicatePolicy::Sum,
    ];

    /// Protocol token for this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Block => "BLOCK",
            DuplicatePolicy::First => "FIRST",
            DuplicatePolicy::Last => "LAST",
            DuplicatePolicy::Min => "MIN",
            DuplicatePolicy::Max => "MAX",
            DuplicatePolicy::Sum => "SUM",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DuplicatePolicy::ALL
            .iter()
            .copied()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownDuplicatePolicy(s.to_string()))
    }
}

/// Reducer used to merge series sharing a GROUPBY label value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reduce {
    /// Sum of the grouped values
    Sum,
    /// Minimum of the grouped values
    Min,
    /// Maximum of the grouped values
    Max,
}

impl Reduce {
    /// Every reducer
    pub const ALL: [Reduce; 3] = [Reduce::Sum, Reduce::Min, Reduce::Max];

    /// Protocol token for this reducer
    pub fn as_str(&self) -> &'static str {
        match self {
            Reduce::Sum => "SUM",
            Reduce::Min => "MIN",
            Reduce::Max => "MAX",
        }
    }
}

impl fmt::Display for Reduce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reduce {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reduce::ALL
            .iter()
            .copied()
            .find(|reduce| reduce.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownReduce(s.to_string()))
    }
}
