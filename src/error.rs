//! Error types for the time-series client

use thiserror::Error;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    /// Arguments were rejected before any command was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reply did not have the shape or content the command expects
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error reported by the underlying Redis client or server
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Configuration or connection setup error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True for errors raised while building arguments
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// True for errors raised while decoding a reply
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

/// Validation errors
///
/// Raised by the argument builders when a required parameter is missing or
/// two parameters are mutually exclusive. Always fixable by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Multi-series command issued without a filter expression
    #[error("{command} needs at least one filter")]
    MissingFilter {
        /// Command the filter list belongs to
        command: &'static str,
    },

    /// Aggregation requested without a time bucket
    #[error("AGGREGATION requires a time bucket")]
    MissingTimeBucket,

    /// Compaction rule without an aggregation type
    #[error("TS.CREATERULE requires an aggregation type")]
    MissingAggregation,

    /// WITHLABELS and SELECTED_LABELS requested together
    #[error("WITHLABELS and SELECTED_LABELS cannot be specified together")]
    ConflictingLabelOptions,

    /// Batch command issued with nothing to send
    #[error("{command} needs at least one element")]
    EmptySequence {
        /// Command the sequence belongs to
        command: &'static str,
    },

    /// Timestamp text is neither a number nor one of `-`, `+`, `*`
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Reply parse errors
///
/// These signal a version mismatch between this client and the server or
/// the underlying Redis library, and are not recoverable locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Reply has the wrong RESP type
    #[error("Expected {expected} reply, got {actual}")]
    UnexpectedReply {
        /// What the parser needed
        expected: &'static str,
        /// Short description of what arrived
        actual: String,
    },

    /// Unknown aggregation name
    #[error("Invalid aggregation type '{0}'")]
    UnknownAggregation(String),

    /// Unknown duplicate policy name
    #[error("Invalid duplicate policy '{0}'")]
    UnknownDuplicatePolicy(String),

    /// Unknown reducer name
    #[error("Invalid reduce type '{0}'")]
    UnknownReduce(String),

    /// Numeric token could not be parsed
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// Bulk string was not valid UTF-8
    #[error("Reply is not valid UTF-8")]
    InvalidUtf8,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
