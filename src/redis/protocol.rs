//! Command names and keyword tokens of the RedisTimeSeries grammar
//!
//! Spelling must match the module exactly; the server rejects anything else.

/// Command names
pub mod command {
    /// Create a series
    pub const CREATE: &str = "TS.CREATE";
    /// Update retention, chunk size, policy or labels
    pub const ALTER: &str = "TS.ALTER";
    /// Append a sample
    pub const ADD: &str = "TS.ADD";
    /// Append samples to several series
    pub const MADD: &str = "TS.MADD";
    /// Increment the latest value
    pub const INCRBY: &str = "TS.INCRBY";
    /// Decrement the latest value
    pub const DECRBY: &str = "TS.DECRBY";
    /// Delete samples in a range
    pub const DEL: &str = "TS.DEL";
    /// Create a compaction rule
    pub const CREATERULE: &str = "TS.CREATERULE";
    /// Delete a compaction rule
    pub const DELETERULE: &str = "TS.DELETERULE";
    /// Query a range
    pub const RANGE: &str = "TS.RANGE";
    /// Query a range, newest first
    pub const REVRANGE: &str = "TS.REVRANGE";
    /// Query a range across series
    pub const MRANGE: &str = "TS.MRANGE";
    /// Query a range across series, newest first
    pub const MREVRANGE: &str = "TS.MREVRANGE";
    /// Latest sample of a series
    pub const GET: &str = "TS.GET";
    /// Latest sample of matching series
    pub const MGET: &str = "TS.MGET";
    /// Series metadata
    pub const INFO: &str = "TS.INFO";
    /// Keys of matching series
    pub const QUERYINDEX: &str = "TS.QUERYINDEX";
}

/// Keyword tokens
#[allow(missing_docs)]
pub mod keyword {
    pub const RETENTION: &str = "RETENTION";
    pub const LABELS: &str = "LABELS";
    pub const UNCOMPRESSED: &str = "UNCOMPRESSED";
    pub const COUNT: &str = "COUNT";
    pub const AGGREGATION: &str = "AGGREGATION";
    pub const ALIGN: &str = "ALIGN";
    pub const FILTER: &str = "FILTER";
    pub const WITHLABELS: &str = "WITHLABELS";
    pub const SELECTED_LABELS: &str = "SELECTED_LABELS";
    pub const TIMESTAMP: &str = "TIMESTAMP";
    pub const CHUNK_SIZE: &str = "CHUNK_SIZE";
    pub const DUPLICATE_POLICY: &str = "DUPLICATE_POLICY";
    pub const ON_DUPLICATE: &str = "ON_DUPLICATE";
    pub const GROUPBY: &str = "GROUPBY";
    pub const REDUCE: &str = "REDUCE";
    pub const FILTER_BY_TS: &str = "FILTER_BY_TS";
    pub const FILTER_BY_VALUE: &str = "FILTER_BY_VALUE";
}

/// Keys reported by TS.INFO
#[allow(missing_docs)]
pub mod info_field {
    pub const TOTAL_SAMPLES: &str = "totalSamples";
    pub const MEMORY_USAGE: &str = "memoryUsage";
    pub const FIRST_TIMESTAMP: &str = "firstTimestamp";
    pub const LAST_TIMESTAMP: &str = "lastTimestamp";
    pub const RETENTION_TIME: &str = "retentionTime";
    pub const CHUNK_COUNT: &str = "chunkCount";
    pub const CHUNK_SIZE: &str = "chunkSize";
    pub const LABELS: &str = "labels";
    pub const SOURCE_KEY: &str = "sourceKey";
    pub const RULES: &str = "rules";
    pub const DUPLICATE_POLICY: &str = "duplicatePolicy";
}
