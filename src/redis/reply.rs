//! Reply parsers for RedisTimeSeries commands
//!
//! Converts the `redis::Value` trees delivered by the client into the
//! domain values in [`crate::types`]. Parsers are pure and keep element
//! order. A reply whose shape does not match the command is a
//! [`ParseError`]; the only exception is [`parse_boolean`], which never
//! fails.
//!
//! # Example
//!
//! ```rust
//! use redis::Value;
//! use redis_ts_client::redis::reply::{parse_boolean, parse_info};
//!
//! assert!(parse_boolean(&Value::Okay));
//! assert!(!parse_boolean(&Value::Nil));
//!
//! let reply = Value::Array(vec![
//!     Value::SimpleString("totalSamples".into()),
//!     Value::Int(3),
//!     Value::SimpleString("retentionTime".into()),
//!     Value::Int(5000),
//! ]);
//! let info = parse_info(&reply).unwrap();
//! assert_eq!(info.total_samples, 3);
//! assert_eq!(info.retention_time, 5000);
//! ```

use crate::error::ParseError;
use crate::operators::{Aggregation, DuplicatePolicy};
use crate::types::{CompactionRule, Label, Sample, SeriesInfo, SeriesRange, SeriesSample, Timestamp};

use super::protocol::info_field;

use redis::Value;
use tracing::debug;

/// Short description of a reply for error messages
fn describe(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Int(i) => format!("integer {}", i),
        Value::BulkString(bytes) => format!("bulk string '{}'", String::from_utf8_lossy(bytes)),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::SimpleString(s) => format!("status '{}'", s),
        Value::Okay => "status 'OK'".to_string(),
        Value::Map(entries) => format!("map of {}", entries.len()),
        Value::Double(d) => format!("double {}", d),
        Value::ServerError(err) => format!("server error {:?}", err),
        _ => "unsupported RESP3 value".to_string(),
    }
}

fn unexpected(expected: &'static str, value: &Value) -> ParseError {
    ParseError::UnexpectedReply {
        expected,
        actual: describe(value),
    }
}

fn as_array<'a>(value: &'a Value, expected: &'static str) -> Result<&'a [Value], ParseError> {
    match value {
        Value::Array(items) | Value::Set(items) => Ok(items),
        other => Err(unexpected(expected, other)),
    }
}

fn as_string(value: &Value) -> Result<String, ParseError> {
    match value {
        Value::BulkString(bytes) => {
            String::from_utf8(bytes.clone()).map_err(|_| ParseError::InvalidUtf8)
        },
        Value::SimpleString(s) => Ok(s.clone()),
        Value::VerbatimString { text, .. } => Ok(text.clone()),
        Value::Okay => Ok("OK".to_string()),
        Value::Int(i) => Ok(i.to_string()),
        other => Err(unexpected("string", other)),
    }
}

fn as_optional_string(value: &Value) -> Result<Option<String>, ParseError> {
    match value {
        Value::Nil => Ok(None),
        other => as_string(other).map(Some),
    }
}

fn as_u64(value: &Value) -> Result<u64, ParseError> {
    match value {
        Value::Int(i) => u64::try_from(*i).map_err(|_| ParseError::InvalidNumber(i.to_string())),
        Value::BulkString(_) | Value::SimpleString(_) => {
            let text = as_string(value)?;
            text.trim()
                .parse::<u64>()
                .map_err(|_| ParseError::InvalidNumber(text))
        },
        other => Err(unexpected("integer", other)),
    }
}

fn as_f64(value: &Value) -> Result<f64, ParseError> {
    match value {
        Value::Double(d) => Ok(*d),
        Value::Int(i) => Ok(*i as f64),
        Value::BulkString(_) | Value::SimpleString(_) => {
            let text = as_string(value)?;
            text.trim()
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(text))
        },
        other => Err(unexpected("number", other)),
    }
}

/// True only for the literal `OK` status; anything else, including nil, is false
pub fn parse_boolean(value: &Value) -> bool {
    match value {
        Value::Okay => true,
        Value::SimpleString(s) => s == "OK",
        Value::BulkString(bytes) => bytes.as_slice() == b"OK",
        _ => false,
    }
}

/// Integer reply (TS.DEL count)
pub fn parse_integer(value: &Value) -> Result<u64, ParseError> {
    as_u64(value)
}

/// Integer reply interpreted as a millisecond timestamp
pub fn parse_timestamp(value: &Value) -> Result<Timestamp, ParseError> {
    as_u64(value).map(Timestamp::Value)
}

/// Array of timestamps (TS.MADD)
pub fn parse_timestamp_array(value: &Value) -> Result<Vec<Timestamp>, ParseError> {
    as_array(value, "array of timestamps")?
        .iter()
        .map(parse_timestamp)
        .collect()
}

/// `[timestamp, value]` pair
pub fn parse_sample(value: &Value) -> Result<Sample, ParseError> {
    match as_array(value, "sample pair")? {
        [time, val, ..] => Ok(Sample::new(as_u64(time)?, as_f64(val)?)),
        _ => Err(unexpected("sample pair", value)),
    }
}

/// Sample pair, `None` for the empty array a series without samples returns
pub fn parse_optional_sample(value: &Value) -> Result<Option<Sample>, ParseError> {
    match value {
        Value::Nil => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),
        other => parse_sample(other).map(Some),
    }
}

/// Array of sample pairs (TS.RANGE / TS.REVRANGE)
pub fn parse_sample_array(value: &Value) -> Result<Vec<Sample>, ParseError> {
    as_array(value, "array of samples")?
        .iter()
        .map(parse_sample)
        .collect()
}

fn parse_label(key: &Value, val: &Value) -> Result<Label, ParseError> {
    Ok(Label::new(
        as_string(key)?,
        as_optional_string(val)?.unwrap_or_default(),
    ))
}

/// Array of `[key, value]` pairs, or the RESP3 `{key: value}` map
///
/// A nil value (SELECTED_LABELS naming a label the series lacks) becomes an
/// empty string.
pub fn parse_label_array(value: &Value) -> Result<Vec<Label>, ParseError> {
    if let Value::Map(entries) = value {
        return entries.iter().map(|(key, val)| parse_label(key, val)).collect();
    }
    as_array(value, "array of labels")?
        .iter()
        .map(|pair| match as_array(pair, "label pair")? {
            [key, val] => parse_label(key, val),
            _ => Err(unexpected("label pair", pair)),
        })
        .collect()
}

/// `[bucket, aggregation, ..]` tail shared by both rule layouts
fn parse_rule_body(
    dest: &Value,
    body: &[Value],
    value: &Value,
) -> Result<CompactionRule, ParseError> {
    match body {
        [bucket, rest @ ..] => {
            let aggregation = match rest.first() {
                Some(agg) => as_optional_string(agg)?
                    .map(|name| name.parse::<Aggregation>())
                    .transpose()?,
                None => None,
            };
            Ok(CompactionRule::new(as_string(dest)?, as_u64(bucket)?, aggregation))
        },
        [] => Err(unexpected("rule", value)),
    }
}

/// `[dest_key, bucket, aggregation]`; extra trailing fields are ignored
pub fn parse_rule(value: &Value) -> Result<CompactionRule, ParseError> {
    match as_array(value, "rule")? {
        [dest, body @ ..] => parse_rule_body(dest, body, value),
        [] => Err(unexpected("rule", value)),
    }
}

/// Array of compaction rules, or the RESP3 `{dest_key: [bucket, aggregation]}` map
pub fn parse_rule_array(value: &Value) -> Result<Vec<CompactionRule>, ParseError> {
    if let Value::Map(entries) = value {
        return entries
            .iter()
            .map(|(dest, body)| parse_rule_body(dest, as_array(body, "rule")?, body))
            .collect();
    }
    as_array(value, "array of rules")?
        .iter()
        .map(parse_rule)
        .collect()
}

/// Optional duplicate policy name
pub fn parse_policy(value: &Value) -> Result<Option<DuplicatePolicy>, ParseError> {
    as_optional_string(value)?
        .map(|name| name.parse::<DuplicatePolicy>())
        .transpose()
}

/// Flat key/value reply of TS.INFO (or the RESP3 map form)
///
/// Unknown keys are skipped so newer servers stay readable; fields the
/// reply does not carry keep their defaults.
pub fn parse_info(value: &Value) -> Result<SeriesInfo, ParseError> {
    let pairs: Vec<(&Value, &Value)> = match value {
        Value::Array(items) => {
            if items.len() % 2 != 0 {
                return Err(unexpected("even-length key/value array", value));
            }
            items.chunks(2).map(|pair| (&pair[0], &pair[1])).collect()
        },
        Value::Map(entries) => entries.iter().map(|(k, v)| (k, v)).collect(),
        other => return Err(unexpected("array", other)),
    };

    let mut info = SeriesInfo::default();
    for (key, val) in pairs {
        let key = as_string(key)?;
        match key.as_str() {
            info_field::TOTAL_SAMPLES => info.total_samples = as_u64(val)?,
            info_field::MEMORY_USAGE => info.memory_usage = as_u64(val)?,
            info_field::RETENTION_TIME => info.retention_time = as_u64(val)?,
            info_field::CHUNK_COUNT => info.chunk_count = as_u64(val)?,
            info_field::CHUNK_SIZE => info.chunk_size = as_u64(val)?,
            info_field::FIRST_TIMESTAMP => info.first_timestamp = parse_timestamp(val)?,
            info_field::LAST_TIMESTAMP => info.last_timestamp = parse_timestamp(val)?,
            info_field::LABELS => info.labels = parse_label_array(val)?,
            info_field::SOURCE_KEY => info.source_key = as_optional_string(val)?,
            info_field::RULES => info.rules = parse_rule_array(val)?,
            info_field::DUPLICATE_POLICY => info.duplicate_policy = parse_policy(val)?,
            other => debug!("Ignoring TS.INFO field {}", other),
        }
    }
    Ok(info)
}

/// Rows of `[key, labels, [timestamp, value]]` (TS.MGET)
pub fn parse_mget_reply(value: &Value) -> Result<Vec<SeriesSample>, ParseError> {
    as_array(value, "array of series")?
        .iter()
        .map(|row| match as_array(row, "series row")? {
            [key, labels, sample] => Ok(SeriesSample {
                key: as_string(key)?,
                labels: parse_label_array(labels)?,
                sample: parse_optional_sample(sample)?,
            }),
            _ => Err(unexpected("series row", row)),
        })
        .collect()
}

/// Rows of `[key, labels, [[timestamp, value], ...]]` (TS.MRANGE / TS.MREVRANGE)
pub fn parse_mrange_reply(value: &Value) -> Result<Vec<SeriesRange>, ParseError> {
    let rows = as_array(value, "array of series")?;
    debug!("Parsing multi-range reply with {} series", rows.len());
    rows.iter()
        .map(|row| match as_array(row, "series row")? {
            [key, labels, samples] => Ok(SeriesRange {
                key: as_string(key)?,
                labels: parse_label_array(labels)?,
                samples: parse_sample_array(samples)?,
            }),
            _ => Err(unexpected("series row", row)),
        })
        .collect()
}

/// Array of strings (TS.QUERYINDEX)
pub fn parse_string_array(value: &Value) -> Result<Vec<String>, ParseError> {
    as_array(value, "array of strings")?
        .iter()
        .map(as_string)
        .collect()
}
