//! Integration tests for the time-series command traits
//!
//! Drives every `ts_*` operation through scripted in-memory connections and
//! checks both the exact tokens sent and the decoded result.

mod common;

use common::{bulk, init_tracing, labels, pair, MockConnection};
use redis::Value;
use redis_ts_client::redis::{
    AddOptions, AlterOptions, CreateOptions, IncrByOptions, MGetOptions, MultiRangeOptions,
    RangeOptions, TimeSeriesCommands,
};
use redis_ts_client::{
    Aggregation, CompactionRule, DuplicatePolicy, Error, Label, Reduce, Sample, Timestamp,
    ValidationError,
};

// =============================================================================
// Write commands
// =============================================================================

#[test]
fn test_create_with_all_options() {
    init_tracing();
    let mut con = MockConnection::new().with_reply(Value::Okay);

    let options = CreateOptions::new()
        .with_retention(5000)
        .with_chunk_size(4096)
        .with_label("sensor", "t1")
        .uncompressed()
        .with_duplicate_policy(DuplicatePolicy::Max);

    assert!(con.ts_create("temp:1", &options).unwrap());
    assert_eq!(
        con.last(),
        vec![
            "TS.CREATE",
            "temp:1",
            "RETENTION",
            "5000",
            "CHUNK_SIZE",
            "4096",
            "LABELS",
            "sensor",
            "t1",
            "UNCOMPRESSED",
            "DUPLICATE_POLICY",
            "MAX"
        ]
    );
}

#[test]
fn test_create_non_ok_reply_is_false() {
    let mut con = MockConnection::new().with_reply(Value::SimpleString("QUEUED".to_string()));
    assert!(!con.ts_create("k", &CreateOptions::new()).unwrap());
}

#[test]
fn test_alter_sends_labels() {
    let mut con = MockConnection::new().with_reply(Value::Okay);
    let options = AlterOptions::new().with_retention(0).with_label("area", "7");

    assert!(con.ts_alter("k", &options).unwrap());
    assert_eq!(
        con.last(),
        vec!["TS.ALTER", "k", "RETENTION", "0", "LABELS", "area", "7"]
    );
}

#[test]
fn test_add_required_only() {
    let mut con = MockConnection::new().with_reply(Value::Int(1000));

    let stored = con
        .ts_add("k", Timestamp::Value(1000), 1.5, &AddOptions::new())
        .unwrap();
    assert_eq!(stored, Timestamp::Value(1000));
    assert_eq!(con.last(), vec!["TS.ADD", "k", "1000", "1.5"]);
}

#[test]
fn test_add_auto_timestamp_with_on_duplicate() {
    let mut con = MockConnection::new().with_reply(Value::Int(1_700_000_000_000));

    let options = AddOptions::new().with_on_duplicate(DuplicatePolicy::Sum);
    let stored = con.ts_add("k", Timestamp::Auto, 2.0, &options).unwrap();

    assert_eq!(stored.value(), Some(1_700_000_000_000));
    assert_eq!(con.last(), vec!["TS.ADD", "k", "*", "2", "ON_DUPLICATE", "SUM"]);
}

#[test]
fn test_madd_preserves_order() {
    let mut con = MockConnection::new().with_reply(Value::Array(vec![
        Value::Int(10),
        Value::Int(20),
    ]));

    let stored = con
        .ts_madd(&[
            ("a", Timestamp::Value(10), 1.0),
            ("b", Timestamp::Value(20), -2.5),
        ])
        .unwrap();

    assert_eq!(stored, vec![Timestamp::Value(10), Timestamp::Value(20)]);
    assert_eq!(
        con.last(),
        vec!["TS.MADD", "a", "10", "1", "b", "20", "-2.5"]
    );
}

#[test]
fn test_madd_empty_sends_nothing() {
    let mut con = MockConnection::new();
    let err = con.ts_madd(&[]).unwrap_err();

    assert!(err.is_validation());
    assert_eq!(con.command_count(), 0);
}

#[test]
fn test_incrby_and_decrby() {
    let mut con = MockConnection::new()
        .with_reply(Value::Int(5))
        .with_reply(Value::Int(6));

    let options = IncrByOptions::new().with_timestamp(5u64);
    assert_eq!(
        con.ts_incrby("counter", 3.0, &options).unwrap(),
        Timestamp::Value(5)
    );
    assert_eq!(
        con.last(),
        vec!["TS.INCRBY", "counter", "3", "TIMESTAMP", "5"]
    );

    assert_eq!(
        con.ts_decrby("counter", 1.0, &IncrByOptions::new()).unwrap(),
        Timestamp::Value(6)
    );
    assert_eq!(con.last(), vec!["TS.DECRBY", "counter", "1"]);
}

#[test]
fn test_incrby_zero_timestamp_is_sent() {
    let mut con = MockConnection::new().with_reply(Value::Int(0));
    let options = IncrByOptions::new().with_timestamp(0u64);

    con.ts_incrby("counter", 1.0, &options).unwrap();
    assert_eq!(
        con.last(),
        vec!["TS.INCRBY", "counter", "1", "TIMESTAMP", "0"]
    );
}

#[test]
fn test_del_range() {
    let mut con = MockConnection::new().with_reply(Value::Int(4));

    assert_eq!(con.ts_del("k", Timestamp::Min, Timestamp::Max).unwrap(), 4);
    assert_eq!(con.last(), vec!["TS.DEL", "k", "-", "+"]);
}

// =============================================================================
// Compaction rules
// =============================================================================

#[test]
fn test_create_rule_uses_destination_key() {
    let mut con = MockConnection::new().with_reply(Value::Okay);
    let rule = CompactionRule::new("temp:1:avg", 60_000, Some(Aggregation::Avg));

    assert!(con.ts_create_rule("temp:1", &rule).unwrap());
    assert_eq!(
        con.last(),
        vec!["TS.CREATERULE", "temp:1", "temp:1:avg", "AGGREGATION", "AVG", "60000"]
    );
}

#[test]
fn test_create_rule_without_aggregation_sends_nothing() {
    let mut con = MockConnection::new();
    let rule = CompactionRule::new("temp:1:raw", 60_000, None);

    let err = con.ts_create_rule("temp:1", &rule).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingAggregation)
    ));
    assert_eq!(con.command_count(), 0);
}

#[test]
fn test_delete_rule() {
    let mut con = MockConnection::new().with_reply(Value::Okay);

    assert!(con.ts_delete_rule("temp:1", "temp:1:avg").unwrap());
    assert_eq!(con.last(), vec!["TS.DELETERULE", "temp:1", "temp:1:avg"]);
}

// =============================================================================
// Read commands
// =============================================================================

#[test]
fn test_get_latest_sample() {
    let mut con = MockConnection::new()
        .with_reply(pair(1000, "21.5"))
        .with_reply(Value::Array(vec![]));

    assert_eq!(
        con.ts_get("k").unwrap(),
        Some(Sample::new(1000u64, 21.5))
    );
    assert_eq!(con.last(), vec!["TS.GET", "k"]);

    assert_eq!(con.ts_get("empty").unwrap(), None);
}

#[test]
fn test_range_with_aggregation() {
    let mut con = MockConnection::new().with_reply(Value::Array(vec![
        pair(0, "1.5"),
        pair(1000, "2.5"),
    ]));

    let options = RangeOptions::new()
        .with_count(10)
        .with_aggregation(Aggregation::Max, 1000);
    let samples = con
        .ts_range("k", Timestamp::Min, Timestamp::Max, &options)
        .unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].time, Timestamp::Value(0));
    assert_eq!(samples[1].value, 2.5);
    assert_eq!(
        con.last(),
        vec!["TS.RANGE", "k", "-", "+", "COUNT", "10", "AGGREGATION", "MAX", "1000"]
    );
}

#[test]
fn test_revrange_command_name() {
    let mut con = MockConnection::new().with_reply(Value::Array(vec![]));

    let samples = con
        .ts_revrange("k", Timestamp::Value(0), Timestamp::Value(50), &RangeOptions::new())
        .unwrap();
    assert!(samples.is_empty());
    assert_eq!(con.last(), vec!["TS.REVRANGE", "k", "0", "50"]);
}

#[test]
fn test_range_invalid_options_send_nothing() {
    let mut con = MockConnection::new();
    let options = RangeOptions {
        aggregation: Some(Aggregation::Avg),
        time_bucket: None,
        ..Default::default()
    };

    let err = con
        .ts_range("k", Timestamp::Min, Timestamp::Max, &options)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingTimeBucket)
    ));
    assert_eq!(con.command_count(), 0);
}

#[test]
fn test_mget_with_labels() {
    let reply = Value::Array(vec![Value::Array(vec![
        bulk("temp:1"),
        labels(&[("area", "32")]),
        pair(500, "3"),
    ])]);
    let mut con = MockConnection::new().with_reply(reply);

    let rows = con
        .ts_mget(&MGetOptions::new(["area=32"]).with_labels())
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "temp:1");
    assert_eq!(rows[0].labels, vec![Label::new("area", "32")]);
    assert_eq!(rows[0].sample, Some(Sample::new(500u64, 3.0)));
    assert_eq!(con.last(), vec!["TS.MGET", "WITHLABELS", "FILTER", "area=32"]);
}

#[test]
fn test_mrange_grouped() {
    let reply = Value::Array(vec![Value::Array(vec![
        bulk("area=32"),
        labels(&[("area", "32"), ("__reducer__", "sum")]),
        Value::Array(vec![pair(1, "10"), pair(2, "20")]),
    ])]);
    let mut con = MockConnection::new().with_reply(reply);

    let options = MultiRangeOptions::new(["area=32"])
        .with_labels()
        .with_group_by("area", Reduce::Sum);
    let series = con
        .ts_mrange(Timestamp::Min, Timestamp::Max, &options)
        .unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].samples.len(), 2);
    assert_eq!(
        con.last(),
        vec![
            "TS.MRANGE",
            "-",
            "+",
            "WITHLABELS",
            "FILTER",
            "area=32",
            "GROUPBY",
            "area",
            "REDUCE",
            "SUM"
        ]
    );
}

#[test]
fn test_mrevrange_requires_filters() {
    let mut con = MockConnection::new();
    let options = MultiRangeOptions::new(Vec::<String>::new());

    let err = con
        .ts_mrevrange(Timestamp::Min, Timestamp::Max, &options)
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("TS.MREVRANGE"));
    assert_eq!(con.command_count(), 0);
}

#[test]
fn test_query_index() {
    let mut con = MockConnection::new()
        .with_reply(Value::Array(vec![bulk("temp:1"), bulk("temp:2")]));

    let keys = con.ts_query_index(&["area=32".to_string()]).unwrap();
    assert_eq!(keys, vec!["temp:1", "temp:2"]);
    assert_eq!(con.last(), vec!["TS.QUERYINDEX", "area=32"]);
}

// =============================================================================
// Info
// =============================================================================

#[test]
fn test_create_then_info_reports_retention() {
    let info_reply = Value::Array(vec![
        bulk("totalSamples"),
        Value::Int(0),
        bulk("retentionTime"),
        Value::Int(5000),
        bulk("labels"),
        Value::Array(vec![]),
        bulk("rules"),
        Value::Array(vec![]),
    ]);
    let mut con = MockConnection::new()
        .with_reply(Value::Okay)
        .with_reply(info_reply);

    assert!(con
        .ts_create("k", &CreateOptions::new().with_retention(5000))
        .unwrap());
    let info = con.ts_info("k").unwrap();

    assert_eq!(info.retention_time, 5000);
    assert_eq!(info.total_samples, 0);
    assert_eq!(con.last(), vec!["TS.INFO", "k"]);
}

#[test]
fn test_info_with_rules_and_source() {
    let info_reply = Value::Array(vec![
        bulk("sourceKey"),
        bulk("raw"),
        bulk("rules"),
        Value::Array(vec![Value::Array(vec![
            bulk("raw:sum"),
            Value::Int(1000),
            bulk("SUM"),
        ])]),
        bulk("labels"),
        labels(&[("unit", "c")]),
    ]);
    let mut con = MockConnection::new().with_reply(info_reply);

    let info = con.ts_info("raw:avg").unwrap();
    assert_eq!(info.source_key.as_deref(), Some("raw"));
    assert_eq!(
        info.rules,
        vec![CompactionRule::new("raw:sum", 1000, Some(Aggregation::Sum))]
    );
    assert_eq!(info.label("unit"), Some("c"));
}

// =============================================================================
// Error propagation
// =============================================================================

#[test]
fn test_connection_failure_propagates() {
    // nothing queued: the fake fails like a dropped connection
    let mut con = MockConnection::new();

    let result = con.ts_get("missing");
    assert!(matches!(result, Err(Error::Redis(_))));
}

#[test]
fn test_malformed_reply_is_parse_error() {
    let mut con = MockConnection::new().with_reply(Value::Okay);

    let err = con.ts_info("k").unwrap_err();
    assert!(err.is_parse());
}
