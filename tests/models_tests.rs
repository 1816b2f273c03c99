// Model tests: JSON camelCase, record kind tags, attribute values, time-series rows

mod common;

use common::*;
use gcanalyser::error::GcError;
use gcanalyser::models::*;

#[test]
fn test_kib_to_bytes() {
    assert_eq!(kib_to_bytes(0), 0);
    assert_eq!(kib_to_bytes(1), 1024);
    assert_eq!(kib_to_bytes(25472), 26083328);
}

#[test]
fn test_reclaimed_saturates_on_out_of_range_sizes() {
    let mut record = match &mixed_records()[0] {
        GcRecord::YoungGen(r) => r.clone(),
        other => panic!("expected young gen record, got {:?}", other),
    };
    record.yg_util_pre = u64::MAX;
    record.yg_util_post = 0;
    assert_eq!(record.yg_reclaimed(), i64::MAX);
    record.yg_util_pre = 0;
    record.yg_util_post = u64::MAX;
    assert_eq!(record.yg_reclaimed(), -i64::MAX);
    assert_eq!(bytes_to_i64(u64::MAX), i64::MAX);
    assert_eq!(AttrValue::from_bytes(u64::MAX), AttrValue::Int(i64::MAX));
}

#[test]
fn test_record_kind_round_trip() {
    for kind in [RecordKind::YoungGen, RecordKind::Full] {
        assert_eq!(kind.as_str().parse::<RecordKind>(), Ok(kind));
        assert_eq!(kind.to_string(), kind.as_str());
    }
    assert_eq!(
        "cms_remark".parse::<RecordKind>(),
        Err(GcError::UnsupportedKind("cms_remark".into()))
    );
}

#[test]
fn test_full_record_serialization_camel_case() {
    let record = &mixed_records()[3];
    let json = serde_json::to_string(record).unwrap();
    assert!(json.contains("\"kind\":\"full\""));
    assert!(json.contains("\"permPauseTime\":4.0912"));
    assert!(json.contains("\"system\":true"));
    let back: GcRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, record);
}

#[test]
fn test_record_accessors() {
    let records = mixed_records();
    assert_eq!(records[0].kind(), RecordKind::YoungGen);
    assert_eq!(records[0].collector(), "ParNew");
    assert_eq!(records[0].heap_size_post(), 4096 * 1024);
    assert_eq!(records[0].heap_reclaimed(), 1024 * 1024);
    assert_eq!(records[2].kind(), RecordKind::Full);
    assert_eq!(records[2].heap_reclaimed(), 3072 * 1024);
}

#[test]
fn test_accessor_tables_have_unique_names() {
    fn unique<R>(table: &[(&'static str, Accessor<R>)]) -> bool {
        let mut names: Vec<&str> = table.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.windows(2).all(|w| w[0] != w[1])
    }
    assert!(unique(YoungGenRecord::FIELDS));
    assert!(unique(FullGcRecord::FIELDS));
}

#[test]
fn test_attr_value_display() {
    assert_eq!(AttrValue::Int(-1024).to_string(), "-1024");
    assert_eq!(AttrValue::Float(47.1).to_string(), "47.1");
    assert_eq!(AttrValue::Float(3.0).to_string(), "3.0");
    assert_eq!(AttrValue::Bool(false).to_string(), "false");
    assert_eq!(AttrValue::Text("PSOldGen".into()).to_string(), "PSOldGen");
}

#[test]
fn test_time_series_row_serialization() {
    let row = TimeSeriesRow {
        time_series_key: TimeSeriesRow::TIME_SERIES_KEY,
        time_series_value: Some(12.5),
        attrs: vec![("heap_size_post", Some(AttrValue::Int(2048))), ("system", None)],
    };
    let json: serde_json::Value = serde_json::to_value(&row).unwrap();
    assert_eq!(json["timeSeriesKey"], "timestamp");
    assert_eq!(json["timeSeriesValue"], 12.5);
    assert_eq!(json["attrs"][0][0], "heap_size_post");
    assert_eq!(json["attrs"][0][1], 2048);
    assert!(json["attrs"][1][1].is_null());
    assert_eq!(row.time_series_display(), "12.5");
}
