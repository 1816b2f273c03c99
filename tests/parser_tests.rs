// Parser tests: young-gen dialects, full collections, skipped lines, whole-file parsing

mod common;

use common::*;
use gcanalyser::models::{GcRecord, MAX_SIZE_KIB, RecordKind};
use gcanalyser::parser;

fn young_gen(line: &str) -> gcanalyser::models::YoungGenRecord {
    match parser::parse_line(line) {
        Some(GcRecord::YoungGen(r)) => r,
        other => panic!("expected young gen record, got {:?}", other),
    }
}

fn full(line: &str) -> gcanalyser::models::FullGcRecord {
    match parser::parse_line(line) {
        Some(GcRecord::Full(r)) => r,
        other => panic!("expected full gc record, got {:?}", other),
    }
}

#[test]
fn serial_young_gen_line() {
    let r = young_gen(SERIAL_LINE);
    assert_eq!(r.timestamp, 47.1);
    assert_eq!(r.gc_timestamp, 47.1);
    assert_eq!(r.collector, "DefNew");
    assert_eq!(r.yg_util_pre, 25472 * 1024);
    assert_eq!(r.yg_util_post, 1143 * 1024);
    assert_eq!(r.yg_size_post, 25472 * 1024);
    assert_eq!(r.yg_pause_time, 0.0103151);
    assert_eq!(r.heap_util_pre, 66774 * 1024);
    assert_eq!(r.heap_util_post, 45257 * 1024);
    assert_eq!(r.heap_size_post, 81968 * 1024);
    assert_eq!(r.pause_time, 0.0103716);
    assert_eq!(r.user_time, 0.01);
    assert_eq!(r.sys_time, 0.0);
    assert_eq!(r.real_time, 0.01);
}

#[test]
fn parallel_young_gen_defaults_missing_timings() {
    let r = young_gen(PARALLEL_LINE);
    assert_eq!(r.timestamp, 2.59);
    assert_eq!(r.gc_timestamp, 0.0);
    assert_eq!(r.collector, "PSYoungGen");
    assert_eq!(r.yg_pause_time, 0.0);
    assert_eq!(r.yg_util_pre, 32768 * 1024);
    assert_eq!(r.yg_util_post, 26736 * 1024);
    assert_eq!(r.yg_size_post, 57344 * 1024);
    assert_eq!(r.heap_size_post, 140416 * 1024);
    assert_eq!(r.pause_time, 0.0292595);
    assert_eq!(r.user_time, 0.08);
    assert_eq!(r.sys_time, 0.02);
    assert_eq!(r.real_time, 0.03);
}

#[test]
fn parnew_young_gen_line() {
    let r = young_gen(PARNEW_LINE);
    assert_eq!(r.timestamp, 29.063);
    assert_eq!(r.gc_timestamp, 29.063);
    assert_eq!(r.collector, "ParNew");
    assert_eq!(r.yg_util_pre, 471872 * 1024);
    assert_eq!(r.yg_util_post, 50601 * 1024);
    assert_eq!(r.yg_pause_time, 0.112256);
    assert_eq!(r.heap_util_pre, 2294220 * 1024);
    assert_eq!(r.heap_util_post, 1911156 * 1024);
    assert_eq!(r.heap_size_post, 4141888 * 1024);
    assert_eq!(r.pause_time, 0.112772);
    assert_eq!(r.yg_reclaimed(), (471872 - 50601) * 1024);
}

#[test]
fn serial_full_gc_triggered_by_system() {
    let r = full(SERIAL_FULL_LINE);
    assert_eq!(r.timestamp, 50.0);
    assert_eq!(r.gc_timestamp, 50.0);
    assert_eq!(r.collector, "Tenured");
    assert!(r.system);
    assert_eq!(r.tenured_util_pre, 0);
    assert_eq!(r.tenured_util_post, 1426 * 1024);
    assert_eq!(r.tenured_size_post, 174784 * 1024);
    assert_eq!(r.tenured_pause_time, 0.028422);
    assert_eq!(r.heap_util_pre, 8395 * 1024);
    assert_eq!(r.heap_util_post, 1426 * 1024);
    assert_eq!(r.heap_size_post, 253440 * 1024);
    assert_eq!(r.perm_util_pre, 5036 * 1024);
    assert_eq!(r.perm_util_post, 5036 * 1024);
    assert_eq!(r.perm_size_post, 21248 * 1024);
    assert_eq!(r.perm_pause_time, 0.028567);
    assert_eq!(r.user_time, 0.03);
    assert_eq!(r.real_time, 0.03);
    // Tenured grew during the collection.
    assert_eq!(r.tenured_reclaimed(), -1426 * 1024);
}

#[test]
fn parallel_full_gc_with_young_gen_block() {
    let r = full(PARALLEL_FULL_LINE);
    assert_eq!(r.timestamp, 3.204);
    assert_eq!(r.gc_timestamp, 0.0);
    assert_eq!(r.collector, "PSOldGen");
    assert!(r.system);
    assert_eq!(r.tenured_util_post, 1281 * 1024);
    assert_eq!(r.tenured_size_post, 87424 * 1024);
    assert_eq!(r.tenured_pause_time, 0.0);
    assert_eq!(r.heap_util_pre, 1376 * 1024);
    assert_eq!(r.heap_size_post, 125632 * 1024);
    assert_eq!(r.perm_size_post, 21248 * 1024);
    assert_eq!(r.perm_pause_time, 0.016671);
}

#[test]
fn cms_full_gc_is_not_system() {
    let r = full(CMS_FULL_LINE);
    assert_eq!(r.collector, "CMS");
    assert!(!r.system);
    assert_eq!(r.tenured_reclaimed(), 1024 * 1024);
    assert_eq!(r.perm_reclaimed(), 100 * 1024);
    assert_eq!(r.heap_reclaimed(), 3072 * 1024);
    assert_eq!(r.perm_pause_time, 0.201);
}

#[test]
fn cms_phases_yield_no_record() {
    for line in CMS_LINES {
        assert!(parser::parse_line(line).is_none(), "parsed: {}", line);
    }
}

#[test]
fn noise_yields_no_record() {
    for line in [
        "",
        "   ",
        "Heap",
        "CommandLine flags: -XX:+PrintGCDetails",
        "12.5: something else entirely",
        "[GC [PSYoungGen: 1K->1K(2K)] 3K->2K(4K), 0.1 secs] [Times: user=0.01 sys=0.00, real=0.01 secs]",
        // truncated mid-entry
        "2.590: [GC [PSYoungGen: 32768K->26736K(57344K)] 82018K->75986K(140416K), 0.0292595 secs]",
    ] {
        assert!(parser::parse_line(line).is_none(), "parsed: {:?}", line);
    }
}

#[test]
fn sizes_beyond_i64_bytes_yield_no_record() {
    let at_limit = format!(
        "1.0: [GC 1.0: [DefNew: {}K->1K(2K), 0.1 secs] 3K->2K(4K), 0.1 secs] [Times: user=0.01 sys=0.00, real=0.01 secs]",
        MAX_SIZE_KIB
    );
    let r = young_gen(&at_limit);
    assert_eq!(r.yg_util_pre, MAX_SIZE_KIB * 1024);
    assert!(i64::try_from(r.yg_util_pre).is_ok());

    let over_limit = at_limit.replace(&MAX_SIZE_KIB.to_string(), &(MAX_SIZE_KIB + 1).to_string());
    assert!(parser::parse_line(&over_limit).is_none());
}

#[test]
fn trailing_whitespace_and_newline_are_ignored() {
    let with_newline = format!("{}\r\n", SERIAL_LINE.trim_end());
    assert_eq!(parser::parse_line(&with_newline), parser::parse_line(SERIAL_LINE));
}

#[test]
fn parse_lines_keeps_input_order_and_drops_the_rest() {
    let mut lines = vec![PARNEW_LINE];
    lines.extend(CMS_LINES);
    lines.push(SERIAL_FULL_LINE);
    lines.push(PARALLEL_LINE);

    let records = parser::parse_lines(lines);
    let kinds: Vec<RecordKind> = records.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![RecordKind::YoungGen, RecordKind::Full, RecordKind::YoungGen]
    );
    assert_eq!(records[0].timestamp(), 29.063);
    assert_eq!(records[1].timestamp(), 50.0);
    assert_eq!(records[2].timestamp(), 2.59);
}

#[test]
fn parse_sample_file() {
    let file = std::fs::File::open(sample_log_path()).unwrap();
    let records = parser::parse_reader(std::io::BufReader::new(file)).unwrap();
    assert_eq!(records.len(), 7);
    assert_eq!(
        records.iter().filter(|r| r.kind() == RecordKind::Full).count(),
        1
    );
    assert_eq!(records.first().unwrap().timestamp(), 50.0);
    assert_eq!(records.last().unwrap().timestamp(), 250.75);
    assert!(records.iter().all(|r| r.collector() == "DefNew" || r.collector() == "Tenured"));

    assert_eq!(parser::parse_str(&sample_log()), records);
}

#[test]
fn record_serializes_with_kind_tag() {
    let record = parser::parse_line(PARALLEL_LINE).unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["kind"], "young_gen");
    assert_eq!(json["collector"], "PSYoungGen");
    assert_eq!(json["ygSizePost"], 57344 * 1024);

    let back: GcRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}
