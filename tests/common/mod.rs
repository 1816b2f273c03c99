// Shared test helpers: record builders, sample log lines, fixture loading

#![allow(dead_code)]

use gcanalyser::models::{FullGcRecord, GcRecord, YoungGenRecord, kib_to_bytes};

pub const SERIAL_LINE: &str = "47.100: [GC 47.100: [DefNew: 25472K->1143K(25472K), 0.0103151 secs] 66774K->45257K(81968K), 0.0103716 secs] [Times: user=0.01 sys=0.00, real=0.01 secs] ";
pub const PARALLEL_LINE: &str = "2.590: [GC [PSYoungGen: 32768K->26736K(57344K)] 82018K->75986K(140416K), 0.0292595 secs] [Times: user=0.08 sys=0.02, real=0.03 secs] ";
pub const PARNEW_LINE: &str = "29.063: [GC 29.063: [ParNew: 471872K->50601K(471872K), 0.1122560 secs] 2294220K->1911156K(4141888K), 0.1127720 secs] [Times: user=2.47 sys=0.09, real=0.12 secs] ";
pub const SERIAL_FULL_LINE: &str = "50.000: [Full GC (System) 50.000: [Tenured: 0K->1426K(174784K), 0.0284220 secs] 8395K->1426K(253440K), [Perm : 5036K->5036K(21248K)], 0.0285670 secs] [Times: user=0.03 sys=0.00, real=0.03 secs] ";
pub const PARALLEL_FULL_LINE: &str = "3.204: [Full GC (System) [PSYoungGen: 1376K->0K(38208K)] [PSOldGen: 0K->1281K(87424K)] 1376K->1281K(125632K) [PSPermGen: 5037K->5037K(21248K)], 0.0166710 secs] [Times: user=0.02 sys=0.00, real=0.02 secs] ";
pub const CMS_FULL_LINE: &str = "12.345: [Full GC 12.345: [CMS: 2048K->1024K(8192K), 0.2000000 secs] 4096K->1024K(16384K), [CMS Perm : 3000K->2900K(21248K)], 0.2010000 secs] [Times: user=0.19 sys=0.01, real=0.20 secs] ";

pub const CMS_LINES: [&str; 5] = [
    "29.177: [GC [1 CMS-initial-mark: 1860555K(3670016K)] 1911295K(4141888K), 0.0331270 secs] [Times: user=0.03 sys=0.01, real=0.03 secs] ",
    "29.210: [CMS-concurrent-mark-start]",
    "29.683: [CMS-concurrent-mark: 0.313/0.472 secs] [Times: user=13.67 sys=2.81, real=0.47 secs] ",
    "30.185: [GC[YG occupancy: 267358 K (471872 K)]30.185: [Rescan (parallel) , 0.0160950 secs]30.202: [weak refs processing, 0.0000670 secs] [1 CMS-remark: 1961567K(3670016K)] 2228926K(4141888K), 0.0164580 secs] [Times: user=0.75 sys=0.00, real=0.01 secs] ",
    "30.202: [CMS-concurrent-sweep-start]",
];

/// Serial collector log with 6 young-gen collections and a System.gc() full collection.
pub fn sample_log() -> String {
    std::fs::read_to_string(sample_log_path()).unwrap()
}

pub fn sample_log_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/gc-sample.log")
}

/// Young-gen record with sizes in KiB.
#[allow(clippy::too_many_arguments)]
pub fn young_gen(
    timestamp: f64,
    yg: (u64, u64, u64),
    heap: (u64, u64, u64),
    yg_pause_time: f64,
    pause_time: f64,
    times: (f64, f64, f64),
) -> GcRecord {
    GcRecord::YoungGen(YoungGenRecord {
        timestamp,
        gc_timestamp: timestamp,
        collector: "ParNew".into(),
        yg_util_pre: kib_to_bytes(yg.0),
        yg_util_post: kib_to_bytes(yg.1),
        yg_size_post: kib_to_bytes(yg.2),
        yg_pause_time,
        heap_util_pre: kib_to_bytes(heap.0),
        heap_util_post: kib_to_bytes(heap.1),
        heap_size_post: kib_to_bytes(heap.2),
        pause_time,
        user_time: times.0,
        sys_time: times.1,
        real_time: times.2,
    })
}

/// Full collection record with sizes in KiB.
#[allow(clippy::too_many_arguments)]
pub fn full_gc(
    timestamp: f64,
    tenured: (u64, u64, u64),
    heap: (u64, u64, u64),
    perm: (u64, u64, u64),
    tenured_pause_time: f64,
    perm_pause_time: f64,
    times: (f64, f64, f64),
    system: bool,
) -> GcRecord {
    GcRecord::Full(FullGcRecord {
        timestamp,
        gc_timestamp: timestamp,
        collector: "Tenured".into(),
        tenured_util_pre: kib_to_bytes(tenured.0),
        tenured_util_post: kib_to_bytes(tenured.1),
        tenured_size_post: kib_to_bytes(tenured.2),
        tenured_pause_time,
        heap_util_pre: kib_to_bytes(heap.0),
        heap_util_post: kib_to_bytes(heap.1),
        heap_size_post: kib_to_bytes(heap.2),
        perm_util_pre: kib_to_bytes(perm.0),
        perm_util_post: kib_to_bytes(perm.1),
        perm_size_post: kib_to_bytes(perm.2),
        perm_pause_time,
        user_time: times.0,
        sys_time: times.1,
        real_time: times.2,
        system,
    })
}

/// Two ParNew collections, one full collection, one System.gc() full collection.
pub fn mixed_records() -> Vec<GcRecord> {
    vec![
        young_gen(50.0, (2, 1, 4), (2048, 1024, 4096), 0.12345, 2.12345, (1.0, 1.50, 2.1)),
        young_gen(100.25, (3, 2, 8), (8192, 5120, 16384), 0.22345, 3.12345, (1.5, 2.0, 3.1)),
        full_gc(
            200.5,
            (20, 10, 40),
            (8192, 5120, 16384),
            (200, 100, 400),
            0.23456,
            3.1234,
            (1.9, 0.05, 3.11),
            false,
        ),
        full_gc(
            250.75,
            (30, 20, 80),
            (8192, 4096, 8192),
            (300, 200, 800),
            0.33456,
            4.0912,
            (1.98, 2.1, 4.09),
            true,
        ),
    ]
}
