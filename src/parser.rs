// GC log line parser. Each line becomes zero or one GcRecord.
//
// Two dialects are recognised after the leading "<secs>: " timestamp: young generation
// ("[GC ...") and full collection ("[Full GC ..."). Optional segments shift group
// numbering, so every value is read through a named capture.
// CMS concurrent phases, initial-mark/remark and concurrent-mode-failure blocks are not
// parsed; they fall through both patterns and are skipped.

use std::io::BufRead;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::models::{FullGcRecord, GcRecord, MAX_SIZE_KIB, YoungGenRecord, kib_to_bytes};

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<timestamp>\d+\.\d+):\s*(?P<entry>.*)$").expect("timestamp regex to be valid")
});

static YOUNG_GEN_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\s*\[GC\ (?:(?P<gc_ts>\d+\.\d+):\ )?\[(?P<collector>[A-Za-z]+):
        \ (?P<yg_pre>\d+)K->(?P<yg_post>\d+)K\((?P<yg_sz>\d+)K\)(?:,\ (?P<yg_pause>\d+\.\d+)\ secs)?\]
        \s*(?P<heap_pre>\d+)K->(?P<heap_post>\d+)K\((?P<heap_sz>\d+)K\),\ (?P<pause>\d+\.\d+)\ secs\]
        \s*\[Times:\ user=(?P<user>\d+\.\d+)\ sys=(?P<sys>\d+\.\d+),?\ real=(?P<real>\d+\.\d+)\ secs\]
        ",
    )
    .expect("young gen regex to be valid")
});

static FULL_GC_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\s*\[Full\ GC\ (?:\((?P<system>System)\)\ )?(?:(?P<gc_ts>\d+\.\d+):\ )?
        (?:\[(?P<yg_collector>[A-Za-z]+):\ (?P<yg_pre>\d+)K->(?P<yg_post>\d+)K\((?P<yg_sz>\d+)K\)\]\ )?
        \[(?P<collector>[A-Za-z]+):
        \ (?P<tenured_pre>\d+)K->(?P<tenured_post>\d+)K\((?P<tenured_sz>\d+)K\)(?:,\ (?P<tenured_pause>\d+\.\d+)\ secs)?\]
        \s*(?P<heap_pre>\d+)K->(?P<heap_post>\d+)K\((?P<heap_sz>\d+)K\),?
        \ \[(?:[A-Za-z]+\ )?[A-Za-z]+\ ?:\ (?P<perm_pre>\d+)K->(?P<perm_post>\d+)K\((?P<perm_sz>\d+)K\)\],\ (?P<perm_pause>\d+\.\d+)\ secs\]
        \s*\[Times:\ user=(?P<user>\d+\.\d+)\ sys=(?P<sys>\d+\.\d+),?\ real=(?P<real>\d+\.\d+)\ secs\]
        ",
    )
    .expect("full gc regex to be valid")
});

/// Parse a single log line. Lines that are not a supported GC event yield None.
pub fn parse_line(line: &str) -> Option<GcRecord> {
    let Some(ts) = TIMESTAMP.captures(line.trim_end()) else {
        trace!(line, "ignoring line without timestamp");
        return None;
    };
    let timestamp = float(&ts, "timestamp")?;
    let entry = ts.name("entry").map_or("", |m| m.as_str());

    if let Some(caps) = YOUNG_GEN_ENTRY.captures(entry) {
        return young_gen(timestamp, &caps).map(GcRecord::YoungGen);
    }
    if let Some(caps) = FULL_GC_ENTRY.captures(entry) {
        return full_gc(timestamp, &caps).map(GcRecord::Full);
    }

    trace!(entry, "ignoring unsupported gc entry");
    None
}

/// Parse lines in order, dropping anything unrecognised.
pub fn parse_lines<I, S>(lines: I) -> Vec<GcRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        match parse_line(line.as_ref()) {
            Some(r) => records.push(r),
            None => skipped += 1,
        }
    }
    debug!(parsed = records.len(), skipped, "gc log parsed");
    records
}

pub fn parse_str(text: &str) -> Vec<GcRecord> {
    parse_lines(text.lines())
}

/// Parse from any buffered reader (file, upload body). I/O errors abort; bad lines do not.
pub fn parse_reader<R: BufRead>(reader: R) -> std::io::Result<Vec<GcRecord>> {
    let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
    Ok(parse_lines(lines))
}

fn young_gen(timestamp: f64, caps: &Captures<'_>) -> Option<YoungGenRecord> {
    Some(YoungGenRecord {
        timestamp,
        gc_timestamp: optional_float(caps, "gc_ts")?,
        collector: text(caps, "collector")?,
        yg_util_pre: bytes(caps, "yg_pre")?,
        yg_util_post: bytes(caps, "yg_post")?,
        yg_size_post: bytes(caps, "yg_sz")?,
        yg_pause_time: optional_float(caps, "yg_pause")?,
        heap_util_pre: bytes(caps, "heap_pre")?,
        heap_util_post: bytes(caps, "heap_post")?,
        heap_size_post: bytes(caps, "heap_sz")?,
        pause_time: float(caps, "pause")?,
        user_time: float(caps, "user")?,
        sys_time: float(caps, "sys")?,
        real_time: float(caps, "real")?,
    })
}

fn full_gc(timestamp: f64, caps: &Captures<'_>) -> Option<FullGcRecord> {
    Some(FullGcRecord {
        timestamp,
        gc_timestamp: optional_float(caps, "gc_ts")?,
        collector: text(caps, "collector")?,
        tenured_util_pre: bytes(caps, "tenured_pre")?,
        tenured_util_post: bytes(caps, "tenured_post")?,
        tenured_size_post: bytes(caps, "tenured_sz")?,
        tenured_pause_time: optional_float(caps, "tenured_pause")?,
        heap_util_pre: bytes(caps, "heap_pre")?,
        heap_util_post: bytes(caps, "heap_post")?,
        heap_size_post: bytes(caps, "heap_sz")?,
        perm_util_pre: bytes(caps, "perm_pre")?,
        perm_util_post: bytes(caps, "perm_post")?,
        perm_size_post: bytes(caps, "perm_sz")?,
        perm_pause_time: float(caps, "perm_pause")?,
        user_time: float(caps, "user")?,
        sys_time: float(caps, "sys")?,
        real_time: float(caps, "real")?,
        system: caps.name("system").is_some(),
    })
}

fn text(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

fn float(caps: &Captures<'_>, name: &str) -> Option<f64> {
    let raw = caps.name(name)?.as_str();
    match raw.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(group = name, raw, error = %e, "unparseable float capture");
            None
        }
    }
}

/// Absent optional groups read as "0.0".
fn optional_float(caps: &Captures<'_>, name: &str) -> Option<f64> {
    if caps.name(name).is_none() {
        return Some(0.0);
    }
    float(caps, name)
}

fn bytes(caps: &Captures<'_>, name: &str) -> Option<u64> {
    let raw = caps.name(name)?.as_str();
    match raw.parse::<u64>() {
        Ok(kib) if kib <= MAX_SIZE_KIB => Some(kib_to_bytes(kib)),
        Ok(_) => {
            debug!(group = name, raw, "size capture overflows bytes");
            None
        }
        Err(e) => {
            debug!(group = name, raw, error = %e, "unparseable size capture");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_split_keeps_remainder() {
        let caps = TIMESTAMP.captures("12.5: [GC foo]").unwrap();
        assert_eq!(&caps["timestamp"], "12.5");
        assert_eq!(&caps["entry"], "[GC foo]");
    }

    #[test]
    fn size_overflow_is_not_a_record() {
        let line = "1.0: [GC [PSYoungGen: 99999999999999999999K->1K(2K)] 3K->2K(4K), 0.1 secs] [Times: user=0.01 sys=0.00, real=0.01 secs]";
        assert!(parse_line(line).is_none());
    }
}
