// Summary statistics over a parsed GC log: running accumulators per pool, then a
// labelled, human-readable report.

mod human;
mod running;

pub use human::{float_bytes_human_readable, int_bytes_human_readable};
pub use running::{FloatStats, IntStats};

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::error::GcError;
use crate::models::{FullGcRecord, GcRecord, YoungGenRecord, bytes_to_i64};

pub const TOTAL_EVENTS: &str = "Total Events";
pub const ELAPSED_TIME: &str = "Elapsed Time";
pub const TIME_IN_FULL_GC: &str = "Time spent in Full GC";
pub const TIME_IN_YG_GC: &str = "Time spent in YG GC";
pub const HEAP_START_END_PEAK: &str = "Heap Start / End (Peak)";
pub const YG_START_END_PEAK: &str = "YG Start / End (Peak)";
pub const TENURED_START_END_PEAK: &str = "Tenured Start / End (Peak)";
pub const PERM_START_END_PEAK: &str = "Perm Start / End (Peak)";
pub const HEAP_GROWTH: &str = "Heap Growth";
pub const YG_GROWTH: &str = "YG Growth";
pub const TENURED_GROWTH: &str = "Tenured Growth";
pub const PERM_GROWTH: &str = "Perm Growth";
pub const AVG_YG_RECLAIMED: &str = "Avg YG Reclaimed";
pub const AVG_TENURED_RECLAIMED: &str = "Avg Tenured Reclaimed";

/// Ordered label -> value report. Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    entries: Vec<(&'static str, String)>,
}

impl Summary {
    fn push(&mut self, label: &'static str, value: String) {
        self.entries.push((label, value));
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(l, v)| (*l, v.as_str()))
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(l, _)| *l).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Summary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Accumulators for one log. Heap accumulators see every record; the others only see
/// records of their own kind.
#[derive(Debug, Clone, Default)]
pub struct SummaryStats {
    pub yg_size: IntStats,
    pub heap_size: IntStats,
    pub perm_size: IntStats,
    pub tenured_size: IntStats,
    pub yg_reclaimed: IntStats,
    pub heap_reclaimed: IntStats,
    pub perm_reclaimed: IntStats,
    pub tenured_reclaimed: IntStats,
    pub yg_elapsed_duration: FloatStats,
    pub full_elapsed_duration: FloatStats,
    pub yg_duration: FloatStats,
    pub full_duration: FloatStats,
}

impl SummaryStats {
    /// Feed every record in order. An empty slice is rejected.
    pub fn from_records(records: &[GcRecord]) -> Result<Self, GcError> {
        if records.is_empty() {
            return Err(GcError::EmptyRecords);
        }
        let mut stats = Self::default();
        for record in records {
            stats.process(record);
        }
        Ok(stats)
    }

    pub fn process(&mut self, record: &GcRecord) {
        self.heap_size.process(bytes_to_i64(record.heap_size_post()));
        self.heap_reclaimed.process(record.heap_reclaimed());
        match record {
            GcRecord::YoungGen(r) => self.process_young_gen(r),
            GcRecord::Full(r) => self.process_full(r),
        }
    }

    fn process_young_gen(&mut self, r: &YoungGenRecord) {
        self.yg_size.process(bytes_to_i64(r.yg_size_post));
        self.yg_reclaimed.process(r.yg_reclaimed());
        self.yg_elapsed_duration.process(r.real_time);
        self.yg_duration.process(r.pause_time);
    }

    fn process_full(&mut self, r: &FullGcRecord) {
        self.perm_size.process(bytes_to_i64(r.perm_size_post));
        self.tenured_size.process(bytes_to_i64(r.tenured_size_post));
        self.perm_reclaimed.process(r.perm_reclaimed());
        self.tenured_reclaimed.process(r.tenured_reclaimed());
        self.full_elapsed_duration.process(r.real_time);
        self.full_duration.process(r.perm_pause_time);
    }

    /// Build the report. `records` must be the slice the stats were built from.
    pub fn summary(&self, records: &[GcRecord]) -> Result<Summary, GcError> {
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(GcError::EmptyRecords);
        };
        let mut s = Summary::default();
        s.push(TOTAL_EVENTS, records.len().to_string());
        s.push(
            ELAPSED_TIME,
            secs(last.timestamp() - first.timestamp()),
        );
        s.push(TIME_IN_FULL_GC, secs(self.full_duration.total));
        s.push(TIME_IN_YG_GC, secs(self.yg_duration.total));
        s.push(HEAP_START_END_PEAK, start_end_peak(&self.heap_size));
        s.push(YG_START_END_PEAK, start_end_peak(&self.yg_size));
        s.push(TENURED_START_END_PEAK, start_end_peak(&self.tenured_size));
        s.push(PERM_START_END_PEAK, start_end_peak(&self.perm_size));
        s.push(HEAP_GROWTH, growth(&self.heap_size));
        s.push(YG_GROWTH, growth(&self.yg_size));
        s.push(TENURED_GROWTH, growth(&self.tenured_size));
        s.push(PERM_GROWTH, growth(&self.perm_size));
        s.push(
            AVG_YG_RECLAIMED,
            int_bytes_human_readable(self.yg_reclaimed.average),
        );
        s.push(
            AVG_TENURED_RECLAIMED,
            int_bytes_human_readable(self.tenured_reclaimed.average),
        );
        Ok(s)
    }
}

/// Accumulate and report in one go.
pub fn summarize(records: &[GcRecord]) -> Result<Summary, GcError> {
    SummaryStats::from_records(records)?.summary(records)
}

fn secs(v: f64) -> String {
    format!("{:.3} secs", v)
}

fn start_end_peak(s: &IntStats) -> String {
    format!(
        "{} / {} ({})",
        int_bytes_human_readable(s.first),
        int_bytes_human_readable(s.last),
        int_bytes_human_readable(s.max)
    )
}

fn growth(s: &IntStats) -> String {
    int_bytes_human_readable(s.last.saturating_sub(s.first))
}
