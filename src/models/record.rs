// Young generation and full collection records, plus per-kind field accessor tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AttrValue;
use crate::error::GcError;

/// Reads one named value off a record. Tables of these replace runtime field lookup.
pub type Accessor<R> = fn(&R) -> AttrValue;

/// Largest size accepted from a log, in KiB. Every byte count then fits in an i64.
pub const MAX_SIZE_KIB: u64 = (i64::MAX as u64) >> 10;

/// Log sizes are in KiB; records store bytes.
pub fn kib_to_bytes(kib: u64) -> u64 {
    kib << 10
}

/// Byte count as i64, saturating at i64::MAX.
pub fn bytes_to_i64(bytes: u64) -> i64 {
    i64::try_from(bytes).unwrap_or(i64::MAX)
}

fn reclaimed(pre: u64, post: u64) -> i64 {
    bytes_to_i64(pre).saturating_sub(bytes_to_i64(post))
}

/// Minor collection of the young generation (DefNew, ParNew, PSYoungGen, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoungGenRecord {
    pub timestamp: f64,
    /// Timestamp printed inside the GC block; 0.0 when the collector omits it.
    pub gc_timestamp: f64,
    pub collector: String,
    pub yg_util_pre: u64,
    pub yg_util_post: u64,
    pub yg_size_post: u64,
    /// 0.0 when the collector omits it (PSYoungGen).
    pub yg_pause_time: f64,
    pub heap_util_pre: u64,
    pub heap_util_post: u64,
    pub heap_size_post: u64,
    pub pause_time: f64,
    pub user_time: f64,
    pub sys_time: f64,
    pub real_time: f64,
}

impl YoungGenRecord {
    pub fn yg_reclaimed(&self) -> i64 {
        reclaimed(self.yg_util_pre, self.yg_util_post)
    }

    pub fn heap_reclaimed(&self) -> i64 {
        reclaimed(self.heap_util_pre, self.heap_util_post)
    }

    pub const FIELDS: &'static [(&'static str, Accessor<YoungGenRecord>)] = &[
        ("timestamp", |r| AttrValue::Float(r.timestamp)),
        ("gc_timestamp", |r| AttrValue::Float(r.gc_timestamp)),
        ("collector", |r| AttrValue::Text(r.collector.clone())),
        ("yg_util_pre", |r| AttrValue::from_bytes(r.yg_util_pre)),
        ("yg_util_post", |r| AttrValue::from_bytes(r.yg_util_post)),
        ("yg_size_post", |r| AttrValue::from_bytes(r.yg_size_post)),
        ("yg_pause_time", |r| AttrValue::Float(r.yg_pause_time)),
        ("heap_util_pre", |r| AttrValue::from_bytes(r.heap_util_pre)),
        ("heap_util_post", |r| AttrValue::from_bytes(r.heap_util_post)),
        ("heap_size_post", |r| AttrValue::from_bytes(r.heap_size_post)),
        ("pause_time", |r| AttrValue::Float(r.pause_time)),
        ("user_time", |r| AttrValue::Float(r.user_time)),
        ("sys_time", |r| AttrValue::Float(r.sys_time)),
        ("real_time", |r| AttrValue::Float(r.real_time)),
        ("yg_reclaimed", |r| AttrValue::Int(r.yg_reclaimed())),
        ("heap_reclaimed", |r| AttrValue::Int(r.heap_reclaimed())),
    ];
}

/// Full (major) collection: tenured and permanent generations plus the whole heap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullGcRecord {
    pub timestamp: f64,
    pub gc_timestamp: f64,
    /// Tenured collector (Tenured, PSOldGen, CMS, ...).
    pub collector: String,
    pub tenured_util_pre: u64,
    pub tenured_util_post: u64,
    pub tenured_size_post: u64,
    pub tenured_pause_time: f64,
    pub heap_util_pre: u64,
    pub heap_util_post: u64,
    pub heap_size_post: u64,
    pub perm_util_pre: u64,
    pub perm_util_post: u64,
    pub perm_size_post: u64,
    /// Trailing pause of the whole entry, printed after the perm block.
    pub perm_pause_time: f64,
    pub user_time: f64,
    pub sys_time: f64,
    pub real_time: f64,
    /// Triggered by System.gc().
    pub system: bool,
}

impl FullGcRecord {
    pub fn tenured_reclaimed(&self) -> i64 {
        reclaimed(self.tenured_util_pre, self.tenured_util_post)
    }

    pub fn perm_reclaimed(&self) -> i64 {
        reclaimed(self.perm_util_pre, self.perm_util_post)
    }

    pub fn heap_reclaimed(&self) -> i64 {
        reclaimed(self.heap_util_pre, self.heap_util_post)
    }

    pub const FIELDS: &'static [(&'static str, Accessor<FullGcRecord>)] = &[
        ("timestamp", |r| AttrValue::Float(r.timestamp)),
        ("gc_timestamp", |r| AttrValue::Float(r.gc_timestamp)),
        ("collector", |r| AttrValue::Text(r.collector.clone())),
        ("tenured_util_pre", |r| AttrValue::from_bytes(r.tenured_util_pre)),
        ("tenured_util_post", |r| AttrValue::from_bytes(r.tenured_util_post)),
        ("tenured_size_post", |r| AttrValue::from_bytes(r.tenured_size_post)),
        ("tenured_pause_time", |r| AttrValue::Float(r.tenured_pause_time)),
        ("heap_util_pre", |r| AttrValue::from_bytes(r.heap_util_pre)),
        ("heap_util_post", |r| AttrValue::from_bytes(r.heap_util_post)),
        ("heap_size_post", |r| AttrValue::from_bytes(r.heap_size_post)),
        ("perm_util_pre", |r| AttrValue::from_bytes(r.perm_util_pre)),
        ("perm_util_post", |r| AttrValue::from_bytes(r.perm_util_post)),
        ("perm_size_post", |r| AttrValue::from_bytes(r.perm_size_post)),
        ("perm_pause_time", |r| AttrValue::Float(r.perm_pause_time)),
        ("user_time", |r| AttrValue::Float(r.user_time)),
        ("sys_time", |r| AttrValue::Float(r.sys_time)),
        ("real_time", |r| AttrValue::Float(r.real_time)),
        ("system", |r| AttrValue::Bool(r.system)),
        ("tenured_reclaimed", |r| AttrValue::Int(r.tenured_reclaimed())),
        ("perm_reclaimed", |r| AttrValue::Int(r.perm_reclaimed())),
        ("heap_reclaimed", |r| AttrValue::Int(r.heap_reclaimed())),
    ];
}

/// Storage / wire tag for a record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    YoungGen,
    Full,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::YoungGen => "young_gen",
            RecordKind::Full => "full",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = GcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "young_gen" => Ok(RecordKind::YoungGen),
            "full" => Ok(RecordKind::Full),
            other => Err(GcError::UnsupportedKind(other.to_string())),
        }
    }
}

/// One parsed GC event. Consumers match on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GcRecord {
    YoungGen(YoungGenRecord),
    Full(FullGcRecord),
}

impl GcRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            GcRecord::YoungGen(_) => RecordKind::YoungGen,
            GcRecord::Full(_) => RecordKind::Full,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            GcRecord::YoungGen(r) => r.timestamp,
            GcRecord::Full(r) => r.timestamp,
        }
    }

    pub fn collector(&self) -> &str {
        match self {
            GcRecord::YoungGen(r) => &r.collector,
            GcRecord::Full(r) => &r.collector,
        }
    }

    pub fn heap_size_post(&self) -> u64 {
        match self {
            GcRecord::YoungGen(r) => r.heap_size_post,
            GcRecord::Full(r) => r.heap_size_post,
        }
    }

    pub fn heap_reclaimed(&self) -> i64 {
        match self {
            GcRecord::YoungGen(r) => r.heap_reclaimed(),
            GcRecord::Full(r) => r.heap_reclaimed(),
        }
    }

    /// Named value lookup through the kind's accessor table; None when the kind has no such field.
    pub fn attr(&self, name: &str) -> Option<AttrValue> {
        match self {
            GcRecord::YoungGen(r) => YoungGenRecord::FIELDS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, get)| get(r)),
            GcRecord::Full(r) => FullGcRecord::FIELDS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, get)| get(r)),
        }
    }
}

impl From<YoungGenRecord> for GcRecord {
    fn from(r: YoungGenRecord) -> Self {
        GcRecord::YoungGen(r)
    }
}

impl From<FullGcRecord> for GcRecord {
    fn from(r: FullGcRecord) -> Self {
        GcRecord::Full(r)
    }
}
