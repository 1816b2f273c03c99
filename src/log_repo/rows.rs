// Flat row <-> record mapping for gc_events. Columns that do not apply to a kind are NULL.

use sqlx::Sqlite;
use sqlx::query_builder::Separated;

use crate::models::{FullGcRecord, GcRecord, RecordKind, YoungGenRecord, bytes_to_i64};

pub(super) const EVENT_COLUMNS: &str = "kind, timestamp, gc_timestamp, collector, \
    yg_util_pre, yg_util_post, yg_size_post, yg_pause_time, \
    tenured_util_pre, tenured_util_post, tenured_size_post, tenured_pause_time, \
    heap_util_pre, heap_util_post, heap_size_post, \
    perm_util_pre, perm_util_post, perm_size_post, perm_pause_time, \
    pause_time, user_time, sys_time, real_time, system";

/// Bound parameters per VALUES tuple: log_id plus every EVENT_COLUMNS entry.
pub(super) const BINDS_PER_ROW: usize = 25;

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct EventRow {
    pub kind: String,
    pub timestamp: f64,
    pub gc_timestamp: f64,
    pub collector: String,
    pub yg_util_pre: Option<i64>,
    pub yg_util_post: Option<i64>,
    pub yg_size_post: Option<i64>,
    pub yg_pause_time: Option<f64>,
    pub tenured_util_pre: Option<i64>,
    pub tenured_util_post: Option<i64>,
    pub tenured_size_post: Option<i64>,
    pub tenured_pause_time: Option<f64>,
    pub heap_util_pre: i64,
    pub heap_util_post: i64,
    pub heap_size_post: i64,
    pub perm_util_pre: Option<i64>,
    pub perm_util_post: Option<i64>,
    pub perm_size_post: Option<i64>,
    pub perm_pause_time: Option<f64>,
    pub pause_time: Option<f64>,
    pub user_time: f64,
    pub sys_time: f64,
    pub real_time: f64,
    pub system: Option<bool>,
}

/// Push one record as a VALUES tuple, columns in EVENT_COLUMNS order after log_id.
pub(super) fn push_record(mut b: Separated<'_, '_, Sqlite, &'static str>, log_id: i64, record: &GcRecord) {
    b.push_bind(log_id);
    b.push_bind(record.kind().as_str().to_string());
    match record {
        GcRecord::YoungGen(r) => {
            b.push_bind(r.timestamp)
                .push_bind(r.gc_timestamp)
                .push_bind(r.collector.clone())
                .push_bind(Some(bytes_to_i64(r.yg_util_pre)))
                .push_bind(Some(bytes_to_i64(r.yg_util_post)))
                .push_bind(Some(bytes_to_i64(r.yg_size_post)))
                .push_bind(Some(r.yg_pause_time))
                .push_bind(None::<i64>)
                .push_bind(None::<i64>)
                .push_bind(None::<i64>)
                .push_bind(None::<f64>)
                .push_bind(bytes_to_i64(r.heap_util_pre))
                .push_bind(bytes_to_i64(r.heap_util_post))
                .push_bind(bytes_to_i64(r.heap_size_post))
                .push_bind(None::<i64>)
                .push_bind(None::<i64>)
                .push_bind(None::<i64>)
                .push_bind(None::<f64>)
                .push_bind(Some(r.pause_time))
                .push_bind(r.user_time)
                .push_bind(r.sys_time)
                .push_bind(r.real_time)
                .push_bind(None::<bool>);
        }
        GcRecord::Full(r) => {
            b.push_bind(r.timestamp)
                .push_bind(r.gc_timestamp)
                .push_bind(r.collector.clone())
                .push_bind(None::<i64>)
                .push_bind(None::<i64>)
                .push_bind(None::<i64>)
                .push_bind(None::<f64>)
                .push_bind(Some(bytes_to_i64(r.tenured_util_pre)))
                .push_bind(Some(bytes_to_i64(r.tenured_util_post)))
                .push_bind(Some(bytes_to_i64(r.tenured_size_post)))
                .push_bind(Some(r.tenured_pause_time))
                .push_bind(bytes_to_i64(r.heap_util_pre))
                .push_bind(bytes_to_i64(r.heap_util_post))
                .push_bind(bytes_to_i64(r.heap_size_post))
                .push_bind(Some(bytes_to_i64(r.perm_util_pre)))
                .push_bind(Some(bytes_to_i64(r.perm_util_post)))
                .push_bind(Some(bytes_to_i64(r.perm_size_post)))
                .push_bind(Some(r.perm_pause_time))
                .push_bind(None::<f64>)
                .push_bind(r.user_time)
                .push_bind(r.sys_time)
                .push_bind(r.real_time)
                .push_bind(Some(r.system));
        }
    }
}

fn required<T>(value: Option<T>, column: &str) -> anyhow::Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("gc_events.{} is NULL", column))
}

fn bytes(value: Option<i64>, column: &str) -> anyhow::Result<u64> {
    Ok(required(value, column)? as u64)
}

impl EventRow {
    /// Unknown kind tags are an UnsupportedKind error, never skipped.
    pub(super) fn into_record(self) -> anyhow::Result<GcRecord> {
        let kind: RecordKind = self.kind.parse()?;
        let record = match kind {
            RecordKind::YoungGen => GcRecord::YoungGen(YoungGenRecord {
                timestamp: self.timestamp,
                gc_timestamp: self.gc_timestamp,
                collector: self.collector,
                yg_util_pre: bytes(self.yg_util_pre, "yg_util_pre")?,
                yg_util_post: bytes(self.yg_util_post, "yg_util_post")?,
                yg_size_post: bytes(self.yg_size_post, "yg_size_post")?,
                yg_pause_time: self.yg_pause_time.unwrap_or(0.0),
                heap_util_pre: self.heap_util_pre as u64,
                heap_util_post: self.heap_util_post as u64,
                heap_size_post: self.heap_size_post as u64,
                pause_time: required(self.pause_time, "pause_time")?,
                user_time: self.user_time,
                sys_time: self.sys_time,
                real_time: self.real_time,
            }),
            RecordKind::Full => GcRecord::Full(FullGcRecord {
                timestamp: self.timestamp,
                gc_timestamp: self.gc_timestamp,
                collector: self.collector,
                tenured_util_pre: bytes(self.tenured_util_pre, "tenured_util_pre")?,
                tenured_util_post: bytes(self.tenured_util_post, "tenured_util_post")?,
                tenured_size_post: bytes(self.tenured_size_post, "tenured_size_post")?,
                tenured_pause_time: self.tenured_pause_time.unwrap_or(0.0),
                heap_util_pre: self.heap_util_pre as u64,
                heap_util_post: self.heap_util_post as u64,
                heap_size_post: self.heap_size_post as u64,
                perm_util_pre: bytes(self.perm_util_pre, "perm_util_pre")?,
                perm_util_post: bytes(self.perm_util_post, "perm_util_post")?,
                perm_size_post: bytes(self.perm_size_post, "perm_size_post")?,
                perm_pause_time: required(self.perm_pause_time, "perm_pause_time")?,
                user_time: self.user_time,
                sys_time: self.sys_time,
                real_time: self.real_time,
                system: self.system.unwrap_or(false),
            }),
        };
        Ok(record)
    }
}
