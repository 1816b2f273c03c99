// The closed set of time-series views and their attribute lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GcError;
use crate::models::RecordKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    RawData,
    YoungGenMemory,
    PauseDuration,
    MemoryReclaimed,
    FullGcMemory,
    MemoryUtilPost,
}

impl View {
    pub const ALL: [View; 6] = [
        View::RawData,
        View::YoungGenMemory,
        View::PauseDuration,
        View::MemoryReclaimed,
        View::FullGcMemory,
        View::MemoryUtilPost,
    ];

    /// Stable numeric id, also used as the cache key in storage.
    pub fn id(&self) -> i64 {
        match self {
            View::RawData => 0,
            View::YoungGenMemory => 1,
            View::PauseDuration => 2,
            View::MemoryReclaimed => 3,
            View::FullGcMemory => 4,
            View::MemoryUtilPost => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::RawData => "raw",
            View::YoungGenMemory => "yg-memory",
            View::PauseDuration => "duration",
            View::MemoryReclaimed => "reclaimed",
            View::FullGcMemory => "full-memory",
            View::MemoryUtilPost => "memory-util-post",
        }
    }

    pub fn from_id(id: i64) -> Result<Self, GcError> {
        View::ALL
            .into_iter()
            .find(|v| v.id() == id)
            .ok_or_else(|| GcError::InvalidView(id.to_string()))
    }

    pub fn spec(&self) -> ViewSpec {
        match self {
            View::RawData => ViewSpec {
                view: *self,
                accepts: KindFilter::Any,
                attrs: &[
                    "gc_timestamp",
                    "collector",
                    "yg_util_pre",
                    "yg_util_post",
                    "yg_size_post",
                    "yg_pause_time",
                    "tenured_util_pre",
                    "tenured_util_post",
                    "tenured_size_post",
                    "tenured_pause_time",
                    "heap_util_pre",
                    "heap_util_post",
                    "heap_size_post",
                    "perm_util_pre",
                    "perm_util_post",
                    "perm_size_post",
                    "perm_pause_time",
                    "pause_time",
                    "user_time",
                    "sys_time",
                    "real_time",
                    "system",
                ],
                placeholder_when_empty: false,
            },
            View::YoungGenMemory => ViewSpec {
                view: *self,
                accepts: KindFilter::Only(RecordKind::YoungGen),
                attrs: &[
                    "yg_util_pre",
                    "yg_util_post",
                    "yg_size_post",
                    "heap_util_pre",
                    "heap_util_post",
                    "heap_size_post",
                ],
                placeholder_when_empty: false,
            },
            View::PauseDuration => ViewSpec {
                view: *self,
                accepts: KindFilter::Any,
                attrs: &["yg_pause_time", "pause_time", "tenured_pause_time"],
                placeholder_when_empty: false,
            },
            View::MemoryReclaimed => ViewSpec {
                view: *self,
                accepts: KindFilter::Any,
                attrs: &[
                    "yg_reclaimed",
                    "heap_reclaimed",
                    "tenured_reclaimed",
                    "perm_reclaimed",
                ],
                placeholder_when_empty: false,
            },
            View::FullGcMemory => ViewSpec {
                view: *self,
                accepts: KindFilter::Only(RecordKind::Full),
                attrs: &[
                    "tenured_util_pre",
                    "tenured_util_post",
                    "tenured_size_post",
                    "heap_util_pre",
                    "heap_util_post",
                    "heap_size_post",
                    "perm_util_pre",
                    "perm_util_post",
                    "perm_size_post",
                ],
                placeholder_when_empty: true,
            },
            View::MemoryUtilPost => ViewSpec {
                view: *self,
                accepts: KindFilter::Any,
                attrs: &[
                    "yg_size_post",
                    "tenured_size_post",
                    "perm_size_post",
                    "heap_size_post",
                ],
                placeholder_when_empty: false,
            },
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a view name ("yg-memory") or its numeric id ("1").
impl FromStr for View {
    type Err = GcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(v) = View::ALL.into_iter().find(|v| v.name() == s) {
            return Ok(v);
        }
        match s.parse::<i64>() {
            Ok(id) => View::from_id(id),
            Err(_) => Err(GcError::InvalidView(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Any,
    Only(RecordKind),
}

impl KindFilter {
    pub fn accepts(&self, kind: RecordKind) -> bool {
        match self {
            KindFilter::Any => true,
            KindFilter::Only(k) => *k == kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSpec {
    pub view: View,
    pub accepts: KindFilter,
    pub attrs: &'static [&'static str],
    /// Emit one all-empty row instead of nothing.
    pub placeholder_when_empty: bool,
}
