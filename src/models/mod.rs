// Domain models: parsed GC records and the time-series rows projected from them.

mod record;
mod series;

pub use record::{
    Accessor, FullGcRecord, GcRecord, MAX_SIZE_KIB, RecordKind, YoungGenRecord, bytes_to_i64,
    kib_to_bytes,
};
pub use series::{AttrValue, TimeSeriesRow};
