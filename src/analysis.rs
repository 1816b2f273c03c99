// One pass over a log: parse, summarise, render views. Used by the HTTP handlers and the demo.

use std::time::Instant;

use tracing::info;

use crate::csv_writer;
use crate::error::GcError;
use crate::models::GcRecord;
use crate::parser;
use crate::projector::{Projector, View};
use crate::stats::{self, Summary};

#[derive(Debug, Clone)]
pub struct Analysis {
    pub records: Vec<GcRecord>,
    pub summary: Summary,
}

/// Parse and summarise. A log without a single supported GC event is EmptyRecords.
pub fn analyse_str(text: &str) -> Result<Analysis, GcError> {
    let start = Instant::now();
    let records = parser::parse_str(text);
    let summary = stats::summarize(&records)?;
    info!(
        events = records.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "gc log analysed"
    );
    Ok(Analysis { records, summary })
}

pub fn render_view(
    projector: &Projector,
    view: View,
    records: &[GcRecord],
) -> Result<String, GcError> {
    let rows = projector.project_view(view, records)?;
    Ok(csv_writer::to_csv_string(&rows))
}

/// Every view the projector serves, in id order.
pub fn render_all(
    projector: &Projector,
    records: &[GcRecord],
) -> Result<Vec<(View, String)>, GcError> {
    projector
        .views()
        .map(|view| render_view(projector, view, records).map(|csv| (view, csv)))
        .collect()
}
