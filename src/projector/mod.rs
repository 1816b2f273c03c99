// Time-series projection: records -> rows for one named view.
// Attribute names are resolved against each record kind's accessor table once, when the
// projector is built; projecting only calls the resolved accessors.

mod views;

pub use views::{KindFilter, View, ViewSpec};

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::GcError;
use crate::models::{Accessor, FullGcRecord, GcRecord, TimeSeriesRow, YoungGenRecord};

struct ResolvedAttr {
    name: &'static str,
    young_gen: Option<Accessor<YoungGenRecord>>,
    full: Option<Accessor<FullGcRecord>>,
}

struct ResolvedView {
    spec: ViewSpec,
    attrs: Vec<ResolvedAttr>,
}

impl ResolvedView {
    fn new(spec: ViewSpec) -> Self {
        let attrs = spec
            .attrs
            .iter()
            .map(|name| ResolvedAttr {
                name: *name,
                young_gen: lookup(YoungGenRecord::FIELDS, name),
                full: lookup(FullGcRecord::FIELDS, name),
            })
            .collect();
        Self { spec, attrs }
    }

    fn row(&self, record: &GcRecord) -> TimeSeriesRow {
        let attrs = self
            .attrs
            .iter()
            .map(|a| {
                let value = match record {
                    GcRecord::YoungGen(r) => a.young_gen.map(|get| get(r)),
                    GcRecord::Full(r) => a.full.map(|get| get(r)),
                };
                (a.name, value)
            })
            .collect();
        TimeSeriesRow {
            time_series_key: TimeSeriesRow::TIME_SERIES_KEY,
            time_series_value: Some(record.timestamp()),
            attrs,
        }
    }
}

fn lookup<R>(table: &[(&'static str, Accessor<R>)], name: &str) -> Option<Accessor<R>> {
    table.iter().find(|(n, _)| *n == name).map(|(_, get)| *get)
}

/// Owns the view table. Build once and share; projection never mutates it.
pub struct Projector {
    views: BTreeMap<View, ResolvedView>,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new()
    }
}

impl Projector {
    /// Projector serving every view.
    pub fn new() -> Self {
        Self::with_views(&View::ALL)
    }

    /// Projector serving only `views`; the rest report InvalidView.
    pub fn with_views(views: &[View]) -> Self {
        let views = views
            .iter()
            .map(|v| (*v, ResolvedView::new(v.spec())))
            .collect();
        Self { views }
    }

    pub fn views(&self) -> impl Iterator<Item = View> + '_ {
        self.views.keys().copied()
    }

    pub fn spec(&self, view: View) -> Option<&ViewSpec> {
        self.views.get(&view).map(|v| &v.spec)
    }

    /// Project by view name or id.
    pub fn project(&self, view: &str, records: &[GcRecord]) -> Result<Vec<TimeSeriesRow>, GcError> {
        self.project_view(view.parse()?, records)
    }

    pub fn project_view(
        &self,
        view: View,
        records: &[GcRecord],
    ) -> Result<Vec<TimeSeriesRow>, GcError> {
        let resolved = self
            .views
            .get(&view)
            .ok_or_else(|| GcError::InvalidView(view.name().to_string()))?;

        let mut rows: Vec<TimeSeriesRow> = records
            .iter()
            .filter(|r| resolved.spec.accepts.accepts(r.kind()))
            .map(|r| resolved.row(r))
            .collect();

        if rows.is_empty() && resolved.spec.placeholder_when_empty {
            rows.push(TimeSeriesRow::placeholder(resolved.spec.attrs));
        }
        debug!(view = %view, records = records.len(), rows = rows.len(), "projected view");
        Ok(rows)
    }
}
