// Time-series rows: one record projected onto one view's attribute list.

use std::fmt;

use serde::Serialize;

use super::bytes_to_i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl AttrValue {
    pub fn from_bytes(bytes: u64) -> Self {
        AttrValue::Int(bytes_to_i64(bytes))
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write_float(f, *v),
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Text(v) => f.write_str(v),
        }
    }
}

/// Shortest round-trip form, keeping one fractional digit for whole numbers ("0.0", "250.75").
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_finite() && v.fract() == 0.0 {
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesRow {
    /// Always "timestamp".
    pub time_series_key: &'static str,
    /// None only for a placeholder row.
    pub time_series_value: Option<f64>,
    /// Declared attribute order is preserved; None means the record kind has no such field.
    pub attrs: Vec<(&'static str, Option<AttrValue>)>,
}

impl TimeSeriesRow {
    pub const TIME_SERIES_KEY: &'static str = "timestamp";

    /// Row with every value absent, emitted for views that must never be empty.
    pub fn placeholder(attr_names: &[&'static str]) -> Self {
        Self {
            time_series_key: Self::TIME_SERIES_KEY,
            time_series_value: None,
            attrs: attr_names.iter().map(|n| (*n, None)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Time value rendered the same way as attribute values; empty for a placeholder.
    pub fn time_series_display(&self) -> String {
        self.time_series_value
            .map(|v| AttrValue::Float(v).to_string())
            .unwrap_or_default()
    }
}
