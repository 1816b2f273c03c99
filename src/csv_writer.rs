// CSV rendering of time-series rows. Header comes from the first row's keys; absent
// values are written as empty fields so columns stay aligned.

use std::io::{self, Write};

use crate::models::TimeSeriesRow;

pub fn header_line(row: &TimeSeriesRow) -> String {
    let mut fields = Vec::with_capacity(row.attrs.len() + 1);
    fields.push(row.time_series_key.to_string());
    fields.extend(row.attrs.iter().map(|(name, _)| name.to_string()));
    fields.join(",")
}

pub fn row_line(row: &TimeSeriesRow) -> String {
    let mut fields = Vec::with_capacity(row.attrs.len() + 1);
    fields.push(row.time_series_display());
    fields.extend(
        row.attrs
            .iter()
            .map(|(_, v)| v.as_ref().map(|v| v.to_string()).unwrap_or_default()),
    );
    fields.join(",")
}

/// Write header + rows, each terminated by '\n'. No rows writes nothing.
pub fn write_csv<W: Write>(rows: &[TimeSeriesRow], out: &mut W) -> io::Result<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    writeln!(out, "{}", header_line(first))?;
    for row in rows {
        writeln!(out, "{}", row_line(row))?;
    }
    Ok(())
}

pub fn to_csv_string(rows: &[TimeSeriesRow]) -> String {
    let mut out = String::new();
    if let Some(first) = rows.first() {
        out.push_str(&header_line(first));
        out.push('\n');
        for row in rows {
            out.push_str(&row_line(row));
            out.push('\n');
        }
    }
    out
}
