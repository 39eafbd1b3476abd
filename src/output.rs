use crate::cell::Cell;
use crate::loader::Table;
use crate::progress::{END_DATE_COLUMN, PLOTS_TARGETED_COLUMN, START_DATE_COLUMN, STATE_COLUMN};
use crate::types::{LegendRow, Metric, ProgressRecord, ProgressRow};
use crate::util::round1;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table as TextTable, Tabled};

fn metric(value: f64, computed: bool) -> Metric {
    if computed {
        Metric::Computed(round1(value))
    } else {
        Metric::Guarded(0)
    }
}

impl From<&ProgressRecord> for ProgressRow {
    fn from(p: &ProgressRecord) -> Self {
        ProgressRow {
            state: p.record.state.clone(),
            plots_targeted: Cell::Number(p.record.plots_targeted),
            plots_surveyed: Cell::Number(p.plots_surveyed),
            start_date: p.record.start_raw.clone(),
            end_date: p.record.end_raw.clone(),
            days: p.days_elapsed,
            total_days: p.total_days,
            days_elapsed: p.days_elapsed,
            required_per_day: metric(p.required_per_day, p.total_days > 0),
            actual_per_day: metric(p.actual_per_day, p.days_elapsed > 0),
            required_percent: metric(p.required_percent, p.total_days > 0),
            actual_percent: metric(p.actual_percent, p.record.plots_targeted > 0.0),
            gap: p.gap_label.clone(),
        }
    }
}

pub fn to_rows(records: &[ProgressRecord]) -> Vec<ProgressRow> {
    records.iter().map(ProgressRow::from).collect()
}

/// Two-space indented JSON, non-ASCII characters kept as UTF-8.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = render_json(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// JSON of at most the first `max_rows` rows.
pub fn preview_json<T: Serialize>(
    rows: &[T],
    max_rows: usize,
) -> Result<String, serde_json::Error> {
    render_json(&rows[..rows.len().min(max_rows)])
}

/// Outcome of writing the report file and rendering its console preview.
#[derive(Debug)]
pub struct Publication {
    pub written: Result<(), Box<dyn Error>>,
    pub preview: Result<String, serde_json::Error>,
}

/// Write `rows` to `path`, then render the preview from memory. The preview
/// is rendered whether or not the write succeeded.
pub fn publish<T: Serialize>(path: &Path, rows: &[T], preview_rows: usize) -> Publication {
    let written = write_json(path, rows);
    let preview = preview_json(rows, preview_rows);
    Publication { written, preview }
}

pub fn legend_rows() -> Vec<LegendRow> {
    vec![
        LegendRow { key: "a", column: STATE_COLUMN },
        LegendRow { key: "b", column: PLOTS_TARGETED_COLUMN },
        LegendRow { key: "c", column: "Total Plots Surveyed (currently set to 0)" },
        LegendRow { key: "d", column: START_DATE_COLUMN },
        LegendRow { key: "e", column: END_DATE_COLUMN },
    ]
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = TextTable::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Markdown rendering of the header and first `max_rows` rows of a sheet.
pub fn render_head(table: &Table, max_rows: usize) -> String {
    let width = table.column_count();
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().cloned());
    for row in table.rows.iter().take(max_rows) {
        let cells = (0..width).map(|idx| row.get(idx).map(Cell::to_string).unwrap_or_default());
        builder.push_record(cells);
    }
    builder.build().with(Style::markdown()).to_string()
}
