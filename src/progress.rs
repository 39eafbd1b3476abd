// Row projection and progress calculation for the Rabi DCS plan.
//
// Projection pulls the four plan fields out of each sheet row and coerces
// them, defaulting instead of failing. Calculation is a pure function of a
// projected row and one "now" snapshot shared by the whole run.
use crate::cell::Cell;
use crate::loader::{SourceRow, Table};
use crate::types::{ProgressRecord, ProjectedRecord};
use crate::util::days_between;
use chrono::NaiveDateTime;
use tracing::debug;

pub const STATE_COLUMN: &str = "State";
pub const PLOTS_TARGETED_COLUMN: &str = "No. of Plots Targeted for Rabi DCS";
pub const START_DATE_COLUMN: &str = "Rabi DCS Activity Start Date";
pub const END_DATE_COLUMN: &str = "Rabi DCS Activity End Date";

pub const REQUIRED_COLUMNS: [&str; 4] = [
    STATE_COLUMN,
    PLOTS_TARGETED_COLUMN,
    START_DATE_COLUMN,
    END_DATE_COLUMN,
];

/// Plots surveyed so far. No survey-count feed is wired in yet, so actual
/// progress is always measured against zero.
pub const TOTAL_PLOTS_SURVEYED: f64 = 0.0;

pub const AHEAD_GLYPH: &str = "\u{2705}";
pub const BEHIND_GLYPH: &str = "\u{1F53B}";

/// Project one sheet row. Rows without a state are dropped.
pub fn project_row(row: &SourceRow<'_>) -> Option<ProjectedRecord> {
    let state = row.get(STATE_COLUMN);
    if state.is_blank() {
        return None;
    }
    let start_raw = row.get(START_DATE_COLUMN).clone();
    let end_raw = row.get(END_DATE_COLUMN).clone();
    Some(ProjectedRecord {
        state: state.to_string(),
        plots_targeted: coerce_plots(row.get(PLOTS_TARGETED_COLUMN)),
        start_date: start_raw.as_datetime(),
        end_date: end_raw.as_datetime(),
        start_raw,
        end_raw,
    })
}

/// Lazily project every row of `table`, in sheet order.
pub fn project_rows(table: &Table) -> impl Iterator<Item = ProjectedRecord> + '_ {
    table.records().filter_map(|row| project_row(&row))
}

fn coerce_plots(cell: &Cell) -> f64 {
    cell.as_number().unwrap_or(0.0)
}

/// Derive the progress metrics of one record as of `now`.
pub fn calculate(record: ProjectedRecord, now: NaiveDateTime) -> ProgressRecord {
    let (total_days, days_elapsed) = match (record.start_date, record.end_date) {
        (Some(start), Some(end)) => {
            let total = days_between(start, end);
            // min-then-max: an end before the start must not panic a clamp.
            let elapsed = days_between(start, now).min(total).max(0);
            (total, elapsed)
        }
        _ => (0, 0),
    };
    let plots_surveyed = TOTAL_PLOTS_SURVEYED;

    let required_per_day = if total_days > 0 {
        record.plots_targeted / total_days as f64
    } else {
        0.0
    };
    let actual_per_day = if days_elapsed > 0 {
        plots_surveyed / days_elapsed as f64
    } else {
        0.0
    };
    let required_percent = if total_days > 0 {
        days_elapsed as f64 / total_days as f64 * 100.0
    } else {
        0.0
    };
    let actual_percent = if record.plots_targeted > 0.0 {
        plots_surveyed / record.plots_targeted * 100.0
    } else {
        0.0
    };
    let gap = actual_percent - required_percent;

    ProgressRecord {
        record,
        plots_surveyed,
        total_days,
        days_elapsed,
        required_per_day,
        actual_per_day,
        required_percent,
        actual_percent,
        gap,
        gap_label: gap_label(gap),
    }
}

/// Signed, one-decimal label for a gap: `✅ +2.5%` or `🔻-40.0%`.
pub fn gap_label(gap: f64) -> String {
    if gap >= 0.0 {
        format!("{} +{:.1}%", AHEAD_GLYPH, gap.abs())
    } else {
        format!("{}{:.1}%", BEHIND_GLYPH, gap)
    }
}

/// Project and calculate every row of `table` against one `now`.
pub fn generate_progress(table: &Table, now: NaiveDateTime) -> Vec<ProgressRecord> {
    let records: Vec<ProgressRecord> = project_rows(table)
        .map(|record| calculate(record, now))
        .collect();
    debug!(
        kept = records.len(),
        skipped = table.row_count() - records.len(),
        "projected plan rows"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::resolve_header;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn plan(rows: Vec<Vec<Cell>>) -> Table {
        let mut raw = vec![REQUIRED_COLUMNS.iter().map(|c| text(c)).collect()];
        raw.extend(rows);
        resolve_header(raw, &REQUIRED_COLUMNS).unwrap()
    }

    fn record(
        targeted: f64,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> ProjectedRecord {
        ProjectedRecord {
            state: "Bihar".into(),
            plots_targeted: targeted,
            start_raw: Cell::Empty,
            end_raw: Cell::Empty,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn bihar_scenario() {
        let table = plan(vec![vec![
            text("Bihar"),
            text("1,200"),
            text("01/01/2026"),
            text("31/01/2026"),
        ]]);
        let out = generate_progress(&table, day(2026, 1, 13));
        assert_eq!(out.len(), 1);
        let p = &out[0];
        assert_eq!(p.record.plots_targeted, 1200.0);
        assert_eq!(p.total_days, 30);
        assert_eq!(p.days_elapsed, 12);
        assert_eq!(p.required_per_day, 40.0);
        assert_eq!(p.required_percent, 40.0);
        assert_eq!(p.actual_per_day, 0.0);
        assert_eq!(p.actual_percent, 0.0);
        assert_eq!(p.gap, -40.0);
        assert_eq!(p.gap_label, format!("{}-40.0%", BEHIND_GLYPH));
    }

    #[test]
    fn missing_end_date_zeroes_durations() {
        let p = calculate(record(500.0, Some(day(2026, 1, 1)), None), day(2026, 1, 13));
        assert_eq!(p.total_days, 0);
        assert_eq!(p.days_elapsed, 0);
        assert_eq!(p.required_per_day, 0.0);
        assert_eq!(p.required_percent, 0.0);
        assert_eq!(p.gap_label, format!("{} +0.0%", AHEAD_GLYPH));
    }

    #[test]
    fn uncoercible_target_defaults_to_zero() {
        let table = plan(vec![vec![
            text("Assam"),
            text("abc"),
            text("01/01/2026"),
            text("31/01/2026"),
        ]]);
        let p = &generate_progress(&table, day(2026, 1, 13))[0];
        assert_eq!(p.record.plots_targeted, 0.0);
        assert_eq!(p.actual_percent, 0.0);
        assert_eq!(p.required_per_day, 0.0);
    }

    #[test]
    fn blank_states_are_skipped() {
        let table = plan(vec![
            vec![Cell::Empty, text("10"), Cell::Empty, Cell::Empty],
            vec![text("   "), text("10"), Cell::Empty, Cell::Empty],
            vec![text("Goa"), text("10"), Cell::Empty, Cell::Empty],
        ]);
        let states: Vec<String> = project_rows(&table).map(|r| r.state).collect();
        assert_eq!(states, vec!["Goa"]);
    }

    #[test]
    fn header_only_table_yields_nothing() {
        let table = plan(vec![]);
        assert!(generate_progress(&table, day(2026, 1, 13)).is_empty());
    }

    #[test]
    fn elapsed_is_clamped_to_the_window() {
        let r = record(300.0, Some(day(2026, 1, 1)), Some(day(2026, 1, 31)));
        let before = calculate(r.clone(), day(2025, 12, 1));
        assert_eq!(before.days_elapsed, 0);
        assert_eq!(before.required_percent, 0.0);

        let after = calculate(r, day(2026, 3, 1));
        assert_eq!(after.days_elapsed, 30);
        assert_eq!(after.required_percent, 100.0);
    }

    #[test]
    fn elapsed_never_exceeds_total_for_any_now() {
        let r = record(300.0, Some(day(2026, 1, 1)), Some(day(2026, 2, 15)));
        for offset in -20..80 {
            let now = day(2026, 1, 1) + chrono::TimeDelta::days(offset);
            let p = calculate(r.clone(), now);
            assert!(p.days_elapsed >= 0 && p.days_elapsed <= p.total_days);
            assert!(p.required_percent >= 0.0 && p.required_percent <= 100.0);
        }
    }

    #[test]
    fn reversed_dates_pass_negative_total_through() {
        let p = calculate(
            record(300.0, Some(day(2026, 1, 31)), Some(day(2026, 1, 1))),
            day(2026, 1, 13),
        );
        assert_eq!(p.total_days, -30);
        assert_eq!(p.days_elapsed, 0);
        assert_eq!(p.required_per_day, 0.0);
        assert_eq!(p.required_percent, 0.0);
    }

    #[test]
    fn unparseable_dates_keep_the_row() {
        let table = plan(vec![vec![
            text("Punjab"),
            Cell::Number(900.0),
            text("someday"),
            text("31/01/2026"),
        ]]);
        let p = &generate_progress(&table, day(2026, 1, 13))[0];
        assert_eq!(p.record.start_date, None);
        assert!(p.record.end_date.is_some());
        assert_eq!(p.record.start_raw, text("someday"));
        assert_eq!(p.total_days, 0);
    }

    #[test]
    fn gap_labels() {
        assert_eq!(gap_label(2.46), format!("{} +2.5%", AHEAD_GLYPH));
        assert_eq!(gap_label(0.0), format!("{} +0.0%", AHEAD_GLYPH));
        assert_eq!(gap_label(-33.333), format!("{}-33.3%", BEHIND_GLYPH));
    }
}
