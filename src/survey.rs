// District/village coverage counts for the daily survey summary sheet.
use crate::cell::Cell;
use crate::loader::Table;
use crate::types::{CoverageRow, CoverageStats};
use crate::util::format_int;
use std::collections::HashSet;

pub const SURVEY_COUNT_COLUMN: &str = "Total Survey Completed By Surveyor";
pub const DISTRICT_COLUMN: &str = "District Name";
pub const VILLAGE_COLUMN: &str = "Village Name";

pub const REQUIRED_COLUMNS: [&str; 3] = [SURVEY_COUNT_COLUMN, DISTRICT_COLUMN, VILLAGE_COLUMN];

/// Each data row is one village. A village "has surveys" when its count
/// reads as a number above zero; counts that do not read as numbers add
/// nothing to the total.
pub fn analyze(table: &Table) -> CoverageStats {
    let mut total_surveys = 0.0;
    let mut villages_with_surveys = 0usize;
    let mut districts: HashSet<String> = HashSet::new();
    let mut districts_with_surveys: HashSet<String> = HashSet::new();

    for row in table.records() {
        let count = row.get(SURVEY_COUNT_COLUMN).as_number();
        // Names are compared exactly as written; only missing cells are skipped.
        let district = match row.get(DISTRICT_COLUMN) {
            Cell::Empty => None,
            Cell::Number(n) if n.is_nan() => None,
            cell => Some(cell.to_string()),
        };

        total_surveys += count.unwrap_or(0.0);
        let surveyed = count.is_some_and(|c| c > 0.0);
        if surveyed {
            villages_with_surveys += 1;
        }
        if let Some(name) = district {
            if surveyed {
                districts_with_surveys.insert(name.clone());
            }
            districts.insert(name);
        }
    }

    CoverageStats {
        total_surveys,
        villages_with_surveys,
        total_villages: table.row_count(),
        districts_with_surveys: districts_with_surveys.len(),
        total_districts: districts.len(),
    }
}

/// `with / total` as a percentage, or `None` when there is nothing to cover.
pub fn coverage_percent(with: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| with as f64 / total as f64 * 100.0)
}

pub fn coverage_rows(stats: &CoverageStats) -> Vec<CoverageRow> {
    let row = |scope: &str, with: usize, total: usize| CoverageRow {
        scope: scope.to_string(),
        with_surveys: format_int(with),
        total: format_int(total),
        coverage: coverage_percent(with, total)
            .map(|p| format!("{:.1}%", p))
            .unwrap_or_else(|| "-".to_string()),
    };
    vec![
        row("Districts", stats.districts_with_surveys, stats.total_districts),
        row("Villages", stats.villages_with_surveys, stats.total_villages),
    ]
}
