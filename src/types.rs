use crate::cell::Cell;
use chrono::NaiveDateTime;
use serde::Serialize;
use tabled::Tabled;

/// The four fields the progress report reads from a plan row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRecord {
    pub state: String,
    pub plots_targeted: f64,
    /// Start/end cells exactly as read, echoed back in the report.
    pub start_raw: Cell,
    pub end_raw: Cell,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub record: ProjectedRecord,
    pub plots_surveyed: f64,
    pub total_days: i64,
    pub days_elapsed: i64,
    pub required_per_day: f64,
    pub actual_per_day: f64,
    pub required_percent: f64,
    pub actual_percent: f64,
    pub gap: f64,
    pub gap_label: String,
}

/// A rate or percentage in the report. Values that were never divided out
/// (zero denominator) are written as the integer `0`, computed ones as floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    Guarded(i64),
    Computed(f64),
}

/// One object of the JSON report. Field order is the key order on disk.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressRow {
    #[serde(rename = "a")]
    pub state: String,
    #[serde(rename = "b")]
    pub plots_targeted: Cell,
    #[serde(rename = "c")]
    pub plots_surveyed: Cell,
    #[serde(rename = "d")]
    pub start_date: Cell,
    #[serde(rename = "e")]
    pub end_date: Cell,
    pub days: i64,
    #[serde(rename = "Total Days")]
    pub total_days: i64,
    #[serde(rename = "Days Elapsed")]
    pub days_elapsed: i64,
    #[serde(rename = "Required /day")]
    pub required_per_day: Metric,
    #[serde(rename = "Actual /day")]
    pub actual_per_day: Metric,
    #[serde(rename = "Required % (Time elapsed)")]
    pub required_percent: Metric,
    #[serde(rename = "Actual % (Survey done)")]
    pub actual_percent: Metric,
    #[serde(rename = "Gap")]
    pub gap: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct LegendRow {
    #[tabled(rename = "Key")]
    pub key: &'static str,
    #[tabled(rename = "Column")]
    pub column: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageStats {
    pub total_surveys: f64,
    pub villages_with_surveys: usize,
    pub total_villages: usize,
    pub districts_with_surveys: usize,
    pub total_districts: usize,
}

#[derive(Debug, Tabled, Clone)]
pub struct CoverageRow {
    #[tabled(rename = "Scope")]
    pub scope: String,
    #[tabled(rename = "With Surveys")]
    pub with_surveys: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Coverage")]
    pub coverage: String,
}
