// Fixed run configuration. Neither binary takes flags; the inputs are
// expected in the working directory under these names.
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub input_path: PathBuf,
    pub sheet_name: String,
    pub output_path: PathBuf,
    pub preview_rows: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        ProgressConfig {
            input_path: PathBuf::from("Rabi_Plan_Sheet1.xlsx"),
            sheet_name: "Sheet 1".to_string(),
            output_path: PathBuf::from("sheet2_data.json"),
            preview_rows: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SurveyConfig {
    pub input_path: PathBuf,
    pub sheet_name: String,
    pub head_rows: usize,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        SurveyConfig {
            input_path: PathBuf::from(
                "DAILY_SURVEY_SUMMARY_REPORT_1210832_2026-01-13_00_42_51.816.xlsx",
            ),
            sheet_name: "Daily_Survey Summary Report".to_string(),
            head_rows: 5,
        }
    }
}

/// Route `tracing` events to stderr, filtered by `RUST_LOG` (default `warn`)
/// so the run log on stdout stays as printed.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
