// Daily survey coverage: total surveys plus district and village coverage
// from the daily survey summary sheet.
use rabi_report::config::{init_logging, SurveyConfig};
use rabi_report::error::LoadError;
use rabi_report::loader::{self, Table};
use rabi_report::output;
use rabi_report::survey::{
    self, DISTRICT_COLUMN, REQUIRED_COLUMNS, SURVEY_COUNT_COLUMN, VILLAGE_COLUMN,
};
use rabi_report::types::CoverageStats;
use rabi_report::util::{format_count, format_int};

fn load_sheet(config: &SurveyConfig) -> Result<Table, LoadError> {
    let table = loader::load_table(&config.input_path, &config.sheet_name, &[])?;

    println!("Excel file loaded successfully!");
    println!(
        "Shape of data: ({}, {})",
        format_int(table.row_count()),
        format_int(table.column_count())
    );
    println!("Columns in the sheet: {:?}", table.columns);
    println!("\nFirst few rows:");
    println!("{}\n", output::render_head(&table, config.head_rows));

    let missing = table.missing_columns(&REQUIRED_COLUMNS);
    if !missing.is_empty() {
        println!("Available columns:");
        for (i, col) in table.columns.iter().enumerate() {
            println!("{}: {}", i, col);
        }
        return Err(LoadError::MissingColumns(missing));
    }
    Ok(table)
}

fn display_results(stats: &CoverageStats) {
    println!("{}", "=".repeat(50));
    println!("SURVEY ANALYSIS RESULTS");
    println!("{}", "=".repeat(50));
    println!(
        "\nTotal surveys completed today: {}\n",
        format_count(stats.total_surveys)
    );
    output::preview_table_rows(&survey::coverage_rows(stats), 2);
}

fn main() {
    init_logging();
    let config = SurveyConfig::default();

    println!("Reading {} from {}...", config.sheet_name, config.input_path.display());
    let table = match load_sheet(&config) {
        Ok(table) => table,
        Err(e) => {
            println!("Error processing file: {}", e);
            println!("No results to display due to error in processing.");
            return;
        }
    };

    println!("Using columns:");
    println!("  Survey count: '{}'", SURVEY_COUNT_COLUMN);
    println!("  District: '{}'", DISTRICT_COLUMN);
    println!("  Village: '{}'\n", VILLAGE_COLUMN);

    let stats = survey::analyze(&table);
    display_results(&stats);
}
