// Entry point for the Rabi DCS progress report.
//
// Single pass, no flags:
// - reads the plan sheet from the working directory,
// - derives per-state progress metrics against one "now",
// - writes them as a JSON array and previews the first few records.
//
// Every failure is printed and the process still exits normally.
use chrono::{Local, NaiveDateTime};
use rabi_report::config::{init_logging, ProgressConfig};
use rabi_report::error::LoadError;
use rabi_report::loader::{self, Table};
use rabi_report::output;
use rabi_report::progress::{self, REQUIRED_COLUMNS};
use rabi_report::util::format_int;

/// Read the plan sheet, printing the outcome.
fn handle_load(config: &ProgressConfig) -> Option<Table> {
    let path = &config.input_path;
    if !path.exists() {
        println!("Error: '{}' not found in current directory.", path.display());
        println!("Please ensure the file is in the same directory as this program.");
        return None;
    }

    println!("Reading {} from {}...", config.sheet_name, path.display());
    match loader::load_table(path, &config.sheet_name, &REQUIRED_COLUMNS) {
        Ok(table) => {
            println!(
                "{} loaded successfully with {} rows and {} columns.",
                config.sheet_name,
                format_int(table.row_count()),
                format_int(table.column_count())
            );
            Some(table)
        }
        Err(e @ LoadError::NotFound(_)) => {
            println!("Error: {}", e);
            None
        }
        Err(e) => {
            println!("Error reading Excel file: {}", e);
            None
        }
    }
}

/// Calculate, write and preview the report.
///
/// A failed write is reported but the preview still runs from memory.
fn handle_generate_report(config: &ProgressConfig, table: &Table, now: NaiveDateTime) {
    println!("Generating progress data with calculations...");
    let records = progress::generate_progress(table, now);
    println!("Generated {} rows.", format_int(records.len()));

    println!("Converting to JSON format...");
    let rows = output::to_rows(&records);
    let outcome = output::publish(&config.output_path, &rows, config.preview_rows);
    match outcome.written {
        Ok(()) => println!("Progress data saved to {}", config.output_path.display()),
        Err(e) => println!("Error saving JSON file: {}", e),
    }

    println!("\nColumn Mapping:\n");
    output::preview_table_rows(&output::legend_rows(), 5);

    println!("First {} records in JSON format:", config.preview_rows);
    match outcome.preview {
        Ok(json) => println!("{}", json),
        Err(e) => println!("Error displaying preview: {}", e),
    }
}

fn main() {
    init_logging();
    let config = ProgressConfig::default();
    let Some(table) = handle_load(&config) else {
        return;
    };
    // One snapshot for every row.
    let now = Local::now().naive_local();
    handle_generate_report(&config, &table, now);
}
