use crate::cell::Cell;
use crate::error::LoadError;
use crate::util::parse_date_dayfirst;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{info, warn};

static EMPTY: Cell = Cell::Empty;

/// A sheet with a resolved header row.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Zero-based index (among non-blank sheet rows) of the row used as header.
    pub header_row: usize,
}

/// One data row viewed through its table's column names.
#[derive(Debug, Clone, Copy)]
pub struct SourceRow<'a> {
    columns: &'a [String],
    cells: &'a [Cell],
}

impl<'a> SourceRow<'a> {
    /// Cell under `column`, or `Cell::Empty` when the column or the cell is absent.
    pub fn get(&self, column: &str) -> &'a Cell {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(&EMPTY)
    }

    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Required names that are not among this table's columns, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        missing_from(&self.columns, required)
    }

    pub fn records(&self) -> impl Iterator<Item = SourceRow<'_>> + '_ {
        self.rows.iter().map(move |cells| SourceRow {
            columns: &self.columns,
            cells,
        })
    }
}

/// Load `sheet` from the workbook at `path` and resolve its header so that
/// every name in `required` is a column.
///
/// `.csv` files are read as a single-sheet workbook and `sheet` is ignored.
pub fn load_table(path: &Path, sheet: &str, required: &[&str]) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let raw = if is_csv {
        read_csv_rows(path)?
    } else {
        read_workbook_rows(path, sheet)?
    };
    info!(path = %path.display(), sheet, rows = raw.len(), "read sheet");
    resolve_header(raw, required)
}

fn read_workbook_rows(path: &Path, sheet: &str) -> Result<Vec<Vec<Cell>>, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(LoadError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }
    let range = workbook.worksheet_range(sheet)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<Cell>>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }
    Ok(rows)
}

/// Map a calamine value into a [`Cell`].
pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::from_text(s),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            crate::util::excel_serial_to_datetime(serial)
                .map_or(Cell::Number(serial), Cell::Date)
        }
        Data::DateTimeIso(s) => {
            parse_date_dayfirst(s).map_or_else(|| Cell::from_text(s), Cell::Date)
        }
        Data::DurationIso(s) => Cell::from_text(s),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// Pick the header row for a raw sheet.
///
/// The first row is tried as the header; when it lacks any of the
/// `required` names the second row is tried, and the first row is then
/// discarded as a title/placeholder row. Fully blank rows are ignored.
pub fn resolve_header(raw: Vec<Vec<Cell>>, required: &[&str]) -> Result<Table, LoadError> {
    let mut rows: Vec<Vec<Cell>> = raw
        .into_iter()
        .filter(|row| !row.iter().all(Cell::is_blank))
        .collect();
    if rows.is_empty() {
        return Err(LoadError::EmptyTable);
    }

    let declared = header_names(&rows[0]);
    let missing = missing_from(&declared, required);
    if missing.is_empty() {
        info!(header_row = 0, columns = declared.len(), "resolved sheet header");
        rows.remove(0);
        return Ok(Table {
            columns: declared,
            rows,
            header_row: 0,
        });
    }

    if rows.len() > 1 {
        let fallback = header_names(&rows[1]);
        if missing_from(&fallback, required).is_empty() {
            warn!(
                missing = ?missing,
                "declared header lacks required columns, using the next row as header"
            );
            let rows = rows.split_off(2);
            return Ok(Table {
                columns: fallback,
                rows,
                header_row: 1,
            });
        }
    }
    Err(LoadError::MissingColumns(missing))
}

fn header_names(row: &[Cell]) -> Vec<String> {
    row.iter()
        .enumerate()
        .map(|(idx, cell)| match cell.to_string().trim() {
            "" => format!("Column {}", idx + 1),
            name => name.to_string(),
        })
        .collect()
}

fn missing_from(columns: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !columns.iter().any(|c| c == *name))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn declared_header_is_used_when_complete() {
        let raw = vec![
            vec![text("State"), text("Target")],
            vec![text("Bihar"), Cell::Number(10.0)],
        ];
        let table = resolve_header(raw, &["State", "Target"]).unwrap();
        assert_eq!(table.header_row, 0);
        assert_eq!(table.columns, vec!["State", "Target"]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn placeholder_header_falls_back_to_first_data_row() {
        let raw = vec![
            vec![text("Rabi Plan"), Cell::Empty, Cell::Empty],
            vec![text("S.No"), text("State"), text("Target")],
            vec![Cell::Number(1.0), text("Bihar"), text("1,200")],
            vec![Cell::Number(2.0), text("Assam"), text("800")],
        ];
        let table = resolve_header(raw, &["State", "Target"]).unwrap();
        assert_eq!(table.header_row, 1);
        assert_eq!(table.columns, vec!["S.No", "State", "Target"]);
        assert_eq!(table.row_count(), 2);
        let first = table.records().next().unwrap();
        assert_eq!(first.get("State"), &text("Bihar"));
    }

    #[test]
    fn neither_candidate_reports_missing_columns() {
        let raw = vec![vec![text("Foo")], vec![text("Bar")]];
        match resolve_header(raw, &["State", "Foo"]) {
            Err(LoadError::MissingColumns(missing)) => assert_eq!(missing, vec!["State"]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn blank_rows_and_empty_sheets() {
        let raw = vec![
            vec![text("State")],
            vec![Cell::Empty],
            vec![text(" ")],
            vec![text("Goa")],
        ];
        let table = resolve_header(raw, &["State"]).unwrap();
        assert_eq!(table.row_count(), 1);

        assert!(matches!(
            resolve_header(vec![vec![Cell::Empty]], &[]),
            Err(LoadError::EmptyTable)
        ));
    }

    #[test]
    fn header_only_sheet_has_no_rows() {
        let table = resolve_header(vec![vec![text("State")]], &["State"]).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let raw = vec![
            vec![text("State"), text("Target"), Cell::Empty],
            vec![text("Bihar")],
        ];
        let table = resolve_header(raw, &[]).unwrap();
        assert_eq!(table.columns[2], "Column 3");
        let row = table.records().next().unwrap();
        assert_eq!(row.get("Target"), &Cell::Empty);
        assert_eq!(row.get("Nope"), &Cell::Empty);
        assert_eq!(table.column_index("Target"), Some(1));
    }

    #[test]
    fn csv_files_load_as_single_sheet() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plan.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "State,Target").unwrap();
        writeln!(f, "Bihar,\"1,200\"").unwrap();
        writeln!(f, "Assam,").unwrap();
        drop(f);

        let table = load_table(&path, "ignored", &["State", "Target"]).unwrap();
        assert_eq!(table.row_count(), 2);
        let rows: Vec<_> = table.records().collect();
        assert_eq!(rows[0].get("Target"), &text("1,200"));
        assert_eq!(rows[1].get("Target"), &Cell::Empty);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.xlsx");
        assert!(matches!(
            load_table(&path, "Sheet 1", &[]),
            Err(LoadError::NotFound(_))
        ));
    }

    #[test]
    fn calamine_values_map_to_cells() {
        assert_eq!(cell_from_data(&Data::Int(4)), Cell::Number(4.0));
        assert_eq!(cell_from_data(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(cell_from_data(&Data::String("x".into())), text("x"));
        assert_eq!(cell_from_data(&Data::String(String::new())), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert!(matches!(
            cell_from_data(&Data::DateTimeIso("2026-01-01T00:00:00".into())),
            Cell::Date(_)
        ));
    }
}
