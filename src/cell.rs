// Typed spreadsheet cells.
//
// Workbook and CSV readers hand back loosely typed values. Everything is
// mapped into `Cell` once at load time so the rest of the crate can match
// on a closed set of variants and pick an explicit coercion per field.
use crate::util::{excel_serial_to_datetime, parse_date_dayfirst, parse_f64_safe};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

/// Rendering used for date cells in console and JSON output.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
    Bool(bool),
    Empty,
}

impl Cell {
    /// Build a cell from raw text, treating an empty field as `Empty`.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    /// `true` for empty cells, whitespace-only text and NaN numbers.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
            Cell::Date(_) | Cell::Bool(_) => false,
        }
    }

    /// Numeric reading of the cell.
    ///
    /// Text goes through `parse_f64_safe`, so `"1,200"` reads as `1200.0`
    /// while `"abc"` reads as `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            Cell::Text(s) => parse_f64_safe(Some(s)),
            _ => None,
        }
    }

    /// Date reading of the cell.
    ///
    /// Numbers are Excel serial days; text is parsed day-first.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Date(dt) => Some(*dt),
            Cell::Number(n) => excel_serial_to_datetime(*n),
            Cell::Text(s) => parse_date_dayfirst(s),
            Cell::Bool(_) | Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => match integral(*n) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", n),
            },
            Cell::Text(s) => f.write_str(s),
            Cell::Date(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
            Cell::Bool(true) => f.write_str("TRUE"),
            Cell::Bool(false) => f.write_str("FALSE"),
            Cell::Empty => Ok(()),
        }
    }
}

/// JSON coercion:
/// dates become `"YYYY-MM-DD HH:MM:SS"`, blanks become `null`, integral
/// numbers become integers, other numbers stay floats and anything else is
/// stringified.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Number(n) if !n.is_finite() => serializer.serialize_none(),
            Cell::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Cell::Date(dt) => serializer.collect_str(&dt.format(DATE_TIME_FORMAT)),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Bool(_) => serializer.collect_str(self),
        }
    }
}

// i64 covers every whole number a sheet count can hold exactly.
fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        Some(n as i64)
    } else {
        None
    }
}
