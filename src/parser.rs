use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};

use crate::error::{RosterError, RosterResult};
use crate::schedule::types::{HistoricalRecord, Shift};

pub const COL_EMPLOYEE: &str = "EmployeeName";
pub const COL_DATE: &str = "Date";
pub const COL_DAY: &str = "Day";
pub const COL_SHIFT: &str = "Employee Shift";
pub const COL_SALES: &str = "Total Sales ($)";
pub const COL_DEPARTMENT: &str = "Department";

/// Columns every upload must carry
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_EMPLOYEE, COL_DATE, COL_DAY, COL_SHIFT, COL_SALES];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

struct Columns {
    employee: usize,
    date: usize,
    shift: usize,
    sales: usize,
    department: Option<usize>,
}

/// Column names an upload needs for the chosen variant
pub fn required_columns(department_aware: bool) -> Vec<&'static str> {
    let mut columns = REQUIRED_COLUMNS.to_vec();
    if department_aware {
        columns.push(COL_DEPARTMENT);
    }
    columns
}

/// Checks the header row and finds the column indices.
/// Every missing column is reported at once.
fn locate_columns(headers: &StringRecord, department_aware: bool) -> RosterResult<Columns> {
    let position = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<String> = required_columns(department_aware)
        .into_iter()
        .filter(|name| position(*name).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(RosterError::Schema { missing });
    }

    // The Day column only has to exist; its value is recomputed from Date.
    let col = |name: &str| position(name).unwrap_or_default();
    Ok(Columns {
        employee: col(COL_EMPLOYEE),
        date: col(COL_DATE),
        shift: col(COL_SHIFT),
        sales: col(COL_SALES),
        department: if department_aware {
            position(COL_DEPARTMENT)
        } else {
            None
        },
    })
}

/// Parses a calendar date in any of the accepted layouts, ignoring a time part
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parses a sales figure, tolerating a currency sign and thousands separators
pub fn parse_sales(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads history rows from any CSV source
pub fn parse_records<R: Read>(source: R, department_aware: bool) -> RosterResult<Vec<HistoricalRecord>> {
    let mut reader = ReaderBuilder::new().from_reader(source);
    let headers = reader.headers()?.clone();
    let columns = locate_columns(&headers, department_aware)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // 1-based, header not counted
        let row = index + 1;
        let field = |i: usize| record.get(i).unwrap_or("");

        let raw_date = field(columns.date);
        let date = parse_date(raw_date).ok_or_else(|| RosterError::DateParse {
            row,
            value: raw_date.to_string(),
        })?;

        let raw_shift = field(columns.shift);
        let shift = raw_shift.parse::<Shift>().map_err(|_| RosterError::InvalidShift {
            row,
            value: raw_shift.to_string(),
        })?;

        let raw_sales = field(columns.sales);
        let total_sales = parse_sales(raw_sales).ok_or_else(|| RosterError::InvalidSales {
            row,
            value: raw_sales.to_string(),
        })?;

        let department = columns
            .department
            .map(|i| field(i).trim().to_string())
            .filter(|d| !d.is_empty());

        records.push(HistoricalRecord {
            employee_name: field(columns.employee).trim().to_string(),
            date,
            day: date.weekday(),
            shift,
            department,
            total_sales,
        });
    }

    log::debug!("parsed {} history rows", records.len());
    Ok(records)
}

/// Reads history rows from uploaded CSV text. A leading byte-order mark is dropped.
pub fn parse_records_str(text: &str, department_aware: bool) -> RosterResult<Vec<HistoricalRecord>> {
    parse_records(text.trim_start_matches('\u{feff}').as_bytes(), department_aware)
}

/// Loads history rows from a CSV file
pub fn load_records<P: AsRef<Path>>(csv_path: P, department_aware: bool) -> RosterResult<Vec<HistoricalRecord>> {
    let file = std::fs::File::open(csv_path)?;
    parse_records(file, department_aware)
}
