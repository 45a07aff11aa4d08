use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::RosterResult;
use crate::schedule::types::{day_name, Roster, SlotStats};

pub const SCHEDULE_FILENAME: &str = "generated_schedule.csv";
pub const CSV_MIME: &str = "text/csv";

/// Header of the roster table, with `Department` only in department mode
pub fn roster_columns(department_aware: bool) -> Vec<&'static str> {
    let mut columns = vec!["Day", "Shift"];
    if department_aware {
        columns.push("Department");
    }
    columns.extend(["Sales Target ($)", "Employees Needed", "Assigned Employees"]);
    columns
}

/// Roster rendered as table cells, in roster order
pub fn roster_rows(roster: &Roster) -> Vec<Vec<String>> {
    roster
        .entries
        .iter()
        .map(|entry| {
            let mut row = vec![day_name(entry.slot.day).to_string(), entry.slot.shift.to_string()];
            if roster.department_aware {
                row.push(entry.slot.department.clone().unwrap_or_default());
            }
            row.push(entry.sales_target.to_string());
            row.push(entry.employees_needed.to_string());
            row.push(entry.assigned_display());
            row
        })
        .collect()
}

/// Header of the historical averages table
pub fn averages_columns(department_aware: bool) -> Vec<&'static str> {
    let mut columns = vec!["Day", "Employee Shift"];
    if department_aware {
        columns.push("Department");
    }
    columns.extend(["Average Sales ($)", "Average Employees Needed"]);
    columns
}

pub fn averages_rows(averages: &[SlotStats], department_aware: bool) -> Vec<Vec<String>> {
    averages
        .iter()
        .map(|stats| {
            let mut row = vec![day_name(stats.slot.day).to_string(), stats.slot.shift.to_string()];
            if department_aware {
                row.push(stats.slot.department.clone().unwrap_or_default());
            }
            row.push(format!("{:.2}", stats.average_sales));
            row.push(stats.average_employees.to_string());
            row
        })
        .collect()
}

/// Writes the roster as CSV with a header row
pub fn write_roster_csv<W: Write>(roster: &Roster, writer: W) -> RosterResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(roster_columns(roster.department_aware))?;
    for row in roster_rows(roster) {
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Roster as CSV text, ready to send as a download
pub fn roster_to_csv_string(roster: &Roster) -> RosterResult<String> {
    let mut buffer = Vec::new();
    write_roster_csv(roster, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Saves the roster CSV to `path`
pub fn write_roster_to_file<P: AsRef<Path>>(roster: &Roster, path: P) -> RosterResult<()> {
    let file = File::create(path)?;
    write_roster_csv(roster, file)
}
