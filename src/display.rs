use crate::export::{averages_columns, averages_rows, roster_columns, roster_rows};
use crate::schedule::types::{Roster, SlotStats};

/// Lays out a header and rows as a fixed-width text table
pub fn render_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(columns.to_vec()));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&format_line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

/// Prints the historical averages by slot
pub fn print_averages(averages: &[SlotStats], department_aware: bool) {
    println!("\n=== Historical Average Sales and Employees by Shift ===");
    if averages.is_empty() {
        println!("(no historical rows)");
        return;
    }
    print!(
        "{}",
        render_table(&averages_columns(department_aware), &averages_rows(averages, department_aware))
    );
}

/// Prints the generated roster with a short summary
pub fn print_roster(roster: &Roster) {
    println!("\n=== Generated Employee Schedule for the Upcoming Week ===");
    print!("{}", render_table(&roster_columns(roster.department_aware), &roster_rows(roster)));

    let needed: u32 = roster.entries.iter().map(|e| e.employees_needed).sum();
    let unfilled = roster
        .entries
        .iter()
        .flat_map(|e| &e.assigned_employees)
        .filter(|name| name.as_str() == crate::schedule::PLACEHOLDER)
        .count();
    println!("Total positions: {needed}");
    if unfilled > 0 {
        println!("⚠️  Positions without an available employee: {unfilled}");
    }
}
