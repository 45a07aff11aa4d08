use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};

/// Filler used when a slot needs more people than history can name
pub const PLACEHOLDER: &str = "Not Available";

/// Roster iteration order for days
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Roster iteration order for shifts
pub const SHIFTS: [Shift; 2] = [Shift::Morning, Shift::Night];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shift {
    Morning,
    Night,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Morning => write!(f, "Morning"),
            Shift::Night => write!(f, "Night"),
        }
    }
}

impl FromStr for Shift {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Shift::Morning),
            "night" => Ok(Shift::Night),
            _ => Err(()),
        }
    }
}

/// Full English name of a weekday ("Monday", ...)
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One row of uploaded history. `day` is always derived from `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRecord {
    pub employee_name: String,
    pub date: NaiveDate,
    pub day: Weekday,
    pub shift: Shift,
    pub department: Option<String>,
    pub total_sales: f64,
}

/// Aggregation bucket and scheduling slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub day: Weekday,
    pub shift: Shift,
    pub department: Option<String>,
}

impl SlotKey {
    pub fn new(day: Weekday, shift: Shift, department: Option<String>) -> Self {
        SlotKey { day, shift, department }
    }

    /// Does this record fall into the slot?
    pub fn matches(&self, record: &HistoricalRecord) -> bool {
        record.day == self.day
            && record.shift == self.shift
            && (self.department.is_none() || record.department == self.department)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.department {
            Some(dept) => write!(f, "{} {} [{}]", day_name(self.day), self.shift, dept),
            None => write!(f, "{} {}", day_name(self.day), self.shift),
        }
    }
}

/// Historical averages for one slot
#[derive(Debug, Clone, PartialEq)]
pub struct SlotStats {
    pub slot: SlotKey,
    pub average_sales: f64,
    pub average_employees: u32,
}

/// One row of the generated roster
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub slot: SlotKey,
    pub sales_target: f64,
    pub employees_needed: u32,
    pub assigned_employees: Vec<String>,
}

impl ScheduleEntry {
    /// Assigned names as shown in the table and CSV export
    pub fn assigned_display(&self) -> String {
        self.assigned_employees.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub department_aware: bool,
    pub entries: Vec<ScheduleEntry>,
}
