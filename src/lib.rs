//! Staffing estimates and weekly shift rosters from historical sales records.
//!
//! History rows are grouped by day and shift (optionally department), the
//! sales target is scaled against each slot's historical averages to get a
//! headcount, and employees who worked the slot before are assigned in the
//! order they first appear.

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod schedule;
pub mod web;

pub use config::RosterOptions;
pub use error::{RosterError, RosterResult};
pub use schedule::{generate_schedule, Roster, ScheduleEntry, ScheduleReport};
