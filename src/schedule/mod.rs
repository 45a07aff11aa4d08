pub mod types;
pub mod aggregate;
pub mod estimate;
pub mod assign;
pub mod roster;

pub use types::{HistoricalRecord, Roster, ScheduleEntry, Shift, SlotKey, SlotStats, PLACEHOLDER};
pub use aggregate::{aggregate, stats_by_slot};
pub use estimate::estimate;
pub use assign::assign;
pub use roster::{build_roster, generate_from_records, generate_schedule, ScheduleReport};
