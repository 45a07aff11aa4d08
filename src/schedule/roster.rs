use std::collections::HashSet;

use crate::config::{validate_sales_target, RosterOptions, MAX_EMPLOYEES_PER_SLOT};
use crate::error::{RosterError, RosterResult};
use crate::parser::parse_records_str;
use super::aggregate::{aggregate, departments_in_order, stats_by_slot};
use super::assign::assign;
use super::estimate::estimate;
use super::types::{HistoricalRecord, Roster, ScheduleEntry, SlotKey, SlotStats, SHIFTS, WEEKDAYS};

/// Everything one upload produces: the historical averages and the roster
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleReport {
    pub averages: Vec<SlotStats>,
    pub roster: Roster,
}

/// Builds the weekly roster from history and averages already computed.
/// Fails on a non-finite target or when a slot would need more than
/// `MAX_EMPLOYEES_PER_SLOT` people.
pub fn build_roster_from_stats(
    records: &[HistoricalRecord],
    averages: &[SlotStats],
    sales_target: f64,
    options: RosterOptions,
) -> RosterResult<Roster> {
    let sales_target = validate_sales_target(sales_target)?;
    let stats = stats_by_slot(averages);
    let departments: Vec<Option<String>> = if options.department_aware {
        departments_in_order(records).into_iter().map(Some).collect()
    } else {
        vec![None]
    };

    let mut entries = Vec::with_capacity(WEEKDAYS.len() * SHIFTS.len() * departments.len());
    for day in WEEKDAYS {
        // Names already placed today; dropped when the day is done
        let mut assigned_today: HashSet<String> = HashSet::new();

        for shift in SHIFTS {
            for department in &departments {
                let slot = SlotKey::new(day, shift, department.clone());
                let employees_needed = estimate(&slot, sales_target, &stats);
                if employees_needed > MAX_EMPLOYEES_PER_SLOT {
                    return Err(RosterError::HeadcountTooLarge {
                        slot: slot.to_string(),
                        needed: employees_needed,
                        limit: MAX_EMPLOYEES_PER_SLOT,
                    });
                }
                let exclusion = if options.enforce_single_shift_per_day {
                    Some(&mut assigned_today)
                } else {
                    None
                };
                let assigned_employees = assign(&slot, employees_needed, records, exclusion);

                log::debug!("{slot}: need {employees_needed}, assigned [{}]", assigned_employees.join(", "));
                entries.push(ScheduleEntry {
                    slot,
                    sales_target,
                    employees_needed,
                    assigned_employees,
                });
            }
        }
    }

    Ok(Roster {
        department_aware: options.department_aware,
        entries,
    })
}

/// Aggregates history and builds the weekly roster for `sales_target`
pub fn build_roster(records: &[HistoricalRecord], sales_target: f64, options: RosterOptions) -> RosterResult<Roster> {
    let averages = aggregate(records, options.department_aware)?;
    build_roster_from_stats(records, &averages, sales_target, options)
}

/// Runs the whole pipeline over uploaded CSV text
pub fn generate_schedule(csv_text: &str, sales_target: f64, options: RosterOptions) -> RosterResult<ScheduleReport> {
    let records = parse_records_str(csv_text, options.department_aware)?;
    generate_from_records(&records, sales_target, options)
}

/// Runs aggregation and roster building over parsed history
pub fn generate_from_records(
    records: &[HistoricalRecord],
    sales_target: f64,
    options: RosterOptions,
) -> RosterResult<ScheduleReport> {
    let averages = aggregate(records, options.department_aware)?;
    let roster = build_roster_from_stats(records, &averages, sales_target, options)?;

    log::info!(
        "generated roster: {} rows from {} history rows, {} slots with history, target {sales_target}",
        roster.entries.len(),
        records.len(),
        averages.len(),
    );
    Ok(ScheduleReport { averages, roster })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Shift, PLACEHOLDER};
    use chrono::Weekday;

    const SIMPLE: &str = "EmployeeName,Date,Day,Employee Shift,Total Sales ($)\n\
        Ana,2024-01-01,Monday,Morning,1000\n\
        Bo,2024-01-01,Monday,Morning,1000\n\
        Ana,2024-01-01,Monday,Night,1000\n";

    #[test]
    fn covers_every_day_and_shift_in_order() {
        let report = generate_schedule(SIMPLE, 500.0, RosterOptions::simple()).unwrap();
        let slots: Vec<(Weekday, Shift)> = report
            .roster
            .entries
            .iter()
            .map(|e| (e.slot.day, e.slot.shift))
            .collect();

        assert_eq!(slots.len(), 14);
        assert_eq!(slots[0], (Weekday::Mon, Shift::Morning));
        assert_eq!(slots[1], (Weekday::Mon, Shift::Night));
        assert_eq!(slots[13], (Weekday::Sun, Shift::Night));
    }

    #[test]
    fn empty_slots_need_nobody() {
        let report = generate_schedule(SIMPLE, 500.0, RosterOptions::simple()).unwrap();
        let tuesday = &report.roster.entries[2];

        assert_eq!(tuesday.slot.day, Weekday::Tue);
        assert_eq!(tuesday.employees_needed, 0);
        assert_eq!(tuesday.assigned_display(), "");
    }

    #[test]
    fn simple_variant_lets_an_employee_work_both_shifts() {
        let report = generate_schedule(SIMPLE, 1000.0, RosterOptions::simple()).unwrap();
        let entries = &report.roster.entries;

        assert_eq!(entries[0].assigned_employees, vec!["Ana", "Bo"]);
        assert_eq!(entries[1].assigned_employees, vec!["Ana"]);
    }

    #[test]
    fn single_shift_per_day_moves_repeat_names_to_placeholder() {
        let options = RosterOptions::for_variant(false, Some(true));
        let report = generate_schedule(SIMPLE, 1000.0, options).unwrap();
        let entries = &report.roster.entries;

        assert_eq!(entries[0].assigned_employees, vec!["Ana", "Bo"]);
        assert_eq!(entries[1].assigned_employees, vec![PLACEHOLDER]);
    }

    #[test]
    fn non_finite_target_is_rejected() {
        for target in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(
                generate_schedule(SIMPLE, target, RosterOptions::simple()),
                Err(RosterError::InvalidTarget { .. })
            ));
        }
    }

    #[test]
    fn oversized_headcount_is_rejected_before_assignment() {
        // Monday morning: 1e300 / 1000 * 2 saturates the estimate
        match generate_schedule(SIMPLE, 1e300, RosterOptions::simple()) {
            Err(RosterError::HeadcountTooLarge { needed, limit, .. }) => {
                assert!(needed > limit);
                assert_eq!(limit, MAX_EMPLOYEES_PER_SLOT);
            }
            other => panic!("expected headcount error, got {other:?}"),
        }
    }

    #[test]
    fn headcount_at_the_limit_is_allowed() {
        // Monday morning: 500_000 / 1000 * 2 = 1000
        let report = generate_schedule(SIMPLE, 500_000.0, RosterOptions::simple()).unwrap();
        let monday_morning = &report.roster.entries[0];

        assert_eq!(monday_morning.employees_needed, MAX_EMPLOYEES_PER_SLOT);
        assert_eq!(monday_morning.assigned_employees.len(), MAX_EMPLOYEES_PER_SLOT as usize);
    }

    #[test]
    fn department_slots_follow_first_seen_order() {
        let csv = "EmployeeName,Date,Day,Employee Shift,Total Sales ($),Department\n\
            Ana,2024-01-01,Monday,Morning,1000,Deli\n\
            Bo,2024-01-01,Monday,Morning,1000,Bakery\n";
        let report = generate_schedule(csv, 1000.0, RosterOptions::by_department()).unwrap();
        let entries = &report.roster.entries;

        assert!(report.roster.department_aware);
        assert_eq!(entries.len(), 7 * 2 * 2);
        assert_eq!(entries[0].slot.department.as_deref(), Some("Deli"));
        assert_eq!(entries[1].slot.department.as_deref(), Some("Bakery"));
        assert_eq!(entries[0].assigned_employees, vec!["Ana"]);
        assert_eq!(entries[1].assigned_employees, vec!["Bo"]);
    }
}
