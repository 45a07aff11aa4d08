use std::collections::HashSet;

use super::types::{HistoricalRecord, SlotKey, PLACEHOLDER};

/// Distinct employee names that worked `slot`, in the order they first appear
pub fn available_employees<'a>(slot: &SlotKey, records: &'a [HistoricalRecord]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| slot.matches(r) && !r.employee_name.is_empty())
        .map(|r| r.employee_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Picks `needed` names for `slot` from history, padding with the
/// placeholder when too few are available.
///
/// With `assigned_today`, names already placed that day are skipped and
/// every real name picked here is added to the set.
pub fn assign(
    slot: &SlotKey,
    needed: u32,
    records: &[HistoricalRecord],
    mut assigned_today: Option<&mut HashSet<String>>,
) -> Vec<String> {
    let needed = needed as usize;
    if needed == 0 {
        return Vec::new();
    }

    let mut picked: Vec<String> = available_employees(slot, records)
        .into_iter()
        .filter(|name| {
            assigned_today
                .as_deref()
                .map_or(true, |taken| !taken.contains(*name))
        })
        .take(needed)
        .map(str::to_string)
        .collect();

    if let Some(taken) = assigned_today.as_deref_mut() {
        taken.extend(picked.iter().cloned());
    }

    if picked.len() < needed {
        log::debug!("{slot}: {} of {needed} positions unfilled", needed - picked.len());
        picked.resize(needed, PLACEHOLDER.to_string());
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::Shift;
    use chrono::{Datelike, NaiveDate, Weekday};

    fn record(name: &str, day: u32, shift: Shift, dept: Option<&str>) -> HistoricalRecord {
        // January 2024 starts on a Monday
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        HistoricalRecord {
            employee_name: name.to_string(),
            date,
            day: date.weekday(),
            shift,
            department: dept.map(str::to_string),
            total_sales: 1000.0,
        }
    }

    fn monday_morning() -> SlotKey {
        SlotKey::new(Weekday::Mon, Shift::Morning, None)
    }

    #[test]
    fn keeps_first_seen_order_and_truncates() {
        let records = vec![
            record("Cy", 1, Shift::Morning, None),
            record("Ana", 1, Shift::Morning, None),
            record("Cy", 8, Shift::Morning, None),
            record("Bo", 8, Shift::Morning, None),
            record("Dee", 1, Shift::Night, None),
        ];

        assert_eq!(available_employees(&monday_morning(), &records), vec!["Cy", "Ana", "Bo"]);
        assert_eq!(assign(&monday_morning(), 2, &records, None), vec!["Cy", "Ana"]);
    }

    #[test]
    fn pads_with_placeholder() {
        let records = vec![record("Ana", 1, Shift::Morning, None)];
        assert_eq!(
            assign(&monday_morning(), 2, &records, None),
            vec!["Ana".to_string(), PLACEHOLDER.to_string()]
        );
    }

    #[test]
    fn nothing_needed_nothing_assigned() {
        let records = vec![record("Ana", 1, Shift::Morning, None)];
        let mut taken = HashSet::new();

        assert!(assign(&monday_morning(), 0, &records, Some(&mut taken)).is_empty());
        assert!(taken.is_empty());
    }

    #[test]
    fn exclusion_skips_and_records_names() {
        let records = vec![
            record("Ana", 1, Shift::Morning, None),
            record("Bo", 1, Shift::Morning, None),
            record("Ana", 1, Shift::Night, None),
            record("Cy", 1, Shift::Night, None),
        ];
        let night = SlotKey::new(Weekday::Mon, Shift::Night, None);
        let mut taken = HashSet::new();

        let morning = assign(&monday_morning(), 1, &records, Some(&mut taken));
        assert_eq!(morning, vec!["Ana"]);
        assert!(taken.contains("Ana"));

        let evening = assign(&night, 3, &records, Some(&mut taken));
        assert_eq!(evening, vec!["Cy", PLACEHOLDER, PLACEHOLDER]);
        assert!(!taken.contains(PLACEHOLDER));
        assert_eq!(taken.len(), 2);
    }

    #[test]
    fn without_exclusion_names_can_repeat_across_shifts() {
        let records = vec![
            record("Ana", 1, Shift::Morning, None),
            record("Ana", 1, Shift::Night, None),
        ];
        let night = SlotKey::new(Weekday::Mon, Shift::Night, None);

        assert_eq!(assign(&monday_morning(), 1, &records, None), vec!["Ana"]);
        assert_eq!(assign(&night, 1, &records, None), vec!["Ana"]);
    }

    #[test]
    fn department_slot_only_draws_from_its_department() {
        let records = vec![
            record("Ana", 1, Shift::Morning, Some("Deli")),
            record("Bo", 1, Shift::Morning, Some("Bakery")),
        ];
        let bakery = SlotKey::new(Weekday::Mon, Shift::Morning, Some("Bakery".to_string()));

        assert_eq!(assign(&bakery, 2, &records, None), vec!["Bo", PLACEHOLDER]);
    }
}
