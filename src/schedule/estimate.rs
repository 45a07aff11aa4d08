use std::collections::HashMap;

use super::types::{SlotKey, SlotStats};

/// Employees needed to hit `target_sales` in `slot`, scaling the slot's
/// historical headcount by the ratio of target to historical average sales.
///
/// Returns 0 when history has nothing usable for the slot (no rows, or an
/// average of zero sales). Otherwise the ratio is rounded half away from
/// zero (4.5 becomes 5) and at least one employee is scheduled.
pub fn estimate(slot: &SlotKey, target_sales: f64, stats: &HashMap<SlotKey, SlotStats>) -> u32 {
    let Some(history) = stats.get(slot) else {
        return 0;
    };

    if history.average_sales == 0.0 {
        log::warn!("{slot}: historical average sales is zero, no estimate possible");
        return 0;
    }

    let required = (target_sales / history.average_sales) * f64::from(history.average_employees);
    if !required.is_finite() {
        log::warn!("{slot}: estimate is not a finite number ({required})");
        return 0;
    }

    let rounded = required.round();
    if rounded < 1.0 {
        1
    } else if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::Shift;
    use chrono::Weekday;

    fn monday_morning() -> SlotKey {
        SlotKey::new(Weekday::Mon, Shift::Morning, None)
    }

    fn table(average_sales: f64, average_employees: u32) -> HashMap<SlotKey, SlotStats> {
        let slot = monday_morning();
        HashMap::from([(
            slot.clone(),
            SlotStats {
                slot,
                average_sales,
                average_employees,
            },
        )])
    }

    #[test]
    fn scales_headcount_with_target() {
        assert_eq!(estimate(&monday_morning(), 2000.0, &table(1000.0, 1)), 2);
        assert_eq!(estimate(&monday_morning(), 2000.0, &table(1000.0, 2)), 4);
        assert_eq!(estimate(&monday_morning(), 1000.0, &table(1000.0, 2)), 2);
    }

    #[test]
    fn half_rounds_up() {
        // 1500 / 1000 * 3 = 4.5
        assert_eq!(estimate(&monday_morning(), 1500.0, &table(1000.0, 3)), 5);
        // 2500 / 1000 * 1 = 2.5
        assert_eq!(estimate(&monday_morning(), 2500.0, &table(1000.0, 1)), 3);
        // 1400 / 1000 * 3 = 4.2
        assert_eq!(estimate(&monday_morning(), 1400.0, &table(1000.0, 3)), 4);
    }

    #[test]
    fn at_least_one_when_history_exists() {
        assert_eq!(estimate(&monday_morning(), 500.0, &table(10_000.0, 1)), 1);
        assert_eq!(estimate(&monday_morning(), 1.0, &table(1000.0, 5)), 1);
    }

    #[test]
    fn zero_without_history() {
        let other = SlotKey::new(Weekday::Fri, Shift::Night, None);
        assert_eq!(estimate(&other, 500.0, &table(1000.0, 2)), 0);
        assert_eq!(estimate(&monday_morning(), 500.0, &HashMap::new()), 0);
    }

    #[test]
    fn zero_average_sales_is_guarded() {
        assert_eq!(estimate(&monday_morning(), 2000.0, &table(0.0, 3)), 0);
    }
}
