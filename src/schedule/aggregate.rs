use std::collections::{HashMap, HashSet};

use crate::error::{RosterError, RosterResult};
use crate::parser::COL_DEPARTMENT;
use super::types::{HistoricalRecord, SlotKey, SlotStats};

struct Bucket<'a> {
    slot: SlotKey,
    sales_total: f64,
    rows: u32,
    names: HashSet<&'a str>,
}

/// Departments in the order they first appear in history
pub fn departments_in_order(records: &[HistoricalRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.department.as_deref())
        .filter(|d| seen.insert(*d))
        .map(str::to_string)
        .collect()
}

/// Groups history by slot into average sales and distinct employee counts.
/// Only slots present in history are returned, Monday to Sunday, Morning
/// before Night, departments in first-seen order.
pub fn aggregate(records: &[HistoricalRecord], department_aware: bool) -> RosterResult<Vec<SlotStats>> {
    if department_aware && records.iter().any(|r| r.department.is_none()) {
        return Err(RosterError::Schema {
            missing: vec![COL_DEPARTMENT.to_string()],
        });
    }

    let mut index: HashMap<SlotKey, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for record in records {
        let slot = SlotKey::new(
            record.day,
            record.shift,
            if department_aware {
                record.department.clone()
            } else {
                None
            },
        );
        let i = *index.entry(slot.clone()).or_insert_with(|| {
            buckets.push(Bucket {
                slot,
                sales_total: 0.0,
                rows: 0,
                names: HashSet::new(),
            });
            buckets.len() - 1
        });

        let bucket = &mut buckets[i];
        bucket.sales_total += record.total_sales;
        bucket.rows += 1;
        if !record.employee_name.is_empty() {
            bucket.names.insert(record.employee_name.as_str());
        }
    }

    let departments = departments_in_order(records);
    let department_rank = |slot: &SlotKey| {
        slot.department
            .as_ref()
            .and_then(|d| departments.iter().position(|known| known == d))
            .unwrap_or(0)
    };

    let mut stats: Vec<SlotStats> = buckets
        .into_iter()
        .map(|b| SlotStats {
            average_sales: b.sales_total / f64::from(b.rows),
            average_employees: b.names.len() as u32,
            slot: b.slot,
        })
        .collect();
    stats.sort_by_key(|s| {
        (
            s.slot.day.num_days_from_monday(),
            s.slot.shift,
            department_rank(&s.slot),
        )
    });

    log::debug!("aggregated {} history rows into {} slots", records.len(), stats.len());
    Ok(stats)
}

/// Lookup table for the estimator
pub fn stats_by_slot(stats: &[SlotStats]) -> HashMap<SlotKey, SlotStats> {
    stats.iter().map(|s| (s.slot.clone(), s.clone())).collect()
}
