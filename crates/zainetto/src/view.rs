//! Display-order projection over the assignment collection.
//!
//! Pure functions of the current collection, recomputed on every read.
//! Nothing here caches or mutates.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::types::Assignment;

/// Sort assignments for display.
///
/// Incomplete assignments come before completed ones; within each group
/// earlier deadlines sort first. Entries with equal status and deadline
/// keep their input order.
pub fn display_order(assignments: &[Assignment]) -> Vec<&Assignment> {
    let mut ordered: Vec<&Assignment> = assignments.iter().collect();
    ordered.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.deadline.cmp(&b.deadline))
    });
    ordered
}

/// Group assignments by deadline day for the calendar view, earliest day first
pub fn by_deadline_day(assignments: &[Assignment]) -> BTreeMap<NaiveDate, Vec<&Assignment>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&Assignment>> = BTreeMap::new();
    for assignment in assignments {
        grouped
            .entry(assignment.deadline.date_naive())
            .or_default()
            .push(assignment);
    }
    grouped
}
