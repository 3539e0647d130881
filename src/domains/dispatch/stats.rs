//! Derived board statistics: plain O(n) counting folds, recomputed on every
//! call. Nothing here is maintained incrementally.

use std::collections::HashMap;

use serde::Serialize;

use super::board::{BoardColumn, BoardItem};
use crate::domains::engineer::{Engineer, EngineerStatus};
use crate::domains::work_order::Priority;

/// Item totals per priority across the (already filtered) board list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityTally {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub urgent: usize,
}

impl PriorityTally {
    pub fn count(items: &[BoardItem]) -> Self {
        let mut tally = Self::default();
        for item in items {
            match item.priority() {
                Priority::Low => tally.low += 1,
                Priority::Medium => tally.medium += 1,
                Priority::High => tally.high += 1,
                Priority::Urgent => tally.urgent += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.urgent
    }
}

/// Engineers per roster status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub active: usize,
    pub available: usize,
    pub busy: usize,
    pub inactive: usize,
    pub on_leave: usize,
}

impl StatusTally {
    pub fn count(roster: &[Engineer]) -> Self {
        let mut tally = Self::default();
        for engineer in roster {
            match engineer.status {
                EngineerStatus::Active => tally.active += 1,
                EngineerStatus::Available => tally.available += 1,
                EngineerStatus::Busy => tally.busy += 1,
                EngineerStatus::Inactive => tally.inactive += 1,
                EngineerStatus::OnLeave => tally.on_leave += 1,
            }
        }
        tally
    }
}

/// Open (not completed, not cancelled) board items per engineer id. Items
/// with no engineer reference are skipped.
pub fn engineer_load(items: &[BoardItem]) -> HashMap<String, usize> {
    let mut load = HashMap::new();
    for item in items {
        let open = matches!(
            item.column(),
            Some(BoardColumn::Unassigned | BoardColumn::Assigned | BoardColumn::InProgress)
        );
        if !open {
            continue;
        }
        if let Some(engineer_id) = item.engineer_ref() {
            *load.entry(engineer_id.to_string()).or_insert(0) += 1;
        }
    }
    load
}
