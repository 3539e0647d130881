//! Board filtering: priority, engineer and status criteria ANDed together.

use serde::{Deserialize, Serialize};

use super::board::BoardItem;
use crate::domains::schedule::ScheduleStatus;
use crate::domains::work_order::{Priority, WorkOrderStatus};

/// The union of both status vocabularies, as exposed by the board's status
/// dropdown. Each item kind matches only its own vocabulary: a work order
/// never matches `Scheduled`, a schedule never matches `Pending` or
/// `Assigned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Pending,
    Assigned,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl StatusFilter {
    fn matches(&self, item: &BoardItem) -> bool {
        match item {
            BoardItem::WorkOrder(order) => matches!(
                (self, order.status),
                (StatusFilter::Pending, WorkOrderStatus::Pending)
                    | (StatusFilter::Assigned, WorkOrderStatus::Assigned)
                    | (StatusFilter::InProgress, WorkOrderStatus::InProgress)
                    | (StatusFilter::Completed, WorkOrderStatus::Completed)
                    | (StatusFilter::Cancelled, WorkOrderStatus::Cancelled)
            ),
            BoardItem::Schedule(schedule) => matches!(
                (self, schedule.status),
                (StatusFilter::Scheduled, ScheduleStatus::Scheduled)
                    | (StatusFilter::InProgress, ScheduleStatus::InProgress)
                    | (StatusFilter::Completed, ScheduleStatus::Completed)
                    | (StatusFilter::Cancelled, ScheduleStatus::Cancelled)
            ),
        }
    }
}

/// Filter criteria for the unified board list. `None` means "all" for that
/// axis; the three predicates AND together.
///
/// The engineer predicate keeps the historical per-kind asymmetry: work
/// orders are matched on `assigned_engineer_id`, schedules on `engineer_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardFilter {
    pub priority: Option<Priority>,
    pub engineer_id: Option<String>,
    pub status: Option<StatusFilter>,
}

impl BoardFilter {
    pub fn matches(&self, item: &BoardItem) -> bool {
        if let Some(priority) = self.priority {
            if item.priority() != priority {
                return false;
            }
        }
        if let Some(engineer_id) = &self.engineer_id {
            if item.engineer_ref() != Some(engineer_id.as_str()) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if !status.matches(item) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, items: Vec<BoardItem>) -> Vec<BoardItem> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}
