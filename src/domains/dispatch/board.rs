//! Unification of work orders and schedules into one board item list,
//! and the four-column status grouping the dispatch board renders.

use serde::{Deserialize, Serialize};

use crate::domains::schedule::{Schedule, ScheduleStatus};
use crate::domains::work_order::{Priority, WorkOrder, WorkOrderStatus};

/// One entry on the dispatch board: a work order or a schedule, carried
/// whole so downstream grouping and filtering lose no fields. Transient;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardItem {
    WorkOrder(WorkOrder),
    Schedule(Schedule),
}

/// The board column a status buckets into. `None` (cancelled or otherwise
/// out of vocabulary) means the item appears in no column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardColumn {
    Unassigned,
    Assigned,
    InProgress,
    Completed,
}

impl BoardItem {
    pub fn title(&self) -> &str {
        match self {
            BoardItem::WorkOrder(order) => &order.title,
            BoardItem::Schedule(schedule) => &schedule.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            BoardItem::WorkOrder(order) => &order.description,
            BoardItem::Schedule(schedule) => &schedule.description,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            BoardItem::WorkOrder(order) => &order.location,
            BoardItem::Schedule(schedule) => &schedule.location,
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            BoardItem::WorkOrder(order) => order.priority,
            BoardItem::Schedule(schedule) => schedule.priority,
        }
    }

    /// The engineer reference relevant to this item kind. Work orders carry
    /// their assignee, schedules their owner; the two fields stay distinct
    /// on purpose (see [`super::filter::BoardFilter`]).
    pub fn engineer_ref(&self) -> Option<&str> {
        match self {
            BoardItem::WorkOrder(order) => order.assigned_engineer_id.as_deref(),
            BoardItem::Schedule(schedule) => Some(schedule.engineer_id.as_str()),
        }
    }

    pub fn column(&self) -> Option<BoardColumn> {
        match self {
            BoardItem::WorkOrder(order) => match order.status {
                WorkOrderStatus::Pending => Some(BoardColumn::Unassigned),
                WorkOrderStatus::Assigned => Some(BoardColumn::Assigned),
                WorkOrderStatus::InProgress => Some(BoardColumn::InProgress),
                WorkOrderStatus::Completed => Some(BoardColumn::Completed),
                WorkOrderStatus::Cancelled => None,
            },
            BoardItem::Schedule(schedule) => match schedule.status {
                ScheduleStatus::Scheduled => Some(BoardColumn::Assigned),
                ScheduleStatus::InProgress => Some(BoardColumn::InProgress),
                ScheduleStatus::Completed => Some(BoardColumn::Completed),
                ScheduleStatus::Cancelled => None,
            },
        }
    }
}

/// Merges the two record kinds into one list, work orders first. Ordering is
/// not significant; the board re-groups by status anyway. Total and lossless.
pub fn unify(work_orders: Vec<WorkOrder>, schedules: Vec<Schedule>) -> Vec<BoardItem> {
    let mut items = Vec::with_capacity(work_orders.len() + schedules.len());
    items.extend(work_orders.into_iter().map(BoardItem::WorkOrder));
    items.extend(schedules.into_iter().map(BoardItem::Schedule));
    items
}

/// The four dispatch-board columns. Items whose status buckets nowhere
/// (cancelled) are dropped, not an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardColumns {
    pub unassigned: Vec<BoardItem>,
    pub assigned: Vec<BoardItem>,
    pub in_progress: Vec<BoardItem>,
    pub completed: Vec<BoardItem>,
}

impl BoardColumns {
    pub fn from_items(items: &[BoardItem]) -> Self {
        let mut columns = Self::default();
        for item in items {
            match item.column() {
                Some(BoardColumn::Unassigned) => columns.unassigned.push(item.clone()),
                Some(BoardColumn::Assigned) => columns.assigned.push(item.clone()),
                Some(BoardColumn::InProgress) => columns.in_progress.push(item.clone()),
                Some(BoardColumn::Completed) => columns.completed.push(item.clone()),
                None => {}
            }
        }
        columns
    }

    pub fn total(&self) -> usize {
        self.unassigned.len() + self.assigned.len() + self.in_progress.len() + self.completed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::schedule::TimeWindow;
    use chrono::{TimeZone, Utc};

    fn order(id: &str, status: WorkOrderStatus) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            title: format!("order {id}"),
            description: "inspect pump".to_string(),
            location: "Plant 4".to_string(),
            priority: Priority::Medium,
            status,
            assigned_engineer_id: match status {
                WorkOrderStatus::Pending => None,
                _ => Some("e1".to_string()),
            },
            estimated_minutes: 60,
            due_date: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    fn schedule(id: &str, status: ScheduleStatus) -> Schedule {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 10, 11, 0, 0).unwrap();
        Schedule {
            id: id.to_string(),
            title: format!("visit {id}"),
            description: "site visit".to_string(),
            engineer_id: "e1".to_string(),
            window: TimeWindow::new(start, end).unwrap(),
            status,
            priority: Priority::Low,
            location: "Plant 4".to_string(),
            work_order_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unify_keeps_every_record_and_tags_it() {
        let orders = vec![
            order("w1", WorkOrderStatus::Pending),
            order("w2", WorkOrderStatus::Assigned),
        ];
        let schedules = vec![schedule("s1", ScheduleStatus::Scheduled)];

        let items = unify(orders, schedules);
        assert_eq!(items.len(), 3);
        assert!(matches!(items[0], BoardItem::WorkOrder(_)));
        assert!(matches!(items[2], BoardItem::Schedule(_)));
        assert_eq!(items[2].title(), "visit s1");
    }

    #[test]
    fn every_in_vocabulary_status_lands_in_exactly_one_column() {
        let items = unify(
            vec![
                order("w1", WorkOrderStatus::Pending),
                order("w2", WorkOrderStatus::Assigned),
                order("w3", WorkOrderStatus::InProgress),
                order("w4", WorkOrderStatus::Completed),
            ],
            vec![
                schedule("s1", ScheduleStatus::Scheduled),
                schedule("s2", ScheduleStatus::InProgress),
                schedule("s3", ScheduleStatus::Completed),
            ],
        );

        let columns = BoardColumns::from_items(&items);
        assert_eq!(columns.unassigned.len(), 1);
        assert_eq!(columns.assigned.len(), 2); // assigned order + scheduled booking
        assert_eq!(columns.in_progress.len(), 2);
        assert_eq!(columns.completed.len(), 2);
        assert_eq!(columns.total(), items.len());
    }

    #[test]
    fn cancelled_items_appear_in_no_column() {
        let items = unify(
            vec![order("w1", WorkOrderStatus::Cancelled)],
            vec![schedule("s1", ScheduleStatus::Cancelled)],
        );
        let columns = BoardColumns::from_items(&items);
        assert_eq!(columns.total(), 0);
    }

    #[test]
    fn engineer_ref_uses_the_kind_specific_field() {
        let pending = BoardItem::WorkOrder(order("w1", WorkOrderStatus::Pending));
        let assigned = BoardItem::WorkOrder(order("w2", WorkOrderStatus::Assigned));
        let booked = BoardItem::Schedule(schedule("s1", ScheduleStatus::Scheduled));

        assert_eq!(pending.engineer_ref(), None);
        assert_eq!(assigned.engineer_ref(), Some("e1"));
        assert_eq!(booked.engineer_ref(), Some("e1"));
    }
}
