use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl WorkOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "pending",
            WorkOrderStatus::Assigned => "assigned",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed | WorkOrderStatus::Cancelled)
    }

    /// Legal lifecycle moves: pending -> assigned -> in_progress -> completed,
    /// with cancellation allowed from any non-terminal state.
    pub fn can_become(&self, next: WorkOrderStatus) -> bool {
        match (self, next) {
            (WorkOrderStatus::Pending, WorkOrderStatus::Assigned) => true,
            (WorkOrderStatus::Assigned, WorkOrderStatus::InProgress) => true,
            (WorkOrderStatus::InProgress, WorkOrderStatus::Completed) => true,
            (_, WorkOrderStatus::Cancelled) => !self.is_terminal(),
            _ => false,
        }
    }

    pub fn ensure_can_become(&self, next: WorkOrderStatus) -> DomainResult<()> {
        if self.can_become(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of requested field work.
///
/// Invariant: `Pending` orders carry no engineer; `Assigned`, `InProgress`
/// and `Completed` orders always do. Construction through [`WorkOrder::from_draft`]
/// and transitions through the dispatch service keep this true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub assigned_engineer_id: Option<String>,
    pub estimated_minutes: i64,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkOrder {
    /// Builds the persisted record from a draft. The store assigns `id` and
    /// `created_at`; the initial status is derived from engineer presence.
    pub fn from_draft(draft: NewWorkOrder, id: String, created_at: DateTime<Utc>) -> Self {
        let status = draft.initial_status();
        Self {
            id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            priority: draft.priority,
            status,
            assigned_engineer_id: draft.assigned_engineer_id,
            estimated_minutes: draft.estimated_minutes,
            due_date: draft.due_date,
            created_at,
            completed_at: None,
        }
    }
}

/// Creation payload for a work order; id and timestamps are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkOrder {
    pub title: String,
    pub description: String,
    pub location: String,
    pub priority: Priority,
    pub assigned_engineer_id: Option<String>,
    pub estimated_minutes: i64,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewWorkOrder {
    pub fn initial_status(&self) -> WorkOrderStatus {
        if self.assigned_engineer_id.is_some() {
            WorkOrderStatus::Assigned
        } else {
            WorkOrderStatus::Pending
        }
    }

    /// Creation-time validation; names every missing required field so the
    /// caller can report them inline.
    pub fn validate(&self) -> DomainResult<()> {
        let mut fields = Vec::new();
        if self.title.trim().is_empty() {
            fields.push("title");
        }
        if self.description.trim().is_empty() {
            fields.push("description");
        }
        if self.location.trim().is_empty() {
            fields.push("location");
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(DomainError::MissingFields { fields })
        }
    }
}

/// Partial update; `None` leaves a field untouched. The doubled options
/// distinguish "leave as is" from "clear".
#[derive(Debug, Clone, Default)]
pub struct WorkOrderPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<WorkOrderStatus>,
    pub assigned_engineer_id: Option<Option<String>>,
    pub estimated_minutes: Option<i64>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl WorkOrderPatch {
    pub fn apply_to(self, order: &mut WorkOrder) {
        if let Some(title) = self.title {
            order.title = title;
        }
        if let Some(description) = self.description {
            order.description = description;
        }
        if let Some(location) = self.location {
            order.location = location;
        }
        if let Some(priority) = self.priority {
            order.priority = priority;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(engineer) = self.assigned_engineer_id {
            order.assigned_engineer_id = engineer;
        }
        if let Some(estimated) = self.estimated_minutes {
            order.estimated_minutes = estimated;
        }
        if let Some(due) = self.due_date {
            order.due_date = due;
        }
        if let Some(completed) = self.completed_at {
            order.completed_at = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_status_follows_engineer_presence() {
        let mut draft = NewWorkOrder {
            title: "Replace valve".to_string(),
            description: "Leaking shutoff valve".to_string(),
            location: "Plant 4".to_string(),
            priority: Priority::High,
            assigned_engineer_id: None,
            estimated_minutes: 90,
            due_date: None,
        };
        assert_eq!(draft.initial_status(), WorkOrderStatus::Pending);

        draft.assigned_engineer_id = Some("eng-1".to_string());
        assert_eq!(draft.initial_status(), WorkOrderStatus::Assigned);
    }

    #[test]
    fn validate_names_every_missing_field() {
        let draft = NewWorkOrder {
            title: "  ".to_string(),
            description: String::new(),
            location: "Plant 4".to_string(),
            priority: Priority::Low,
            assigned_engineer_id: None,
            estimated_minutes: 30,
            due_date: None,
        };
        match draft.validate() {
            Err(DomainError::MissingFields { fields }) => {
                assert_eq!(fields, vec!["title", "description"]);
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn cancellation_is_reachable_from_non_terminal_states_only() {
        assert!(WorkOrderStatus::Pending.can_become(WorkOrderStatus::Cancelled));
        assert!(WorkOrderStatus::Assigned.can_become(WorkOrderStatus::Cancelled));
        assert!(WorkOrderStatus::InProgress.can_become(WorkOrderStatus::Cancelled));
        assert!(!WorkOrderStatus::Completed.can_become(WorkOrderStatus::Cancelled));
        assert!(!WorkOrderStatus::Cancelled.can_become(WorkOrderStatus::Cancelled));
    }

    #[test]
    fn lifecycle_skips_are_rejected() {
        assert!(!WorkOrderStatus::Pending.can_become(WorkOrderStatus::InProgress));
        assert!(!WorkOrderStatus::Pending.can_become(WorkOrderStatus::Completed));
        assert!(!WorkOrderStatus::Assigned.can_become(WorkOrderStatus::Completed));
        assert!(!WorkOrderStatus::Completed.can_become(WorkOrderStatus::InProgress));
        assert!(WorkOrderStatus::Assigned.can_become(WorkOrderStatus::InProgress));
    }
}
