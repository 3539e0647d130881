use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};
use crate::domains::work_order::Priority;

/// A half-open `[start, end)` interval. Back-to-back windows do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.end > self.start {
            Ok(())
        } else {
            Err(DomainError::InvalidWindow {
                start: self.start,
                end: self.end,
            })
        }
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::InProgress => "in_progress",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed time block for one engineer, optionally linked to the work
/// order that produced it. Status mirrors the linked order when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub engineer_id: String,
    pub window: TimeWindow,
    pub status: ScheduleStatus,
    pub priority: Priority,
    pub location: String,
    pub work_order_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    /// Builds the persisted record from a draft. New bookings always start
    /// out as `Scheduled`.
    pub fn from_draft(draft: NewSchedule, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            engineer_id: draft.engineer_id,
            window: draft.window,
            status: ScheduleStatus::Scheduled,
            priority: draft.priority,
            location: draft.location,
            work_order_id: draft.work_order_id,
            created_at,
        }
    }
}

/// Creation payload for a schedule entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSchedule {
    pub title: String,
    pub description: String,
    pub engineer_id: String,
    pub window: TimeWindow,
    pub priority: Priority,
    pub location: String,
    pub work_order_id: Option<String>,
}

impl NewSchedule {
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
        if self.engineer_id.trim().is_empty() {
            fields.push("engineer_id");
        }
        if !fields.is_empty() {
            return Err(DomainError::MissingFields { fields });
        }
        self.window.validate()
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct SchedulePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub engineer_id: Option<String>,
    pub window: Option<TimeWindow>,
    pub status: Option<ScheduleStatus>,
    pub priority: Option<Priority>,
    pub location: Option<String>,
    pub work_order_id: Option<Option<String>>,
}

impl SchedulePatch {
    pub fn status(status: ScheduleStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, schedule: &mut Schedule) {
        if let Some(title) = self.title {
            schedule.title = title;
        }
        if let Some(description) = self.description {
            schedule.description = description;
        }
        if let Some(engineer_id) = self.engineer_id {
            schedule.engineer_id = engineer_id;
        }
        if let Some(window) = self.window {
            schedule.window = window;
        }
        if let Some(status) = self.status {
            schedule.status = status;
        }
        if let Some(priority) = self.priority {
            schedule.priority = priority;
        }
        if let Some(location) = self.location {
            schedule.location = location;
        }
        if let Some(work_order_id) = self.work_order_id {
            schedule.work_order_id = work_order_id;
        }
    }
}
