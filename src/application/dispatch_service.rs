//! Orchestration of the work-order lifecycle and its paired schedule.
//!
//! Each store call is an independent round-trip; there are no cross-record
//! transactions. Where the lifecycle demands both-or-neither (creating an
//! assigned work order together with its schedule), the service compensates:
//! a failed schedule write deletes the fresh work order or reverts the
//! assignment patch. Status mirrors onto an existing schedule are
//! best-effort only; their failures go to the injected [`DomainLogger`] and
//! never roll back the work-order side.

use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use tracing::{debug, info, warn};

use crate::common::{ApplicationResult, DomainError, DomainResult};
use crate::config::DispatchConfig;
use crate::domains::dispatch::{ScheduleStore, WorkOrderStore};
use crate::domains::logger::DynLogger;
use crate::domains::schedule::{
    find_conflicts, NewSchedule, Schedule, SchedulePatch, ScheduleStatus, TimeWindow,
};
use crate::domains::work_order::{NewWorkOrder, WorkOrder, WorkOrderPatch, WorkOrderStatus};

pub struct DispatchService {
    work_orders: Arc<dyn WorkOrderStore>,
    schedules: Arc<dyn ScheduleStore>,
    logger: DynLogger,
    config: DispatchConfig,
}

impl DispatchService {
    pub fn new(
        work_orders: Arc<dyn WorkOrderStore>,
        schedules: Arc<dyn ScheduleStore>,
        logger: DynLogger,
        config: DispatchConfig,
    ) -> Self {
        Self {
            work_orders,
            schedules,
            logger,
            config,
        }
    }

    /// Creates a work order. With no engineer chosen the order lands as
    /// `Pending` and no schedule exists. With an engineer chosen the order
    /// lands as `Assigned` together with exactly one `Scheduled` booking
    /// carrying the same title/location and the work-order link; the booking
    /// window is `window` when supplied, otherwise derived from the due date
    /// and estimate. Both-or-neither: a failed schedule write deletes the
    /// order again before the error propagates.
    pub async fn create_work_order(
        &self,
        draft: NewWorkOrder,
        window: Option<TimeWindow>,
    ) -> ApplicationResult<WorkOrder> {
        draft.validate()?;

        let engineer_id = draft.assigned_engineer_id.clone();
        let window = match (&engineer_id, window) {
            (Some(engineer), explicit) => {
                let window = match explicit {
                    Some(w) => {
                        w.validate()?;
                        w
                    }
                    None => self.derive_window(Utc::now(), draft.due_date, draft.estimated_minutes),
                };
                self.guard_conflicts(engineer, &window).await?;
                Some(window)
            }
            (None, _) => None,
        };

        let order = self.work_orders.create(draft).await?;
        info!(id = %order.id, status = %order.status, "work order created");

        if let (Some(engineer_id), Some(window)) = (engineer_id, window) {
            let booking = NewSchedule {
                title: order.title.clone(),
                description: order.description.clone(),
                engineer_id,
                window,
                priority: order.priority,
                location: order.location.clone(),
                work_order_id: Some(order.id.clone()),
            };
            if let Err(err) = self.schedules.create(booking).await {
                // Compensating action: no orphaned Assigned order.
                warn!(id = %order.id, error = %err, "schedule write failed, deleting work order");
                self.work_orders.delete(&order.id).await?;
                return Err(err.into());
            }
        }

        Ok(order)
    }

    /// Assigns an engineer to a pending work order and creates the linked
    /// schedule. When `window` is absent one is derived: the configured
    /// workday hour on the due date's day (or the next upcoming occurrence
    /// when no due date), lasting `ceil(estimated_minutes / 60)` hours with
    /// the configured minimum. A failed schedule write reverts the order to
    /// `Pending` with no engineer.
    pub async fn assign_engineer(
        &self,
        work_order_id: &str,
        engineer_id: &str,
        window: Option<TimeWindow>,
    ) -> ApplicationResult<WorkOrder> {
        let order = self.get_order(work_order_id).await?;
        order.status.ensure_can_become(WorkOrderStatus::Assigned)?;

        let window = match window {
            Some(w) => {
                w.validate()?;
                w
            }
            None => self.derive_window(Utc::now(), order.due_date, order.estimated_minutes),
        };
        self.guard_conflicts(engineer_id, &window).await?;

        let patch = WorkOrderPatch {
            status: Some(WorkOrderStatus::Assigned),
            assigned_engineer_id: Some(Some(engineer_id.to_string())),
            ..Default::default()
        };
        let updated = self.work_orders.update(work_order_id, patch).await?;
        info!(id = %work_order_id, engineer = %engineer_id, "work order assigned");

        let booking = NewSchedule {
            title: updated.title.clone(),
            description: updated.description.clone(),
            engineer_id: engineer_id.to_string(),
            window,
            priority: updated.priority,
            location: updated.location.clone(),
            work_order_id: Some(updated.id.clone()),
        };
        if let Err(err) = self.schedules.create(booking).await {
            warn!(id = %work_order_id, error = %err, "schedule write failed, reverting assignment");
            let revert = WorkOrderPatch {
                status: Some(WorkOrderStatus::Pending),
                assigned_engineer_id: Some(None),
                ..Default::default()
            };
            self.work_orders.update(work_order_id, revert).await?;
            return Err(err.into());
        }

        Ok(updated)
    }

    /// `Assigned → InProgress`; mirrors the linked schedule best-effort.
    pub async fn start_work(&self, work_order_id: &str) -> ApplicationResult<WorkOrder> {
        let order = self.get_order(work_order_id).await?;
        order.status.ensure_can_become(WorkOrderStatus::InProgress)?;

        let patch = WorkOrderPatch {
            status: Some(WorkOrderStatus::InProgress),
            ..Default::default()
        };
        let updated = self.work_orders.update(work_order_id, patch).await?;
        info!(id = %work_order_id, "work started");

        self.mirror_schedule_status(work_order_id, ScheduleStatus::InProgress)
            .await;
        Ok(updated)
    }

    /// `InProgress → Completed`; stamps `completed_at` and mirrors the
    /// linked schedule best-effort.
    pub async fn complete_work(&self, work_order_id: &str) -> ApplicationResult<WorkOrder> {
        let order = self.get_order(work_order_id).await?;
        order.status.ensure_can_become(WorkOrderStatus::Completed)?;

        let patch = WorkOrderPatch {
            status: Some(WorkOrderStatus::Completed),
            completed_at: Some(Some(Utc::now())),
            ..Default::default()
        };
        let updated = self.work_orders.update(work_order_id, patch).await?;
        info!(id = %work_order_id, "work completed");

        self.mirror_schedule_status(work_order_id, ScheduleStatus::Completed)
            .await;
        Ok(updated)
    }

    /// Cancels a work order from any non-terminal state; mirrors the linked
    /// schedule best-effort.
    pub async fn cancel_work_order(&self, work_order_id: &str) -> ApplicationResult<WorkOrder> {
        let order = self.get_order(work_order_id).await?;
        order.status.ensure_can_become(WorkOrderStatus::Cancelled)?;

        let patch = WorkOrderPatch {
            status: Some(WorkOrderStatus::Cancelled),
            ..Default::default()
        };
        let updated = self.work_orders.update(work_order_id, patch).await?;
        info!(id = %work_order_id, "work order cancelled");

        self.mirror_schedule_status(work_order_id, ScheduleStatus::Cancelled)
            .await;
        Ok(updated)
    }

    /// Standalone calendar booking, used by the schedule calendar rather
    /// than the work-order flow. Conflict-guarded like every other booking.
    pub async fn create_schedule(&self, draft: NewSchedule) -> ApplicationResult<Schedule> {
        draft.validate()?;
        self.guard_conflicts(&draft.engineer_id, &draft.window)
            .await?;
        let schedule = self.schedules.create(draft).await?;
        info!(id = %schedule.id, engineer = %schedule.engineer_id, "schedule created");
        Ok(schedule)
    }

    async fn get_order(&self, id: &str) -> DomainResult<WorkOrder> {
        self.work_orders
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                kind: "work order",
                id: id.to_string(),
            })
    }

    /// Refuses the candidate window when it overlaps any of the engineer's
    /// committed (non-cancelled) bookings, naming every offender.
    async fn guard_conflicts(&self, engineer_id: &str, window: &TimeWindow) -> DomainResult<()> {
        let existing: Vec<Schedule> = self
            .schedules
            .list_by_engineer(engineer_id)
            .await?
            .into_iter()
            .filter(|schedule| schedule.status != ScheduleStatus::Cancelled)
            .collect();

        let conflicts = find_conflicts(engineer_id, window, &existing);
        if conflicts.is_empty() {
            return Ok(());
        }
        Err(DomainError::ScheduleConflict {
            engineer: engineer_id.to_string(),
            titles: conflicts.iter().map(|s| s.title.clone()).collect(),
        })
    }

    /// Pushes `status` onto the schedule linked to `work_order_id`, if one
    /// exists. A missing schedule is tolerated silently; a failed update is
    /// logged and swallowed (the work-order transition already happened and
    /// is not rolled back).
    async fn mirror_schedule_status(&self, work_order_id: &str, status: ScheduleStatus) {
        let linked = match self.schedules.list().await {
            Ok(schedules) => schedules
                .into_iter()
                .find(|schedule| schedule.work_order_id.as_deref() == Some(work_order_id)),
            Err(err) => {
                self.logger.warn(&format!(
                    "could not list schedules to mirror work order {work_order_id}: {err}"
                ));
                return;
            }
        };

        let Some(schedule) = linked else {
            debug!(id = %work_order_id, "no linked schedule to mirror");
            return;
        };

        if let Err(err) = self
            .schedules
            .update(&schedule.id, SchedulePatch::status(status))
            .await
        {
            self.logger.warn(&format!(
                "failed to mirror status {status} onto schedule {}: {err}",
                schedule.id
            ));
        }
    }

    /// Default booking window for an assignment made without an explicit
    /// time range: the configured workday hour on the due date's day, or the
    /// next upcoming occurrence of that hour when there is no due date (or
    /// it is already past). Length is the estimate rounded up to whole
    /// hours, never below the configured minimum.
    fn derive_window(
        &self,
        now: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
        estimated_minutes: i64,
    ) -> TimeWindow {
        let at_workday_hour = |instant: DateTime<Utc>| {
            instant
                .with_hour(self.config.workday_start_hour)
                .and_then(|t| t.with_minute(0))
                .and_then(|t| t.with_second(0))
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(instant)
        };

        let start = match due_date.filter(|due| *due > now) {
            Some(due) => at_workday_hour(due),
            None => {
                let today = at_workday_hour(now);
                if today > now {
                    today
                } else {
                    today + Duration::days(1)
                }
            }
        };

        let hours = ((estimated_minutes.max(0) + 59) / 60).max(self.config.min_window_hours);
        TimeWindow {
            start,
            end: start + Duration::hours(hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::inbound::InMemoryRecordStore;
    use crate::adapters::outbound::init_noop_logger;
    use chrono::TimeZone;

    fn service() -> DispatchService {
        let store = Arc::new(InMemoryRecordStore::new());
        DispatchService::new(
            store.clone(),
            store,
            init_noop_logger(),
            DispatchConfig::default(),
        )
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn derived_window_uses_due_date_day_and_rounds_up() {
        let svc = service();
        let now = at(8);
        let due = Utc.with_ymd_and_hms(2025, 3, 14, 17, 30, 0).unwrap();

        let window = svc.derive_window(now, Some(due), 90);
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()
        );
        assert_eq!(window.duration_minutes(), 120); // ceil(90 / 60) hours
    }

    #[test]
    fn derived_window_without_due_date_books_the_next_workday_hour() {
        let svc = service();

        // Before 09:00: today still works.
        let window = svc.derive_window(at(8), None, 60);
        assert_eq!(window.start, at(9));

        // After 09:00: tomorrow.
        let window = svc.derive_window(at(10), None, 60);
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn derived_window_enforces_the_minimum_length() {
        let svc = service();
        let window = svc.derive_window(at(8), None, 0);
        assert_eq!(window.duration_minutes(), 60);

        let window = svc.derive_window(at(8), None, 15);
        assert_eq!(window.duration_minutes(), 60);
    }

    #[test]
    fn past_due_dates_fall_back_to_the_upcoming_slot() {
        let svc = service();
        let stale_due = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let window = svc.derive_window(at(10), Some(stale_due), 60);
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap()
        );
    }
}
