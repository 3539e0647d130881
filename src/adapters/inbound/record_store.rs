//! In-memory record store for tests and development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::{DomainError, DomainResult};
use crate::domains::dispatch::{EngineerStore, ScheduleStore, WorkOrderStore};
use crate::domains::engineer::Engineer;
use crate::domains::schedule::{NewSchedule, Schedule, SchedulePatch};
use crate::domains::work_order::{NewWorkOrder, WorkOrder, WorkOrderPatch};

/// One process-local map per collection, behind `tokio::sync::RwLock`.
/// Ids are UUID v4 strings; list reads come back ordered by `created_at`
/// so tests see stable collections.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    work_orders: RwLock<HashMap<String, WorkOrder>>,
    schedules: RwLock<HashMap<String, Schedule>>,
    engineers: RwLock<HashMap<String, Engineer>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a roster entry. Engineer administration is outside the
    /// dispatch core; tests and the demo binary insert records directly.
    pub async fn insert_engineer(&self, engineer: Engineer) {
        let mut store = self.engineers.write().await;
        store.insert(engineer.id.clone(), engineer);
    }
}

#[async_trait]
impl WorkOrderStore for InMemoryRecordStore {
    async fn list(&self) -> DomainResult<Vec<WorkOrder>> {
        let store = self.work_orders.read().await;
        let mut orders: Vec<WorkOrder> = store.values().cloned().collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(orders)
    }

    async fn get(&self, id: &str) -> DomainResult<Option<WorkOrder>> {
        let store = self.work_orders.read().await;
        Ok(store.get(id).cloned())
    }

    async fn create(&self, draft: NewWorkOrder) -> DomainResult<WorkOrder> {
        let order = WorkOrder::from_draft(draft, Uuid::new_v4().to_string(), Utc::now());
        let mut store = self.work_orders.write().await;
        store.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn update(&self, id: &str, patch: WorkOrderPatch) -> DomainResult<WorkOrder> {
        let mut store = self.work_orders.write().await;
        let order = store.get_mut(id).ok_or_else(|| DomainError::NotFound {
            kind: "work order",
            id: id.to_string(),
        })?;
        patch.apply_to(order);
        Ok(order.clone())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut store = self.work_orders.write().await;
        store.remove(id).ok_or_else(|| DomainError::NotFound {
            kind: "work order",
            id: id.to_string(),
        })?;
        Ok(())
    }
}

#[async_trait]
impl ScheduleStore for InMemoryRecordStore {
    async fn list(&self) -> DomainResult<Vec<Schedule>> {
        let store = self.schedules.read().await;
        let mut schedules: Vec<Schedule> = store.values().cloned().collect();
        schedules.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(schedules)
    }

    async fn get(&self, id: &str) -> DomainResult<Option<Schedule>> {
        let store = self.schedules.read().await;
        Ok(store.get(id).cloned())
    }

    async fn create(&self, draft: NewSchedule) -> DomainResult<Schedule> {
        let schedule = Schedule::from_draft(draft, Uuid::new_v4().to_string(), Utc::now());
        let mut store = self.schedules.write().await;
        store.insert(schedule.id.clone(), schedule.clone());
        Ok(schedule)
    }

    async fn update(&self, id: &str, patch: SchedulePatch) -> DomainResult<Schedule> {
        let mut store = self.schedules.write().await;
        let schedule = store.get_mut(id).ok_or_else(|| DomainError::NotFound {
            kind: "schedule",
            id: id.to_string(),
        })?;
        patch.apply_to(schedule);
        Ok(schedule.clone())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut store = self.schedules.write().await;
        store.remove(id).ok_or_else(|| DomainError::NotFound {
            kind: "schedule",
            id: id.to_string(),
        })?;
        Ok(())
    }

    async fn list_by_engineer(&self, engineer_id: &str) -> DomainResult<Vec<Schedule>> {
        let store = self.schedules.read().await;
        let mut schedules: Vec<Schedule> = store
            .values()
            .filter(|schedule| schedule.engineer_id == engineer_id)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(schedules)
    }
}

#[async_trait]
impl EngineerStore for InMemoryRecordStore {
    async fn list(&self) -> DomainResult<Vec<Engineer>> {
        let store = self.engineers.read().await;
        let mut roster: Vec<Engineer> = store.values().cloned().collect();
        roster.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(roster)
    }
}
