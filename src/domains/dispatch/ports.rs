//! Record-store ports the dispatch core depends on.
//!
//! The hosted document database behind the application is reached through
//! these narrow traits. Adapters provide in-memory and Postgres-backed
//! implementations; the core itself never talks to a transport directly.

use crate::common::DomainResult;
use crate::domains::engineer::Engineer;
use crate::domains::schedule::{NewSchedule, Schedule, SchedulePatch};
use crate::domains::work_order::{NewWorkOrder, WorkOrder, WorkOrderPatch};
use async_trait::async_trait;

/// Collection-scoped CRUD over work orders. `create` echoes the persisted
/// record with its store-assigned id, the way hosted document stores do.
#[async_trait]
pub trait WorkOrderStore: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<WorkOrder>>;
    async fn get(&self, id: &str) -> DomainResult<Option<WorkOrder>>;
    async fn create(&self, draft: NewWorkOrder) -> DomainResult<WorkOrder>;
    async fn update(&self, id: &str, patch: WorkOrderPatch) -> DomainResult<WorkOrder>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

/// Collection-scoped CRUD over schedules. `list_by_engineer` is the single
/// equality-filtered query the store is assumed to support; every other
/// filter happens in memory.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Schedule>>;
    async fn get(&self, id: &str) -> DomainResult<Option<Schedule>>;
    async fn create(&self, draft: NewSchedule) -> DomainResult<Schedule>;
    async fn update(&self, id: &str, patch: SchedulePatch) -> DomainResult<Schedule>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
    async fn list_by_engineer(&self, engineer_id: &str) -> DomainResult<Vec<Schedule>>;
}

/// Read-only roster access. Engineer administration lives outside this core.
#[async_trait]
pub trait EngineerStore: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Engineer>>;
}
