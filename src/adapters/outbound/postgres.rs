//! Postgres-backed record store: one JSONB document table per collection,
//! standing in for the hosted document database. Patches are applied
//! read-modify-write with no row locking; last writer wins, matching the
//! store semantics the core assumes.

use async_trait::async_trait;
use chrono::Utc;
use deadpool_postgres::{Config, Pool, Runtime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_postgres::NoTls;
use uuid::Uuid;

use crate::common::{DomainError, DomainResult};
use crate::config::PostgresConfig;
use crate::domains::dispatch::{EngineerStore, ScheduleStore, WorkOrderStore};
use crate::domains::engineer::Engineer;
use crate::domains::schedule::{NewSchedule, Schedule, SchedulePatch};
use crate::domains::work_order::{NewWorkOrder, WorkOrder, WorkOrderPatch};

pub struct PostgresRecordStore {
    pool: Pool,
}

impl PostgresRecordStore {
    pub async fn new(config: PostgresConfig) -> DomainResult<Self> {
        let mut pg_config = Config::new();
        pg_config.host = Some(config.host);
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database);
        pg_config.user = Some(config.username);
        pg_config.password = Some(config.password);

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DomainError::Storage(format!("failed to create PostgreSQL pool: {e}")))?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Builds the store on an existing pool (integration tests).
    pub async fn with_pool(pool: Pool) -> DomainResult<Self> {
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Roster seeding for the demo binary and integration tests; roster
    /// administration proper lives outside this core.
    pub async fn insert_engineer(&self, engineer: &Engineer) -> DomainResult<()> {
        self.insert_doc("engineers", &engineer.id, engineer).await
    }

    async fn initialize_schema(&self) -> DomainResult<()> {
        let client = self.client().await?;

        let schema = r#"
            CREATE TABLE IF NOT EXISTS work_orders (
                id VARCHAR(64) PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE TABLE IF NOT EXISTS schedules (
                id VARCHAR(64) PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE TABLE IF NOT EXISTS engineers (
                id VARCHAR(64) PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE INDEX IF NOT EXISTS idx_schedules_engineer_id
            ON schedules ((doc->>'engineer_id'));
        "#;

        client
            .batch_execute(schema)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to initialize schema: {e}")))?;

        Ok(())
    }

    async fn client(&self) -> DomainResult<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| DomainError::Storage(format!("failed to get database connection: {e}")))
    }

    async fn list_docs<T: DeserializeOwned>(&self, table: &str) -> DomainResult<Vec<T>> {
        let client = self.client().await?;
        let query = format!("SELECT doc FROM {table} ORDER BY created_at, id");
        let rows = client
            .query(&query, &[])
            .await
            .map_err(|e| DomainError::Storage(format!("failed to list {table}: {e}")))?;

        rows.into_iter()
            .map(|row| {
                let doc: serde_json::Value = row.get(0);
                serde_json::from_value(doc).map_err(DomainError::from)
            })
            .collect()
    }

    async fn get_doc<T: DeserializeOwned>(&self, table: &str, id: &str) -> DomainResult<Option<T>> {
        let client = self.client().await?;
        let query = format!("SELECT doc FROM {table} WHERE id = $1");
        let row = client
            .query_opt(&query, &[&id])
            .await
            .map_err(|e| DomainError::Storage(format!("failed to read from {table}: {e}")))?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.get(0);
                Ok(Some(serde_json::from_value(doc)?))
            }
            None => Ok(None),
        }
    }

    async fn insert_doc<T: Serialize>(&self, table: &str, id: &str, record: &T) -> DomainResult<()> {
        let client = self.client().await?;
        let doc = serde_json::to_value(record)?;
        let query = format!("INSERT INTO {table} (id, doc, created_at) VALUES ($1, $2, NOW())");
        client
            .execute(&query, &[&id, &doc])
            .await
            .map_err(|e| DomainError::Storage(format!("failed to insert into {table}: {e}")))?;
        Ok(())
    }

    async fn replace_doc<T: Serialize>(&self, table: &str, id: &str, record: &T) -> DomainResult<()> {
        let client = self.client().await?;
        let doc = serde_json::to_value(record)?;
        let query = format!("UPDATE {table} SET doc = $2 WHERE id = $1");
        let updated = client
            .execute(&query, &[&id, &doc])
            .await
            .map_err(|e| DomainError::Storage(format!("failed to update {table}: {e}")))?;
        if updated == 0 {
            return Err(DomainError::Storage(format!(
                "row vanished during update of {table}/{id}"
            )));
        }
        Ok(())
    }

    async fn delete_doc(&self, table: &str, kind: &'static str, id: &str) -> DomainResult<()> {
        let client = self.client().await?;
        let query = format!("DELETE FROM {table} WHERE id = $1");
        let deleted = client
            .execute(&query, &[&id])
            .await
            .map_err(|e| DomainError::Storage(format!("failed to delete from {table}: {e}")))?;
        if deleted == 0 {
            return Err(DomainError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl WorkOrderStore for PostgresRecordStore {
    async fn list(&self) -> DomainResult<Vec<WorkOrder>> {
        self.list_docs("work_orders").await
    }

    async fn get(&self, id: &str) -> DomainResult<Option<WorkOrder>> {
        self.get_doc("work_orders", id).await
    }

    async fn create(&self, draft: NewWorkOrder) -> DomainResult<WorkOrder> {
        let order = WorkOrder::from_draft(draft, Uuid::new_v4().to_string(), Utc::now());
        self.insert_doc("work_orders", &order.id, &order).await?;
        Ok(order)
    }

    async fn update(&self, id: &str, patch: WorkOrderPatch) -> DomainResult<WorkOrder> {
        let mut order: WorkOrder =
            self.get_doc("work_orders", id)
                .await?
                .ok_or_else(|| DomainError::NotFound {
                    kind: "work order",
                    id: id.to_string(),
                })?;
        patch.apply_to(&mut order);
        self.replace_doc("work_orders", id, &order).await?;
        Ok(order)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.delete_doc("work_orders", "work order", id).await
    }
}

#[async_trait]
impl ScheduleStore for PostgresRecordStore {
    async fn list(&self) -> DomainResult<Vec<Schedule>> {
        self.list_docs("schedules").await
    }

    async fn get(&self, id: &str) -> DomainResult<Option<Schedule>> {
        self.get_doc("schedules", id).await
    }

    async fn create(&self, draft: NewSchedule) -> DomainResult<Schedule> {
        let schedule = Schedule::from_draft(draft, Uuid::new_v4().to_string(), Utc::now());
        self.insert_doc("schedules", &schedule.id, &schedule).await?;
        Ok(schedule)
    }

    async fn update(&self, id: &str, patch: SchedulePatch) -> DomainResult<Schedule> {
        let mut schedule: Schedule =
            self.get_doc("schedules", id)
                .await?
                .ok_or_else(|| DomainError::NotFound {
                    kind: "schedule",
                    id: id.to_string(),
                })?;
        patch.apply_to(&mut schedule);
        self.replace_doc("schedules", id, &schedule).await?;
        Ok(schedule)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.delete_doc("schedules", "schedule", id).await
    }

    // The one equality-filtered query the store contract promises.
    async fn list_by_engineer(&self, engineer_id: &str) -> DomainResult<Vec<Schedule>> {
        let client = self.client().await?;
        let rows = client
            .query(
                "SELECT doc FROM schedules WHERE doc->>'engineer_id' = $1 ORDER BY created_at, id",
                &[&engineer_id],
            )
            .await
            .map_err(|e| DomainError::Storage(format!("failed to list schedules: {e}")))?;

        rows.into_iter()
            .map(|row| {
                let doc: serde_json::Value = row.get(0);
                serde_json::from_value(doc).map_err(DomainError::from)
            })
            .collect()
    }
}

#[async_trait]
impl EngineerStore for PostgresRecordStore {
    async fn list(&self) -> DomainResult<Vec<Engineer>> {
        self.list_docs("engineers").await
    }
}
