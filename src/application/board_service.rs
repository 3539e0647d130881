//! Read side of the dispatch board. Every query fetches fresh collections
//! from the stores and recomputes its view; the service holds no snapshot
//! of its own.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::common::ApplicationResult;
use crate::domains::dispatch::{
    engineer_load, unify, BoardColumns, BoardFilter, BoardItem, EngineerStore, PriorityTally,
    ScheduleStore, StatusTally, WorkOrderStore,
};
use crate::domains::engineer::{recommend_engineers, Engineer};

/// A filtered board snapshot, ready for rendering: the surviving items, the
/// four status columns, and the per-priority totals for the filter bar.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub items: Vec<BoardItem>,
    pub columns: BoardColumns,
    pub priorities: PriorityTally,
}

pub struct BoardService {
    work_orders: Arc<dyn WorkOrderStore>,
    schedules: Arc<dyn ScheduleStore>,
    engineers: Arc<dyn EngineerStore>,
}

impl BoardService {
    pub fn new(
        work_orders: Arc<dyn WorkOrderStore>,
        schedules: Arc<dyn ScheduleStore>,
        engineers: Arc<dyn EngineerStore>,
    ) -> Self {
        Self {
            work_orders,
            schedules,
            engineers,
        }
    }

    /// The full unified list, fresh from both collections.
    pub async fn board_items(&self) -> ApplicationResult<Vec<BoardItem>> {
        let work_orders = self.work_orders.list().await?;
        let schedules = self.schedules.list().await?;
        debug!(
            work_orders = work_orders.len(),
            schedules = schedules.len(),
            "unifying board items"
        );
        Ok(unify(work_orders, schedules))
    }

    /// Fetch, filter, group and tally in one pass over fresh data.
    pub async fn board_view(&self, filter: &BoardFilter) -> ApplicationResult<BoardView> {
        let items = filter.apply(self.board_items().await?);
        let columns = BoardColumns::from_items(&items);
        let priorities = PriorityTally::count(&items);
        Ok(BoardView {
            items,
            columns,
            priorities,
        })
    }

    /// Engineers per roster status.
    pub async fn roster_stats(&self) -> ApplicationResult<StatusTally> {
        let roster = self.engineers.list().await?;
        Ok(StatusTally::count(&roster))
    }

    /// Open board items per engineer id.
    pub async fn utilization(&self) -> ApplicationResult<HashMap<String, usize>> {
        let items = self.board_items().await?;
        Ok(engineer_load(&items))
    }

    /// Up to three active engineers ranked by current load, for the
    /// assignment dialog. `reference` is the planned start instant.
    pub async fn recommendations(
        &self,
        reference: DateTime<Utc>,
    ) -> ApplicationResult<Vec<Engineer>> {
        let roster = self.engineers.list().await?;
        let picks = recommend_engineers(reference, &roster)
            .into_iter()
            .cloned()
            .collect();
        Ok(picks)
    }
}
