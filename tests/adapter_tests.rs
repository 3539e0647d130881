//! In-memory record store semantics the services rely on.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use fieldops_app::adapters::inbound::InMemoryRecordStore;
use fieldops_app::common::DomainError;
use fieldops_app::domains::dispatch::{EngineerStore, ScheduleStore, WorkOrderStore};
use fieldops_app::domains::engineer::{Engineer, EngineerStatus};
use fieldops_app::domains::schedule::{NewSchedule, SchedulePatch, ScheduleStatus, TimeWindow};
use fieldops_app::domains::work_order::{NewWorkOrder, Priority, WorkOrderPatch, WorkOrderStatus};

fn order_draft(title: &str) -> NewWorkOrder {
    NewWorkOrder {
        title: title.to_string(),
        description: "inspect pump".to_string(),
        location: "Plant 4".to_string(),
        priority: Priority::Medium,
        assigned_engineer_id: None,
        estimated_minutes: 60,
        due_date: None,
    }
}

fn schedule_draft(engineer: &str) -> NewSchedule {
    let start = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, 10, 11, 0, 0).unwrap();
    NewSchedule {
        title: format!("visit for {engineer}"),
        description: "site visit".to_string(),
        engineer_id: engineer.to_string(),
        window: TimeWindow::new(start, end).unwrap(),
        priority: Priority::Low,
        location: "Plant 4".to_string(),
        work_order_id: None,
    }
}

#[tokio::test]
async fn work_order_crud_round_trip() {
    let store = Arc::new(InMemoryRecordStore::new());

    let created = WorkOrderStore::create(store.as_ref(), order_draft("first")).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.status, WorkOrderStatus::Pending);

    let fetched = WorkOrderStore::get(store.as_ref(), &created.id)
        .await
        .unwrap()
        .expect("created order is readable");
    assert_eq!(fetched, created);

    let patch = WorkOrderPatch {
        status: Some(WorkOrderStatus::Cancelled),
        ..Default::default()
    };
    let updated = WorkOrderStore::update(store.as_ref(), &created.id, patch).await.unwrap();
    assert_eq!(updated.status, WorkOrderStatus::Cancelled);
    assert_eq!(updated.title, "first");

    WorkOrderStore::delete(store.as_ref(), &created.id).await.unwrap();
    assert!(WorkOrderStore::get(store.as_ref(), &created.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn updates_and_deletes_on_missing_ids_are_not_found() {
    let store = Arc::new(InMemoryRecordStore::new());

    let err = WorkOrderStore::update(store.as_ref(), "ghost", WorkOrderPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { kind: "work order", .. }));

    let err = ScheduleStore::delete(store.as_ref(), "ghost").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { kind: "schedule", .. }));
}

#[tokio::test]
async fn lists_come_back_in_creation_order() {
    let store = Arc::new(InMemoryRecordStore::new());

    for title in ["first", "second", "third"] {
        WorkOrderStore::create(store.as_ref(), order_draft(title)).await.unwrap();
    }

    let titles: Vec<String> = WorkOrderStore::list(store.as_ref())
        .await
        .unwrap()
        .into_iter()
        .map(|order| order.title)
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn list_by_engineer_is_an_equality_filter() {
    let store = Arc::new(InMemoryRecordStore::new());

    ScheduleStore::create(store.as_ref(), schedule_draft("e1")).await.unwrap();
    ScheduleStore::create(store.as_ref(), schedule_draft("e2")).await.unwrap();
    ScheduleStore::create(store.as_ref(), schedule_draft("e1")).await.unwrap();

    let mine = store.list_by_engineer("e1").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|s| s.engineer_id == "e1"));

    assert!(store.list_by_engineer("e3").await.unwrap().is_empty());
}

#[tokio::test]
async fn schedule_patch_changes_only_named_fields() {
    let store = Arc::new(InMemoryRecordStore::new());

    let created = ScheduleStore::create(store.as_ref(), schedule_draft("e1")).await.unwrap();
    let updated = ScheduleStore::update(
        store.as_ref(),
        &created.id,
        SchedulePatch::status(ScheduleStatus::InProgress),
    )
    .await
    .unwrap();

    assert_eq!(updated.status, ScheduleStatus::InProgress);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.window, created.window);
}

#[tokio::test]
async fn seeded_roster_is_listed_by_id() {
    let store = Arc::new(InMemoryRecordStore::new());
    for id in ["e2", "e1"] {
        store
            .insert_engineer(Engineer {
                id: id.to_string(),
                name: format!("Engineer {id}"),
                email: format!("{id}@example.com"),
                phone: "555-0100".to_string(),
                department_id: None,
                skills: vec![],
                status: EngineerStatus::Active,
                total_projects: 0,
                completed_projects: 0,
            })
            .await;
    }

    let ids: Vec<String> = EngineerStore::list(store.as_ref())
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec!["e1", "e2"]);
}
