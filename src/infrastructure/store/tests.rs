use super::remote::RemoteRepository;
use crate::application::ports::change_source::ChangeEvent;
use crate::application::ports::record_store::{Filter, Order, RecordStore, StoreError};
use crate::application::ports::repositories::{
    AttendanceRepository, GuardRepository, OccurrenceRepository, PaymentRepository,
    ScheduleRepository, VisitorRepository,
};
use crate::domain::entities::{
    Client, Guard, GuardPatch, GuardStatus, NewClient, NewGuard, NewOccurrence, NewSchedule,
    OccurrenceStatus, PaymentStatus, Schedule, Severity,
};
use crate::domain::table::Table;
use crate::shared::error::AppError;
use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;

mock! {
    pub Store {}

    #[async_trait]
    impl RecordStore for Store {
        async fn query(
            &self,
            table: Table,
            filter: Option<Filter>,
            order: Order,
        ) -> Result<Vec<Value>, StoreError>;

        async fn insert(&self, table: Table, fields: Value) -> Result<Value, StoreError>;

        async fn update(&self, table: Table, id: &str, fields: Value) -> Result<Value, StoreError>;

        async fn delete(&self, table: Table, id: &str) -> Result<(), StoreError>;

        fn subscribe(&self, table: Table) -> broadcast::Receiver<ChangeEvent>;
    }
}

fn guard_with_id(id: &str) -> Guard {
    let mut guard = Guard::new(NewGuard {
        full_name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        phone: None,
        status: GuardStatus::Active,
    });
    guard.id = id.to_string();
    guard
}

fn client_with_id(id: &str) -> Client {
    let mut client = Client::new(NewClient {
        company_name: "Acme Corp".to_string(),
        contact_person: None,
        email: None,
        phone: None,
        address: None,
    });
    client.id = id.to_string();
    client
}

fn schedule_row(id: &str, guard_id: &str, client_id: &str) -> Value {
    let start = chrono::Utc::now();
    let mut schedule = Schedule::new(NewSchedule {
        guard_id: guard_id.to_string(),
        client_id: client_id.to_string(),
        shift_start: start,
        shift_end: start + chrono::Duration::hours(4),
    });
    schedule.id = id.to_string();
    serde_json::to_value(&schedule).unwrap()
}

#[tokio::test]
async fn schedule_get_all_expands_guard_and_client() {
    let mut store = MockStore::new();

    let row = schedule_row("s1", "g1", "c1");
    store
        .expect_query()
        .withf(|table, filter, order| {
            *table == Table::Schedules
                && filter.is_none()
                && *order == Order::asc("shift_start")
        })
        .times(1)
        .returning(move |_, _, _| Ok(vec![row.clone()]));

    let guard_row = serde_json::to_value(guard_with_id("g1")).unwrap();
    store
        .expect_query()
        .withf(|table, _, _| *table == Table::Guards)
        .times(1)
        .returning(move |_, _, _| Ok(vec![guard_row.clone()]));

    let client_row = serde_json::to_value(client_with_id("c1")).unwrap();
    store
        .expect_query()
        .withf(|table, _, _| *table == Table::Clients)
        .times(1)
        .returning(move |_, _, _| Ok(vec![client_row.clone()]));

    let repo = RemoteRepository::new(Arc::new(store));
    let schedules = ScheduleRepository::get_all(&repo).await.unwrap();

    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].guard.as_ref().unwrap().id, "g1");
    assert_eq!(schedules[0].client.as_ref().unwrap().id, "c1");
}

#[tokio::test]
async fn query_failure_propagates_without_retry() {
    let mut store = MockStore::new();
    store
        .expect_query()
        .times(1)
        .returning(|table, _, _| Err(StoreError::Query(table, "connection reset".to_string())));

    let repo = RemoteRepository::new(Arc::new(store));
    let err = GuardRepository::get_all(&repo).await.unwrap_err();

    match err {
        AppError::Store(msg) => assert!(msg.contains("connection reset")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn get_by_id_returns_none_when_store_finds_nothing() {
    let mut store = MockStore::new();
    store
        .expect_query()
        .withf(|table, filter, _| {
            *table == Table::Guards && *filter == Some(Filter::eq("id", "missing"))
        })
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    let repo = RemoteRepository::new(Arc::new(store));
    assert!(GuardRepository::get_by_id(&repo, "missing")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn create_returns_the_row_persisted_by_the_store() {
    let mut store = MockStore::new();
    store
        .expect_insert()
        .withf(|table, fields| {
            // idとcreated_atの採番はストア側
            *table == Table::Guards
                && fields.get("id").is_none()
                && fields.get("created_at").is_none()
        })
        .times(1)
        .returning(|_, _| Ok(serde_json::to_value(guard_with_id("stored-id")).unwrap()));

    let repo = RemoteRepository::new(Arc::new(store));
    let created = GuardRepository::create(
        &repo,
        NewGuard {
            full_name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: None,
            status: GuardStatus::Active,
        },
    )
    .await
    .unwrap();

    assert_eq!(created.id, "stored-id");
}

#[tokio::test]
async fn update_sends_only_the_patched_fields() {
    let mut store = MockStore::new();
    store
        .expect_update()
        .withf(|table, id, fields| {
            let keys: Vec<&String> = fields.as_object().unwrap().keys().collect();
            *table == Table::Guards && id == "g1" && keys == vec!["status"]
        })
        .times(1)
        .returning(|_, _, _| {
            let mut guard = guard_with_id("g1");
            guard.status = GuardStatus::Inactive;
            Ok(serde_json::to_value(guard).unwrap())
        });

    let repo = RemoteRepository::new(Arc::new(store));
    let updated = GuardRepository::update(&repo, "g1", GuardPatch::status(GuardStatus::Inactive))
        .await
        .unwrap();

    assert_eq!(updated.status, GuardStatus::Inactive);
}

#[tokio::test]
async fn attendance_check_in_stamps_the_timestamp() {
    let mut store = MockStore::new();
    store
        .expect_insert()
        .withf(|table, fields| {
            *table == Table::Attendance
                && fields.get("guard_id") == Some(&serde_json::json!("g1"))
                && fields.get("schedule_id") == Some(&serde_json::json!("s1"))
                && fields.get("check_in").is_some()
        })
        .times(1)
        .returning(|_, fields| {
            let mut row = fields;
            row["id"] = serde_json::json!("a1");
            row["check_out"] = Value::Null;
            row["created_at"] = row["check_in"].clone();
            Ok(row)
        });

    let repo = RemoteRepository::new(Arc::new(store));
    let record = AttendanceRepository::check_in(&repo, "g1", "s1").await.unwrap();

    assert_eq!(record.id, "a1");
    assert!(record.check_out.is_none());
}

#[tokio::test]
async fn visitor_fetch_by_client_filters_on_client_id() {
    let mut store = MockStore::new();
    store
        .expect_query()
        .withf(|table, filter, order| {
            *table == Table::Visitors
                && *filter == Some(Filter::eq("client_id", "c1"))
                && *order == Order::desc("check_in")
        })
        .times(1)
        .returning(|_, _, _| Ok(vec![]));
    store
        .expect_query()
        .withf(|table, _, _| *table == Table::Clients)
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    let repo = RemoteRepository::new(Arc::new(store));
    let visitors = VisitorRepository::get_by_client_id(&repo, "c1").await.unwrap();
    assert!(visitors.is_empty());
}

#[tokio::test]
async fn payment_update_status_sends_the_status_field() {
    let mut store = MockStore::new();
    store
        .expect_update()
        .withf(|table, id, fields| {
            *table == Table::Payments
                && id == "p1"
                && *fields == serde_json::json!({ "status": "completed" })
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(serde_json::json!({
                "id": "p1",
                "client_id": "c1",
                "amount": 1200.0,
                "status": "completed",
                "payment_date": chrono::Utc::now(),
                "created_at": chrono::Utc::now(),
            }))
        });

    let repo = RemoteRepository::new(Arc::new(store));
    let updated = PaymentRepository::update_status(&repo, "p1", PaymentStatus::Completed)
        .await
        .unwrap();

    assert_eq!(updated.status, PaymentStatus::Completed);
}

#[tokio::test]
async fn occurrence_get_all_orders_by_incident_date_descending() {
    let mut store = MockStore::new();
    store
        .expect_query()
        .withf(|table, filter, order| {
            *table == Table::OccurrenceBook
                && filter.is_none()
                && *order == Order::desc("incident_date")
        })
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    let repo = RemoteRepository::new(Arc::new(store));
    let occurrences = OccurrenceRepository::get_all(&repo).await.unwrap();
    assert!(occurrences.is_empty());
}

#[tokio::test]
async fn occurrence_create_sends_open_status() {
    let mut store = MockStore::new();
    store
        .expect_insert()
        .withf(|table, fields| {
            *table == Table::OccurrenceBook
                && fields.get("status") == Some(&serde_json::json!("open"))
                && fields.get("reported_by") == Some(&serde_json::json!("g1"))
                && fields.get("id").is_none()
        })
        .times(1)
        .returning(|_, fields| {
            let mut row = fields;
            row["id"] = serde_json::json!("o1");
            row["created_at"] = serde_json::json!(chrono::Utc::now());
            Ok(row)
        });

    let repo = RemoteRepository::new(Arc::new(store));
    let created = OccurrenceRepository::create(
        &repo,
        NewOccurrence {
            title: "Broken lock".to_string(),
            description: "Rear door lock damaged".to_string(),
            incident_date: chrono::Utc::now(),
            reported_by: "g1".to_string(),
            severity: Severity::High,
            location: "Warehouse B".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(created.id, "o1");
    assert_eq!(created.status, OccurrenceStatus::Open);
}

#[tokio::test]
async fn delete_passes_through_to_the_store() {
    let mut store = MockStore::new();
    store
        .expect_delete()
        .withf(|table, id| *table == Table::Guards && id == "g1")
        .times(1)
        .returning(|_, _| Ok(()));

    let repo = RemoteRepository::new(Arc::new(store));
    GuardRepository::delete(&repo, "g1").await.unwrap();
}
