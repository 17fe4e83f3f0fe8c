use crate::application::ports::record_store::{Filter, Order, RecordStore};
use crate::application::ports::repositories::{
    AttendanceRepository, ClientRepository, GuardRepository, OccurrenceRepository,
    PaymentRepository, ScheduleRepository, VisitorRepository,
};
use crate::domain::entities::{
    Attendance, Client, ClientPatch, Guard, GuardPatch, NewClient, NewGuard, NewOccurrence,
    NewPayment, NewSchedule, NewVisitor, Occurrence, OccurrenceStatus, Payment, PaymentStatus,
    Schedule, SchedulePatch, Visitor,
};
use crate::domain::table::Table;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// リモートレコードストア越しのリポジトリ実装（ライブ経路）
///
/// 自前の状態は持たないパススルー。展開フィールドはフェッチ時に
/// 関連テーブルを引いて解決する。ストアのエラーはそのまま呼び出し元へ
/// 伝播し、リトライはしない。
pub struct RemoteRepository {
    store: Arc<dyn RecordStore>,
}

impl RemoteRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        table: Table,
        filter: Option<Filter>,
        order: Order,
    ) -> Result<Vec<T>, AppError> {
        let rows = self.store.query(table, filter, order).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(AppError::from))
            .collect()
    }

    fn decode<T: DeserializeOwned>(&self, row: serde_json::Value) -> Result<T, AppError> {
        serde_json::from_value(row).map_err(AppError::from)
    }

    async fn guards_by_id(&self) -> Result<HashMap<String, Guard>, AppError> {
        let guards: Vec<Guard> = self
            .fetch(Table::Guards, None, Order::desc("created_at"))
            .await?;
        Ok(guards.into_iter().map(|g| (g.id.clone(), g)).collect())
    }

    async fn clients_by_id(&self) -> Result<HashMap<String, Client>, AppError> {
        let clients: Vec<Client> = self
            .fetch(Table::Clients, None, Order::desc("created_at"))
            .await?;
        Ok(clients.into_iter().map(|c| (c.id.clone(), c)).collect())
    }

    async fn schedules_by_id(&self) -> Result<HashMap<String, Schedule>, AppError> {
        let schedules: Vec<Schedule> = self
            .fetch(Table::Schedules, None, Order::asc("shift_start"))
            .await?;
        Ok(schedules.into_iter().map(|s| (s.id.clone(), s)).collect())
    }

    async fn expand_schedules(&self, rows: &mut [Schedule]) -> Result<(), AppError> {
        let guards = self.guards_by_id().await?;
        let clients = self.clients_by_id().await?;
        for row in rows {
            row.guard = guards.get(&row.guard_id).cloned();
            row.client = clients.get(&row.client_id).cloned();
        }
        Ok(())
    }

    async fn expand_attendance(&self, rows: &mut [Attendance]) -> Result<(), AppError> {
        let guards = self.guards_by_id().await?;
        let schedules = self.schedules_by_id().await?;
        for row in rows {
            row.guard = guards.get(&row.guard_id).cloned();
            row.schedule = schedules.get(&row.schedule_id).cloned();
        }
        Ok(())
    }

    async fn expand_visitors(&self, rows: &mut [Visitor]) -> Result<(), AppError> {
        let clients = self.clients_by_id().await?;
        for row in rows {
            row.client = clients.get(&row.client_id).cloned();
        }
        Ok(())
    }

    async fn expand_payments(&self, rows: &mut [Payment]) -> Result<(), AppError> {
        let clients = self.clients_by_id().await?;
        for row in rows {
            row.client = clients.get(&row.client_id).cloned();
        }
        Ok(())
    }
}

#[async_trait]
impl GuardRepository for RemoteRepository {
    async fn get_all(&self) -> Result<Vec<Guard>, AppError> {
        self.fetch(Table::Guards, None, Order::desc("created_at"))
            .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Guard>, AppError> {
        let rows: Vec<Guard> = self
            .fetch(
                Table::Guards,
                Some(Filter::eq("id", id)),
                Order::desc("created_at"),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn create(&self, fields: NewGuard) -> Result<Guard, AppError> {
        let row = self
            .store
            .insert(Table::Guards, serde_json::to_value(&fields)?)
            .await?;
        self.decode(row)
    }

    async fn update(&self, id: &str, patch: GuardPatch) -> Result<Guard, AppError> {
        let row = self
            .store
            .update(Table::Guards, id, serde_json::to_value(&patch)?)
            .await?;
        self.decode(row)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        Ok(self.store.delete(Table::Guards, id).await?)
    }
}

#[async_trait]
impl ClientRepository for RemoteRepository {
    async fn get_all(&self) -> Result<Vec<Client>, AppError> {
        self.fetch(Table::Clients, None, Order::desc("created_at"))
            .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Client>, AppError> {
        let rows: Vec<Client> = self
            .fetch(
                Table::Clients,
                Some(Filter::eq("id", id)),
                Order::desc("created_at"),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn create(&self, fields: NewClient) -> Result<Client, AppError> {
        let row = self
            .store
            .insert(Table::Clients, serde_json::to_value(&fields)?)
            .await?;
        self.decode(row)
    }

    async fn update(&self, id: &str, patch: ClientPatch) -> Result<Client, AppError> {
        let row = self
            .store
            .update(Table::Clients, id, serde_json::to_value(&patch)?)
            .await?;
        self.decode(row)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        Ok(self.store.delete(Table::Clients, id).await?)
    }
}

#[async_trait]
impl ScheduleRepository for RemoteRepository {
    async fn get_all(&self) -> Result<Vec<Schedule>, AppError> {
        let mut rows: Vec<Schedule> = self
            .fetch(Table::Schedules, None, Order::asc("shift_start"))
            .await?;
        self.expand_schedules(&mut rows).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Schedule>, AppError> {
        let mut rows: Vec<Schedule> = self
            .fetch(
                Table::Schedules,
                Some(Filter::eq("id", id)),
                Order::asc("shift_start"),
            )
            .await?;
        self.expand_schedules(&mut rows).await?;
        Ok(rows.into_iter().next())
    }

    async fn create(&self, fields: NewSchedule) -> Result<Schedule, AppError> {
        let row = self
            .store
            .insert(Table::Schedules, serde_json::to_value(&fields)?)
            .await?;
        self.decode(row)
    }

    async fn update(&self, id: &str, patch: SchedulePatch) -> Result<Schedule, AppError> {
        let row = self
            .store
            .update(Table::Schedules, id, serde_json::to_value(&patch)?)
            .await?;
        self.decode(row)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        Ok(self.store.delete(Table::Schedules, id).await?)
    }
}

#[async_trait]
impl AttendanceRepository for RemoteRepository {
    async fn get_all(&self) -> Result<Vec<Attendance>, AppError> {
        let mut rows: Vec<Attendance> = self
            .fetch(Table::Attendance, None, Order::desc("check_in"))
            .await?;
        self.expand_attendance(&mut rows).await?;
        Ok(rows)
    }

    async fn get_by_guard_id(&self, guard_id: &str) -> Result<Vec<Attendance>, AppError> {
        let mut rows: Vec<Attendance> = self
            .fetch(
                Table::Attendance,
                Some(Filter::eq("guard_id", guard_id)),
                Order::desc("check_in"),
            )
            .await?;
        self.expand_attendance(&mut rows).await?;
        Ok(rows)
    }

    async fn check_in(&self, guard_id: &str, schedule_id: &str) -> Result<Attendance, AppError> {
        // check_inはここで打刻する
        let fields = json!({
            "guard_id": guard_id,
            "schedule_id": schedule_id,
            "check_in": chrono::Utc::now(),
        });
        let row = self.store.insert(Table::Attendance, fields).await?;
        self.decode(row)
    }

    async fn check_out(&self, id: &str) -> Result<Attendance, AppError> {
        let fields = json!({ "check_out": chrono::Utc::now() });
        let row = self.store.update(Table::Attendance, id, fields).await?;
        self.decode(row)
    }
}

#[async_trait]
impl VisitorRepository for RemoteRepository {
    async fn get_all(&self) -> Result<Vec<Visitor>, AppError> {
        let mut rows: Vec<Visitor> = self
            .fetch(Table::Visitors, None, Order::desc("check_in"))
            .await?;
        self.expand_visitors(&mut rows).await?;
        Ok(rows)
    }

    async fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Visitor>, AppError> {
        let mut rows: Vec<Visitor> = self
            .fetch(
                Table::Visitors,
                Some(Filter::eq("client_id", client_id)),
                Order::desc("check_in"),
            )
            .await?;
        self.expand_visitors(&mut rows).await?;
        Ok(rows)
    }

    async fn check_in(&self, fields: NewVisitor) -> Result<Visitor, AppError> {
        let row = self
            .store
            .insert(Table::Visitors, serde_json::to_value(&fields)?)
            .await?;
        self.decode(row)
    }

    async fn check_out(&self, id: &str) -> Result<Visitor, AppError> {
        let fields = json!({ "check_out": chrono::Utc::now() });
        let row = self.store.update(Table::Visitors, id, fields).await?;
        self.decode(row)
    }
}

#[async_trait]
impl PaymentRepository for RemoteRepository {
    async fn get_all(&self) -> Result<Vec<Payment>, AppError> {
        let mut rows: Vec<Payment> = self
            .fetch(Table::Payments, None, Order::desc("created_at"))
            .await?;
        self.expand_payments(&mut rows).await?;
        Ok(rows)
    }

    async fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Payment>, AppError> {
        let mut rows: Vec<Payment> = self
            .fetch(
                Table::Payments,
                Some(Filter::eq("client_id", client_id)),
                Order::desc("created_at"),
            )
            .await?;
        self.expand_payments(&mut rows).await?;
        Ok(rows)
    }

    async fn create(&self, fields: NewPayment) -> Result<Payment, AppError> {
        let row = self
            .store
            .insert(Table::Payments, serde_json::to_value(&fields)?)
            .await?;
        self.decode(row)
    }

    async fn update_status(&self, id: &str, status: PaymentStatus) -> Result<Payment, AppError> {
        let fields = json!({ "status": status });
        let row = self.store.update(Table::Payments, id, fields).await?;
        self.decode(row)
    }
}

#[async_trait]
impl OccurrenceRepository for RemoteRepository {
    async fn get_all(&self) -> Result<Vec<Occurrence>, AppError> {
        self.fetch(Table::OccurrenceBook, None, Order::desc("incident_date"))
            .await
    }

    async fn create(&self, fields: NewOccurrence) -> Result<Occurrence, AppError> {
        // statusは起票側で必ずopenを送る
        let mut fields = serde_json::to_value(&fields)?;
        if let serde_json::Value::Object(map) = &mut fields {
            map.insert(
                "status".to_string(),
                serde_json::to_value(OccurrenceStatus::Open)?,
            );
        }
        let row = self.store.insert(Table::OccurrenceBook, fields).await?;
        self.decode(row)
    }
}
