use super::seed::SeedData;
use crate::application::ports::change_source::{ChangeEvent, ChangeSource};
use crate::application::ports::repositories::{
    AttendanceRepository, ClientRepository, GuardRepository, OccurrenceRepository,
    PaymentRepository, ScheduleRepository, VisitorRepository,
};
use crate::domain::entities::{
    Attendance, Client, ClientPatch, Guard, GuardPatch, NewClient, NewGuard, NewOccurrence,
    NewPayment, NewSchedule, NewVisitor, Occurrence, Payment, PaymentStatus, Schedule,
    SchedulePatch, Visitor,
};
use crate::domain::table::Table;
use crate::infrastructure::realtime::ChangeHub;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::RwLock;

/// インメモリのモックバックエンド
///
/// 全エンティティのコレクションを単独で所有し、リポジトリ契約の
/// モック実装を提供する。ライブ経路と同じループが閉じるよう、
/// 各ミューテーションはChangeHubへ変更通知を発行する。
pub struct MemoryStore {
    guards: RwLock<Vec<Guard>>,
    clients: RwLock<Vec<Client>>,
    schedules: RwLock<Vec<Schedule>>,
    attendance: RwLock<Vec<Attendance>>,
    visitors: RwLock<Vec<Visitor>>,
    payments: RwLock<Vec<Payment>>,
    occurrences: RwLock<Vec<Occurrence>>,
    hub: ChangeHub,
}

impl MemoryStore {
    pub fn new(seed: SeedData, channel_capacity: usize) -> Self {
        Self {
            guards: RwLock::new(seed.guards),
            clients: RwLock::new(seed.clients),
            schedules: RwLock::new(seed.schedules),
            attendance: RwLock::new(seed.attendance),
            visitors: RwLock::new(seed.visitors),
            payments: RwLock::new(seed.payments),
            occurrences: RwLock::new(seed.occurrences),
            hub: ChangeHub::new(channel_capacity),
        }
    }

    pub fn sample() -> Self {
        Self::new(SeedData::sample(), 256)
    }

    fn publish(&self, table: Table, event: serde_json::Result<ChangeEvent>) {
        match event {
            Ok(event) => self.hub.publish(table, event),
            Err(e) => tracing::warn!("Failed to encode {} change event: {}", table, e),
        }
    }

    fn publish_insert<T: Serialize>(&self, table: Table, row: &T) {
        self.publish(table, ChangeEvent::insert(row));
    }

    fn publish_update<T: Serialize>(&self, table: Table, row: &T) {
        self.publish(table, ChangeEvent::update(row));
    }
}

impl ChangeSource for MemoryStore {
    fn subscribe(&self, table: Table) -> broadcast::Receiver<ChangeEvent> {
        self.hub.subscribe(table)
    }
}

#[async_trait]
impl GuardRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Guard>, AppError> {
        Ok(self.guards.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Guard>, AppError> {
        Ok(self.guards.read().await.iter().find(|g| g.id == id).cloned())
    }

    async fn create(&self, fields: NewGuard) -> Result<Guard, AppError> {
        let guard = Guard::new(fields);
        {
            let mut guards = self.guards.write().await;
            guards.insert(0, guard.clone());
        }
        self.publish_insert(Table::Guards, &guard);
        Ok(guard)
    }

    async fn update(&self, id: &str, patch: GuardPatch) -> Result<Guard, AppError> {
        let updated = {
            let mut guards = self.guards.write().await;
            let slot = guards
                .iter_mut()
                .find(|g| g.id == id)
                .ok_or_else(|| AppError::NotFound(format!("guard {}", id)))?;
            slot.apply(patch);
            slot.clone()
        };
        self.publish_update(Table::Guards, &updated);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let removed = {
            let mut guards = self.guards.write().await;
            let before = guards.len();
            guards.retain(|g| g.id != id);
            guards.len() != before
        };
        // 既に存在しない行の削除は黙って成功させる
        if removed {
            self.publish(Table::Guards, Ok(ChangeEvent::delete(id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.clients.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Client>, AppError> {
        Ok(self
            .clients
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, fields: NewClient) -> Result<Client, AppError> {
        let client = Client::new(fields);
        {
            let mut clients = self.clients.write().await;
            clients.insert(0, client.clone());
        }
        self.publish_insert(Table::Clients, &client);
        Ok(client)
    }

    async fn update(&self, id: &str, patch: ClientPatch) -> Result<Client, AppError> {
        let updated = {
            let mut clients = self.clients.write().await;
            let slot = clients
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| AppError::NotFound(format!("client {}", id)))?;
            slot.apply(patch);
            slot.clone()
        };
        self.publish_update(Table::Clients, &updated);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let removed = {
            let mut clients = self.clients.write().await;
            let before = clients.len();
            clients.retain(|c| c.id != id);
            clients.len() != before
        };
        if removed {
            self.publish(Table::Clients, Ok(ChangeEvent::delete(id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Schedule>, AppError> {
        let mut rows = self.schedules.read().await.clone();
        rows.sort_by_key(|s| s.shift_start);
        Ok(rows)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Schedule>, AppError> {
        Ok(self
            .schedules
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn create(&self, fields: NewSchedule) -> Result<Schedule, AppError> {
        // 展開は作成時点のスナップショットで解決する。
        // 参照先が後から変わっても追従しない（モック経路のみの割り切り）
        let guard = self
            .guards
            .read()
            .await
            .iter()
            .find(|g| g.id == fields.guard_id)
            .cloned();
        let client = self
            .clients
            .read()
            .await
            .iter()
            .find(|c| c.id == fields.client_id)
            .cloned();

        let schedule = Schedule::new(fields).with_expansions(guard, client);
        {
            let mut schedules = self.schedules.write().await;
            schedules.push(schedule.clone());
        }
        self.publish_insert(Table::Schedules, &schedule);
        Ok(schedule)
    }

    async fn update(&self, id: &str, patch: SchedulePatch) -> Result<Schedule, AppError> {
        let updated = {
            let mut schedules = self.schedules.write().await;
            let slot = schedules
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| AppError::NotFound(format!("schedule {}", id)))?;
            slot.apply(patch);
            slot.clone()
        };
        self.publish_update(Table::Schedules, &updated);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let removed = {
            let mut schedules = self.schedules.write().await;
            let before = schedules.len();
            schedules.retain(|s| s.id != id);
            schedules.len() != before
        };
        if removed {
            self.publish(Table::Schedules, Ok(ChangeEvent::delete(id)));
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Attendance>, AppError> {
        Ok(self.attendance.read().await.clone())
    }

    async fn get_by_guard_id(&self, guard_id: &str) -> Result<Vec<Attendance>, AppError> {
        Ok(self
            .attendance
            .read()
            .await
            .iter()
            .filter(|a| a.guard_id == guard_id)
            .cloned()
            .collect())
    }

    async fn check_in(&self, guard_id: &str, schedule_id: &str) -> Result<Attendance, AppError> {
        let guard = self
            .guards
            .read()
            .await
            .iter()
            .find(|g| g.id == guard_id)
            .cloned();
        let schedule = self
            .schedules
            .read()
            .await
            .iter()
            .find(|s| s.id == schedule_id)
            .cloned();

        let record = Attendance::check_in_now(guard_id.to_string(), schedule_id.to_string())
            .with_expansions(guard, schedule);
        {
            let mut attendance = self.attendance.write().await;
            attendance.insert(0, record.clone());
        }
        self.publish_insert(Table::Attendance, &record);
        Ok(record)
    }

    async fn check_out(&self, id: &str) -> Result<Attendance, AppError> {
        let updated = {
            let mut attendance = self.attendance.write().await;
            let slot = attendance
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| AppError::NotFound(format!("attendance {}", id)))?;
            slot.check_out_now();
            slot.clone()
        };
        self.publish_update(Table::Attendance, &updated);
        Ok(updated)
    }
}

#[async_trait]
impl VisitorRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Visitor>, AppError> {
        Ok(self.visitors.read().await.clone())
    }

    async fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Visitor>, AppError> {
        Ok(self
            .visitors
            .read()
            .await
            .iter()
            .filter(|v| v.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn check_in(&self, fields: NewVisitor) -> Result<Visitor, AppError> {
        let client = self
            .clients
            .read()
            .await
            .iter()
            .find(|c| c.id == fields.client_id)
            .cloned();

        let visitor = Visitor::new(fields).with_expansion(client);
        {
            let mut visitors = self.visitors.write().await;
            visitors.insert(0, visitor.clone());
        }
        self.publish_insert(Table::Visitors, &visitor);
        Ok(visitor)
    }

    async fn check_out(&self, id: &str) -> Result<Visitor, AppError> {
        let updated = {
            let mut visitors = self.visitors.write().await;
            let slot = visitors
                .iter_mut()
                .find(|v| v.id == id)
                .ok_or_else(|| AppError::NotFound(format!("visitor {}", id)))?;
            slot.check_out_now();
            slot.clone()
        };
        self.publish_update(Table::Visitors, &updated);
        Ok(updated)
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Payment>, AppError> {
        Ok(self.payments.read().await.clone())
    }

    async fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Payment>, AppError> {
        Ok(self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn create(&self, fields: NewPayment) -> Result<Payment, AppError> {
        let client = self
            .clients
            .read()
            .await
            .iter()
            .find(|c| c.id == fields.client_id)
            .cloned();

        let payment = Payment::new(fields).with_expansion(client);
        {
            let mut payments = self.payments.write().await;
            payments.insert(0, payment.clone());
        }
        self.publish_insert(Table::Payments, &payment);
        Ok(payment)
    }

    async fn update_status(&self, id: &str, status: PaymentStatus) -> Result<Payment, AppError> {
        let updated = {
            let mut payments = self.payments.write().await;
            let slot = payments
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| AppError::NotFound(format!("payment {}", id)))?;
            slot.set_status(status);
            slot.clone()
        };
        self.publish_update(Table::Payments, &updated);
        Ok(updated)
    }
}

#[async_trait]
impl OccurrenceRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Occurrence>, AppError> {
        let mut rows = self.occurrences.read().await.clone();
        rows.sort_by(|a, b| b.incident_date.cmp(&a.incident_date));
        Ok(rows)
    }

    async fn create(&self, fields: NewOccurrence) -> Result<Occurrence, AppError> {
        let occurrence = Occurrence::new(fields);
        {
            let mut occurrences = self.occurrences.write().await;
            occurrences.insert(0, occurrence.clone());
        }
        self.publish_insert(Table::OccurrenceBook, &occurrence);
        Ok(occurrence)
    }
}
