use crate::domain::entities::{
    Attendance, Client, ClientPatch, Guard, GuardPatch, NewClient, NewGuard, NewOccurrence,
    NewPayment, NewSchedule, NewVisitor, Occurrence, Payment, PaymentStatus, Schedule,
    SchedulePatch, Visitor,
};
use crate::shared::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait GuardRepository: Send + Sync {
    /// created_atの降順で全件を返す
    async fn get_all(&self) -> Result<Vec<Guard>, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Guard>, AppError>;
    async fn create(&self, fields: NewGuard) -> Result<Guard, AppError>;
    async fn update(&self, id: &str, patch: GuardPatch) -> Result<Guard, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Client>, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Client>, AppError>;
    async fn create(&self, fields: NewClient) -> Result<Client, AppError>;
    async fn update(&self, id: &str, patch: ClientPatch) -> Result<Client, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// shift_startの昇順。guard/clientを展開して返す
    async fn get_all(&self) -> Result<Vec<Schedule>, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Schedule>, AppError>;
    async fn create(&self, fields: NewSchedule) -> Result<Schedule, AppError>;
    async fn update(&self, id: &str, patch: SchedulePatch) -> Result<Schedule, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// check_inの降順。guard/scheduleを展開して返す
    async fn get_all(&self) -> Result<Vec<Attendance>, AppError>;
    async fn get_by_guard_id(&self, guard_id: &str) -> Result<Vec<Attendance>, AppError>;
    /// check_inはリポジトリが呼び出し時刻で打刻する
    async fn check_in(&self, guard_id: &str, schedule_id: &str) -> Result<Attendance, AppError>;
    async fn check_out(&self, id: &str) -> Result<Attendance, AppError>;
}

#[async_trait]
pub trait VisitorRepository: Send + Sync {
    /// check_inの降順。clientを展開して返す
    async fn get_all(&self) -> Result<Vec<Visitor>, AppError>;
    async fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Visitor>, AppError>;
    async fn check_in(&self, fields: NewVisitor) -> Result<Visitor, AppError>;
    async fn check_out(&self, id: &str) -> Result<Visitor, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// created_atの降順。clientを展開して返す
    async fn get_all(&self) -> Result<Vec<Payment>, AppError>;
    async fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Payment>, AppError>;
    async fn create(&self, fields: NewPayment) -> Result<Payment, AppError>;
    async fn update_status(&self, id: &str, status: PaymentStatus) -> Result<Payment, AppError>;
}

#[async_trait]
pub trait OccurrenceRepository: Send + Sync {
    /// incident_dateの降順で全件を返す
    async fn get_all(&self) -> Result<Vec<Occurrence>, AppError>;
    /// 新規記録はstatus=openで起票される
    async fn create(&self, fields: NewOccurrence) -> Result<Occurrence, AppError>;
}
