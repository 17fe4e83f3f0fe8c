use crate::application::ports::repositories::AttendanceRepository;
use crate::domain::entities::Attendance;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct AttendanceService {
    repository: Arc<dyn AttendanceRepository>,
}

impl AttendanceService {
    pub fn new(repository: Arc<dyn AttendanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Attendance>, AppError> {
        self.repository.get_all().await
    }

    pub async fn get_by_guard_id(&self, guard_id: &str) -> Result<Vec<Attendance>, AppError> {
        self.repository.get_by_guard_id(guard_id).await
    }

    pub async fn check_in(
        &self,
        guard_id: &str,
        schedule_id: &str,
    ) -> Result<Attendance, AppError> {
        self.repository.check_in(guard_id, schedule_id).await
    }

    pub async fn check_out(&self, id: &str) -> Result<Attendance, AppError> {
        self.repository.check_out(id).await
    }
}
