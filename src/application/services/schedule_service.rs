use crate::application::ports::repositories::ScheduleRepository;
use crate::domain::entities::{NewSchedule, Schedule, SchedulePatch};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct ScheduleService {
    repository: Arc<dyn ScheduleRepository>,
}

impl ScheduleService {
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Schedule>, AppError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Schedule>, AppError> {
        self.repository.get_by_id(id).await
    }

    pub async fn create(&self, fields: NewSchedule) -> Result<Schedule, AppError> {
        Self::validate_shift(fields.shift_start, fields.shift_end)?;
        self.repository.create(fields).await
    }

    pub async fn update(&self, id: &str, patch: SchedulePatch) -> Result<Schedule, AppError> {
        // 片側だけの変更でも更新後のシフト区間で検証する
        if patch.shift_start.is_some() || patch.shift_end.is_some() {
            let current = self
                .repository
                .get_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("schedule {}", id)))?;
            let shift_start = patch.shift_start.unwrap_or(current.shift_start);
            let shift_end = patch.shift_end.unwrap_or(current.shift_end);
            Self::validate_shift(shift_start, shift_end)?;
        }
        self.repository.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    fn validate_shift(shift_start: DateTime<Utc>, shift_end: DateTime<Utc>) -> Result<(), AppError> {
        if shift_end <= shift_start {
            return Err(AppError::InvalidInput(
                "shift_end must be after shift_start".to_string(),
            ));
        }
        Ok(())
    }
}
