use crate::application::ports::repositories::GuardRepository;
use crate::domain::entities::{Guard, GuardPatch, GuardStatus, NewGuard};
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct GuardService {
    repository: Arc<dyn GuardRepository>,
}

impl GuardService {
    pub fn new(repository: Arc<dyn GuardRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, fields: NewGuard) -> Result<Guard, AppError> {
        self.repository.create(fields).await
    }

    pub async fn get_all(&self) -> Result<Vec<Guard>, AppError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Guard>, AppError> {
        self.repository.get_by_id(id).await
    }

    pub async fn update(&self, id: &str, patch: GuardPatch) -> Result<Guard, AppError> {
        self.repository.update(id, patch).await
    }

    /// 管理者による在籍ステータスの切り替え
    pub async fn set_status(&self, id: &str, status: GuardStatus) -> Result<Guard, AppError> {
        self.repository.update(id, GuardPatch::status(status)).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
