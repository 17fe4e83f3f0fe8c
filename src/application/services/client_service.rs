use crate::application::ports::repositories::ClientRepository;
use crate::domain::entities::{Client, ClientPatch, NewClient};
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, fields: NewClient) -> Result<Client, AppError> {
        self.repository.create(fields).await
    }

    pub async fn get_all(&self) -> Result<Vec<Client>, AppError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Client>, AppError> {
        self.repository.get_by_id(id).await
    }

    pub async fn update(&self, id: &str, patch: ClientPatch) -> Result<Client, AppError> {
        self.repository.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
