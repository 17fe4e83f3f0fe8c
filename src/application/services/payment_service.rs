use crate::application::ports::repositories::PaymentRepository;
use crate::domain::entities::{NewPayment, Payment, PaymentStatus};
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct PaymentService {
    repository: Arc<dyn PaymentRepository>,
}

impl PaymentService {
    pub fn new(repository: Arc<dyn PaymentRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Payment>, AppError> {
        self.repository.get_all().await
    }

    pub async fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Payment>, AppError> {
        self.repository.get_by_client_id(client_id).await
    }

    pub async fn record(&self, fields: NewPayment) -> Result<Payment, AppError> {
        self.repository.create(fields).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: PaymentStatus,
    ) -> Result<Payment, AppError> {
        self.repository.update_status(id, status).await
    }
}
