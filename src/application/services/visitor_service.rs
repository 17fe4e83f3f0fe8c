use crate::application::ports::repositories::VisitorRepository;
use crate::domain::entities::{NewVisitor, Visitor};
use crate::shared::error::AppError;
use std::sync::Arc;

/// 受付フォームのフィールド。打刻はサービスが行う
#[derive(Debug, Clone)]
pub struct VisitorCheckIn {
    pub full_name: String,
    pub purpose: Option<String>,
    pub client_id: String,
}

pub struct VisitorService {
    repository: Arc<dyn VisitorRepository>,
}

impl VisitorService {
    pub fn new(repository: Arc<dyn VisitorRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Visitor>, AppError> {
        self.repository.get_all().await
    }

    pub async fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Visitor>, AppError> {
        self.repository.get_by_client_id(client_id).await
    }

    /// check_inを呼び出し時刻で打刻してから登録する
    pub async fn check_in(&self, form: VisitorCheckIn) -> Result<Visitor, AppError> {
        let fields = NewVisitor {
            full_name: form.full_name,
            purpose: form.purpose,
            check_in: chrono::Utc::now(),
            client_id: form.client_id,
        };
        self.repository.check_in(fields).await
    }

    pub async fn check_out(&self, id: &str) -> Result<Visitor, AppError> {
        self.repository.check_out(id).await
    }

    /// 現在構内にいる訪問者（check_out未設定）だけを返す
    pub async fn on_premises(&self) -> Result<Vec<Visitor>, AppError> {
        let visitors = self.repository.get_all().await?;
        Ok(visitors.into_iter().filter(|v| v.is_on_premises()).collect())
    }
}
