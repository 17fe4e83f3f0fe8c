use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// 認証プロバイダとの境界。実装は外部コラボレータが提供する
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn current_user(&self) -> Option<AuthUser>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AppError>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AppError>;
    async fn sign_out(&self) -> Result<(), AppError>;
    async fn reset_password(&self, email: &str) -> Result<(), AppError>;
}
