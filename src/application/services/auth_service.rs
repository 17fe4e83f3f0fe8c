use crate::application::ports::auth_gateway::{AuthGateway, AuthUser};
use crate::shared::error::AppError;
use std::sync::Arc;

/// 認証境界の薄いラッパー
///
/// コアは「ユーザーが居るか」を不透明なゲートとして扱うだけで、
/// 資格情報の中身には関与しない。
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.gateway.current_user().await.is_some()
    }

    pub async fn current_user(&self) -> Option<AuthUser> {
        self.gateway.current_user().await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        self.gateway.sign_in(email, password).await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        self.gateway.sign_up(email, password).await
    }

    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.gateway.sign_out().await
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), AppError> {
        self.gateway.reset_password(email).await
    }
}
