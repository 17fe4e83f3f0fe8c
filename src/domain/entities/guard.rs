use crate::domain::table::{Table, TableRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuardStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Guard {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: GuardStatus,
    pub created_at: DateTime<Utc>,
}

impl Guard {
    pub fn new(fields: NewGuard) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: fields.full_name,
            email: fields.email,
            phone: fields.phone,
            status: fields.status,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == GuardStatus::Active
    }

    pub fn apply(&mut self, patch: GuardPatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl TableRecord for Guard {
    const TABLE: Table = Table::Guards;

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// 登録フォームから渡される新規フィールド（idとcreated_atは生成される）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGuard {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: GuardStatus,
}

/// 部分更新。Noneのフィールドは変更しない
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GuardStatus>,
}

impl GuardPatch {
    pub fn status(status: GuardStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
