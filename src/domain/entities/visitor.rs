use super::client::Client;
use crate::domain::table::{Table, TableRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visitor {
    pub id: String,
    pub full_name: String,
    pub purpose: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
}

impl Visitor {
    pub fn new(fields: NewVisitor) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: fields.full_name,
            purpose: fields.purpose,
            check_in: fields.check_in,
            check_out: None,
            client_id: fields.client_id,
            created_at: chrono::Utc::now(),
            client: None,
        }
    }

    pub fn with_expansion(mut self, client: Option<Client>) -> Self {
        self.client = client;
        self
    }

    pub fn check_out_now(&mut self) {
        self.check_out = Some(chrono::Utc::now());
    }

    /// 構内に滞在中かどうか（check_outが未設定なら滞在中）
    pub fn is_on_premises(&self) -> bool {
        self.check_out.is_none()
    }
}

impl TableRecord for Visitor {
    const TABLE: Table = Table::Visitors;

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// 受付フォームのフィールド。check_inは呼び出し側が打刻して渡す
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVisitor {
    pub full_name: String,
    pub purpose: Option<String>,
    pub check_in: DateTime<Utc>,
    pub client_id: String,
}
