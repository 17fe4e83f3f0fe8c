use super::client::Client;
use crate::domain::table::{Table, TableRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: String,
    pub client_id: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
}

impl Payment {
    pub fn new(fields: NewPayment) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            client_id: fields.client_id,
            amount: fields.amount,
            status: fields.status,
            payment_date: fields.payment_date,
            created_at: chrono::Utc::now(),
            client: None,
        }
    }

    pub fn with_expansion(mut self, client: Option<Client>) -> Self {
        self.client = client;
        self
    }

    pub fn set_status(&mut self, status: PaymentStatus) {
        self.status = status;
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}

impl TableRecord for Payment {
    const TABLE: Table = Table::Payments;

    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub client_id: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
}
