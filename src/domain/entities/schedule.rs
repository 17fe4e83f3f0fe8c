use super::client::Client;
use super::guard::Guard;
use crate::domain::table::{Table, TableRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub id: String,
    pub guard_id: String,
    pub client_id: String,
    pub shift_start: DateTime<Utc>,
    pub shift_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// フェッチ時に解決される展開フィールド
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Guard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
}

impl Schedule {
    pub fn new(fields: NewSchedule) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            guard_id: fields.guard_id,
            client_id: fields.client_id,
            shift_start: fields.shift_start,
            shift_end: fields.shift_end,
            created_at: chrono::Utc::now(),
            guard: None,
            client: None,
        }
    }

    pub fn with_expansions(mut self, guard: Option<Guard>, client: Option<Client>) -> Self {
        self.guard = guard;
        self.client = client;
        self
    }

    pub fn apply(&mut self, patch: SchedulePatch) {
        if let Some(guard_id) = patch.guard_id {
            self.guard_id = guard_id;
        }
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(shift_start) = patch.shift_start {
            self.shift_start = shift_start;
        }
        if let Some(shift_end) = patch.shift_end {
            self.shift_end = shift_end;
        }
    }
}

impl TableRecord for Schedule {
    const TABLE: Table = Table::Schedules;

    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSchedule {
    pub guard_id: String,
    pub client_id: String,
    pub shift_start: DateTime<Utc>,
    pub shift_end: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_end: Option<DateTime<Utc>>,
}
