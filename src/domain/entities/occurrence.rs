use crate::domain::table::{Table, TableRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceStatus {
    Open,
    Investigating,
    Resolved,
    Closed,
}

/// 発生記録簿の1件分のインシデント記録
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Occurrence {
    pub id: String,
    pub title: String,
    pub description: String,
    pub incident_date: DateTime<Utc>,
    pub reported_by: String,
    pub severity: Severity,
    pub status: OccurrenceStatus,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Occurrence {
    /// 記録はstatus=openで起票される
    pub fn new(fields: NewOccurrence) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: fields.title,
            description: fields.description,
            incident_date: fields.incident_date,
            reported_by: fields.reported_by,
            severity: fields.severity,
            status: OccurrenceStatus::Open,
            location: fields.location,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            OccurrenceStatus::Open | OccurrenceStatus::Investigating
        )
    }
}

impl TableRecord for Occurrence {
    const TABLE: Table = Table::OccurrenceBook;

    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOccurrence {
    pub title: String,
    pub description: String,
    pub incident_date: DateTime<Utc>,
    pub reported_by: String,
    pub severity: Severity,
    pub location: String,
}
