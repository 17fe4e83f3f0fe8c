use super::guard::Guard;
use super::schedule::Schedule;
use crate::domain::table::{Table, TableRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attendance {
    pub id: String,
    pub guard_id: String,
    pub schedule_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Guard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl Attendance {
    /// 出勤記録を作成する。check_inは呼び出し時刻で打刻される
    pub fn check_in_now(guard_id: String, schedule_id: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            guard_id,
            schedule_id,
            check_in: now,
            check_out: None,
            created_at: now,
            guard: None,
            schedule: None,
        }
    }

    pub fn with_expansions(mut self, guard: Option<Guard>, schedule: Option<Schedule>) -> Self {
        self.guard = guard;
        self.schedule = schedule;
        self
    }

    pub fn check_out_now(&mut self) {
        self.check_out = Some(chrono::Utc::now());
    }

    pub fn is_on_duty(&self) -> bool {
        self.check_out.is_none()
    }
}

impl TableRecord for Attendance {
    const TABLE: Table = Table::Attendance;

    fn record_id(&self) -> &str {
        &self.id
    }
}
