use serde::{Deserialize, Serialize};
use std::fmt;

/// リモートストア上のテーブル識別子
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Guards,
    Clients,
    Schedules,
    Attendance,
    Visitors,
    Payments,
    OccurrenceBook,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Guards,
        Table::Clients,
        Table::Schedules,
        Table::Attendance,
        Table::Visitors,
        Table::Payments,
        Table::OccurrenceBook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Guards => "guards",
            Table::Clients => "clients",
            Table::Schedules => "schedules",
            Table::Attendance => "attendance",
            Table::Visitors => "visitors",
            Table::Payments => "payments",
            Table::OccurrenceBook => "occurrence_book",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// テーブル行として同期対象になるレコード
pub trait TableRecord {
    const TABLE: Table;

    fn record_id(&self) -> &str;
}
