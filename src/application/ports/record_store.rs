use super::change_source::ChangeEvent;
use crate::domain::table::Table;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query failed on {0}: {1}")]
    Query(Table, String),

    #[error("Insert failed on {0}: {1}")]
    Insert(Table, String),

    #[error("Update failed on {0}: {1}")]
    Update(Table, String),

    #[error("Delete failed on {0}: {1}")]
    Delete(Table, String),

    #[error("Store connection failed: {0}")]
    Connection(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

/// 等値フィルタ。idや外部キーによる絞り込みに使う
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: &'static str,
    pub value: String,
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: &'static str,
    pub ascending: bool,
}

impl Order {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            ascending: false,
        }
    }
}

/// リモートのテーブルストアとの境界
///
/// ワイヤ形式は不透明。行はJSON値として出入りし、
/// id・created_atの採番はストア側の責務とする。
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn query(
        &self,
        table: Table,
        filter: Option<Filter>,
        order: Order,
    ) -> Result<Vec<Value>, StoreError>;

    async fn insert(&self, table: Table, fields: Value) -> Result<Value, StoreError>;

    async fn update(&self, table: Table, id: &str, fields: Value) -> Result<Value, StoreError>;

    async fn delete(&self, table: Table, id: &str) -> Result<(), StoreError>;

    fn subscribe(&self, table: Table) -> broadcast::Receiver<ChangeEvent>;
}
