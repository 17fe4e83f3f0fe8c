use crate::domain::table::Table;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

/// リモートテーブルで起きた1件の変更通知
///
/// 行の中身はストアのワイヤ表現のまま運ぶ（デコードは受信側で行う）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ChangeEvent {
    Insert { new: Value },
    Update { new: Value },
    Delete { id: String },
}

impl ChangeEvent {
    pub fn insert<T: Serialize>(row: &T) -> serde_json::Result<Self> {
        Ok(ChangeEvent::Insert {
            new: serde_json::to_value(row)?,
        })
    }

    pub fn update<T: Serialize>(row: &T) -> serde_json::Result<Self> {
        Ok(ChangeEvent::Update {
            new: serde_json::to_value(row)?,
        })
    }

    pub fn delete(id: impl Into<String>) -> Self {
        ChangeEvent::Delete { id: id.into() }
    }
}

/// テーブル単位の変更通知の購読口
///
/// 購読ごとに独立したreceiverを返す。receiverを破棄すれば購読は終わる。
pub trait ChangeSource: Send + Sync {
    fn subscribe(&self, table: Table) -> broadcast::Receiver<ChangeEvent>;
}
