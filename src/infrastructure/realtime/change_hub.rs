use crate::application::ports::change_source::{ChangeEvent, ChangeSource};
use crate::domain::table::Table;
use std::collections::HashMap;
use tokio::sync::broadcast;

/// テーブルごとの変更通知ファンアウト
///
/// モック経路ではリポジトリの各ミューテーションがここへ発行し、
/// 購読者（LiveCollection）へ配信順のままブロードキャストされる。
pub struct ChangeHub {
    channels: HashMap<Table, broadcast::Sender<ChangeEvent>>,
}

impl ChangeHub {
    pub fn new(capacity: usize) -> Self {
        let mut channels = HashMap::with_capacity(Table::ALL.len());
        for table in Table::ALL {
            let (sender, _) = broadcast::channel(capacity);
            channels.insert(table, sender);
        }
        Self { channels }
    }

    pub fn publish(&self, table: Table, event: ChangeEvent) {
        // Table::ALLで全テーブル分を構築済みなのでエントリは必ず存在する
        let Some(sender) = self.channels.get(&table) else {
            return;
        };
        // 購読者がいないときのsendエラーは通知の取りこぼしではない
        if sender.send(event).is_err() {
            tracing::trace!("No subscribers for {} change", table);
        }
    }

    pub fn subscriber_count(&self, table: Table) -> usize {
        self.channels
            .get(&table)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl ChangeSource for ChangeHub {
    fn subscribe(&self, table: Table) -> broadcast::Receiver<ChangeEvent> {
        self.channels
            .get(&table)
            .expect("channel exists for every table")
            .subscribe()
    }
}
