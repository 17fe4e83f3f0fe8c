use crate::application::ports::change_source::ChangeEvent;
use crate::domain::table::{Table, TableRecord};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::RwLock;

/// リモートテーブルと同期し続けるコレクション
///
/// 初期スナップショットに購読イベントを畳み込み、現在の行集合を保持する。
/// 購読は先に確立してからスナップショットを取得する前提なので、
/// フェッチ中に届いたイベントはreceiverに滞留し、取りこぼしは起きない。
/// スナップショットとイベントの重複はidで抑制する。
pub struct LiveCollection<T> {
    table: Table,
    rows: Arc<RwLock<Vec<T>>>,
    listener: tokio::task::JoinHandle<()>,
}

impl<T> LiveCollection<T>
where
    T: TableRecord + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// 取得済みスナップショットと購読receiverから同期を開始する
    pub fn spawn(initial: Vec<T>, feed: broadcast::Receiver<ChangeEvent>) -> Self {
        let table = T::TABLE;

        // スナップショット自体の再取得も冪等になるよう、初期行もidで重複排除する
        let mut deduped: Vec<T> = Vec::with_capacity(initial.len());
        for row in initial {
            if !deduped.iter().any(|r: &T| r.record_id() == row.record_id()) {
                deduped.push(row);
            }
        }

        let rows = Arc::new(RwLock::new(deduped));
        let listener = tokio::spawn(Self::run(table, rows.clone(), feed));

        tracing::debug!("Live collection started for {}", table);
        Self {
            table,
            rows,
            listener,
        }
    }

    async fn run(
        table: Table,
        rows: Arc<RwLock<Vec<T>>>,
        mut feed: broadcast::Receiver<ChangeEvent>,
    ) {
        loop {
            match feed.recv().await {
                Ok(event) => Self::apply(table, &rows, event).await,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "Change feed for {} lagged, {} events dropped",
                        table,
                        skipped
                    );
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("Change feed for {} closed", table);
                    break;
                }
            }
        }
    }

    /// 1件の変更イベントを現在の行集合へ適用する
    ///
    /// INSERT: 同じidが無いときだけ末尾に追加。UPDATE: 同じidの行を
    /// その位置のまま置き換え。DELETE: idが一致する行を削除。
    /// いずれも再適用しても結果が変わらない。
    async fn apply(table: Table, rows: &RwLock<Vec<T>>, event: ChangeEvent) {
        match event {
            ChangeEvent::Insert { new } => match serde_json::from_value::<T>(new) {
                Ok(row) => {
                    let mut rows = rows.write().await;
                    if !rows.iter().any(|r| r.record_id() == row.record_id()) {
                        rows.push(row);
                    }
                }
                Err(e) => tracing::warn!("Failed to decode {} insert event: {}", table, e),
            },
            ChangeEvent::Update { new } => match serde_json::from_value::<T>(new) {
                Ok(row) => {
                    let mut rows = rows.write().await;
                    if let Some(slot) = rows.iter_mut().find(|r| r.record_id() == row.record_id())
                    {
                        *slot = row;
                    }
                }
                Err(e) => tracing::warn!("Failed to decode {} update event: {}", table, e),
            },
            ChangeEvent::Delete { id } => {
                let mut rows = rows.write().await;
                rows.retain(|r| r.record_id() != id);
            }
        }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    /// 現在の行集合のコピーを返す
    pub async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// 購読を終了する。以降イベントが適用されることはない
    pub fn stop(&self) {
        self.listener.abort();
        tracing::debug!("Live collection stopped for {}", self.table);
    }
}

impl<T> Drop for LiveCollection<T> {
    fn drop(&mut self) {
        // dropされたコレクションが後からイベントを畳み込むことはない
        self.listener.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::change_source::ChangeSource;
    use crate::domain::entities::guard::{Guard, GuardStatus, NewGuard};
    use crate::infrastructure::realtime::change_hub::ChangeHub;
    use std::time::Duration;

    fn guard(id: &str, full_name: &str, status: GuardStatus) -> Guard {
        let mut g = Guard::new(NewGuard {
            full_name: full_name.to_string(),
            email: format!("{}@example.com", full_name.to_lowercase()),
            phone: None,
            status,
        });
        g.id = id.to_string();
        g
    }

    async fn settle() {
        // spawnされた畳み込みタスクにイベントを処理させる
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn update_replaces_row_in_place() {
        let hub = ChangeHub::new(16);
        let initial = vec![guard("1", "John", GuardStatus::Active)];
        let collection = LiveCollection::spawn(initial, hub.subscribe(Table::Guards));

        let updated = guard("1", "John", GuardStatus::Inactive);
        hub.publish(Table::Guards, ChangeEvent::update(&updated).unwrap());
        settle().await;

        let rows = collection.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[0].status, GuardStatus::Inactive);
    }

    #[tokio::test]
    async fn update_preserves_position() {
        let hub = ChangeHub::new(16);
        let initial = vec![
            guard("1", "John", GuardStatus::Active),
            guard("2", "Jane", GuardStatus::Active),
            guard("3", "Jim", GuardStatus::Active),
        ];
        let collection = LiveCollection::spawn(initial, hub.subscribe(Table::Guards));

        let updated = guard("2", "Jane", GuardStatus::Inactive);
        hub.publish(Table::Guards, ChangeEvent::update(&updated).unwrap());
        settle().await;

        let ids: Vec<String> = collection
            .snapshot()
            .await
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn delete_removes_matching_row() {
        let hub = ChangeHub::new(16);
        let initial = vec![
            guard("1", "John", GuardStatus::Active),
            guard("2", "Jane", GuardStatus::Active),
        ];
        let collection = LiveCollection::spawn(initial, hub.subscribe(Table::Guards));

        hub.publish(Table::Guards, ChangeEvent::delete("1"));
        settle().await;

        let rows = collection.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "2");
    }

    #[tokio::test]
    async fn insert_racing_with_snapshot_is_suppressed_by_id() {
        let hub = ChangeHub::new(16);
        let in_snapshot = guard("5", "John", GuardStatus::Active);
        let collection =
            LiveCollection::spawn(vec![in_snapshot.clone()], hub.subscribe(Table::Guards));

        // フェッチと購読の競合で同じ行のINSERTが届くケース
        hub.publish(Table::Guards, ChangeEvent::insert(&in_snapshot).unwrap());
        settle().await;

        let rows = collection.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "5");
    }

    #[tokio::test]
    async fn duplicate_event_delivery_is_idempotent() {
        let hub = ChangeHub::new(16);
        let collection: LiveCollection<Guard> =
            LiveCollection::spawn(vec![], hub.subscribe(Table::Guards));

        let row = guard("1", "John", GuardStatus::Active);
        let insert = ChangeEvent::insert(&row).unwrap();
        hub.publish(Table::Guards, insert.clone());
        hub.publish(Table::Guards, insert);

        let update = ChangeEvent::update(&guard("1", "Johnny", GuardStatus::Active)).unwrap();
        hub.publish(Table::Guards, update.clone());
        hub.publish(Table::Guards, update);

        hub.publish(Table::Guards, ChangeEvent::delete("missing"));
        hub.publish(Table::Guards, ChangeEvent::delete("missing"));
        settle().await;

        let rows = collection.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name, "Johnny");
    }

    #[tokio::test]
    async fn initial_snapshot_is_deduplicated() {
        let hub = ChangeHub::new(16);
        let row = guard("1", "John", GuardStatus::Active);
        let collection =
            LiveCollection::spawn(vec![row.clone(), row], hub.subscribe(Table::Guards));

        assert_eq!(collection.len().await, 1);
    }

    #[tokio::test]
    async fn update_for_unknown_id_is_ignored() {
        let hub = ChangeHub::new(16);
        let initial = vec![guard("1", "John", GuardStatus::Active)];
        let collection = LiveCollection::spawn(initial, hub.subscribe(Table::Guards));

        let unknown = guard("9", "Ghost", GuardStatus::Active);
        hub.publish(Table::Guards, ChangeEvent::update(&unknown).unwrap());
        settle().await;

        let rows = collection.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "1");
    }

    #[tokio::test]
    async fn undecodable_event_is_skipped() {
        let hub = ChangeHub::new(16);
        let initial = vec![guard("1", "John", GuardStatus::Active)];
        let collection = LiveCollection::spawn(initial, hub.subscribe(Table::Guards));

        hub.publish(
            Table::Guards,
            ChangeEvent::Insert {
                new: serde_json::json!({"id": 42, "bogus": true}),
            },
        );
        settle().await;

        assert_eq!(collection.len().await, 1);
    }

    #[tokio::test]
    async fn stopped_collection_ignores_further_events() {
        let hub = ChangeHub::new(16);
        let initial = vec![guard("1", "John", GuardStatus::Active)];
        let collection = LiveCollection::spawn(initial, hub.subscribe(Table::Guards));

        collection.stop();
        settle().await;

        hub.publish(Table::Guards, ChangeEvent::delete("1"));
        settle().await;

        assert_eq!(collection.len().await, 1);
    }

    #[tokio::test]
    async fn events_buffered_before_spawn_are_applied() {
        let hub = ChangeHub::new(16);
        // 購読→フェッチ→spawnの順。フェッチ中に届いたイベントは滞留する
        let feed = hub.subscribe(Table::Guards);
        let row = guard("2", "Jane", GuardStatus::Active);
        hub.publish(Table::Guards, ChangeEvent::insert(&row).unwrap());

        let initial = vec![guard("1", "John", GuardStatus::Active)];
        let collection = LiveCollection::spawn(initial, feed);
        settle().await;

        let ids: Vec<String> = collection
            .snapshot()
            .await
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
