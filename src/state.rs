use std::sync::Arc;

use tokio::sync::broadcast;

use crate::application::ports::{
    AttendanceRepository, ChangeEvent, ChangeSource, ClientRepository, GuardRepository,
    OccurrenceRepository, PaymentRepository, RecordStore, ScheduleRepository, VisitorRepository,
};
use crate::application::services::{
    AttendanceService, ClientService, GuardService, OccurrenceService, PaymentService,
    ReportService, ScheduleService, VisitorService,
};
use crate::domain::entities::{
    Attendance, Client, Guard, Occurrence, Payment, Schedule, Visitor,
};
use crate::domain::Table;
use crate::infrastructure::memory::{MemoryStore, SeedData};
use crate::infrastructure::realtime::LiveCollection;
use crate::infrastructure::store::RemoteRepository;
use crate::shared::{AppConfig, AppError, BackendMode};

/// RecordStoreの購読口をChangeSourceとして公開するアダプタ
struct StoreChanges(Arc<dyn RecordStore>);

impl ChangeSource for StoreChanges {
    fn subscribe(&self, table: Table) -> broadcast::Receiver<ChangeEvent> {
        self.0.subscribe(table)
    }
}

/// アプリケーション全体の状態を管理する構造体
///
/// バックエンドは起動時に`AppConfig`から一度だけ選択され、
/// 以降すべてのサービスが同じリポジトリ実装を共有する。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub guards: Arc<GuardService>,
    pub clients: Arc<ClientService>,
    pub schedules: Arc<ScheduleService>,
    pub attendance: Arc<AttendanceService>,
    pub visitors: Arc<VisitorService>,
    pub payments: Arc<PaymentService>,
    pub occurrences: Arc<OccurrenceService>,
    pub reports: Arc<ReportService>,
    changes: Arc<dyn ChangeSource>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// 設定に従ってバックエンドを選択して配線する
    ///
    /// リモートモードでは接続済みの`RecordStore`クライアントが必要。
    pub fn new(config: AppConfig, store: Option<Arc<dyn RecordStore>>) -> Result<Self, AppError> {
        match config.backend.mode {
            BackendMode::Memory => Ok(Self::with_memory_store(config, SeedData::sample())),
            BackendMode::Remote => {
                let store = store.ok_or_else(|| {
                    AppError::Configuration(
                        "remote backend selected but no record store client was provided"
                            .to_string(),
                    )
                })?;
                Ok(Self::with_record_store(config, store))
            }
        }
    }

    /// シードデータ入りのインメモリバックエンドで配線する
    pub fn with_memory_store(config: AppConfig, seed: SeedData) -> Self {
        tracing::info!("Using in-memory backend");
        let store = Arc::new(MemoryStore::new(seed, config.realtime.channel_capacity));
        let changes: Arc<dyn ChangeSource> = store.clone();
        Self::wire(
            config,
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            changes,
        )
    }

    /// リモートのRecordStoreバックエンドで配線する
    pub fn with_record_store(config: AppConfig, store: Arc<dyn RecordStore>) -> Self {
        tracing::info!("Using remote record store backend");
        let repository = Arc::new(RemoteRepository::new(store.clone()));
        let changes: Arc<dyn ChangeSource> = Arc::new(StoreChanges(store));
        Self::wire(
            config,
            repository.clone(),
            repository.clone(),
            repository.clone(),
            repository.clone(),
            repository.clone(),
            repository.clone(),
            repository,
            changes,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn wire(
        config: AppConfig,
        guards: Arc<dyn GuardRepository>,
        clients: Arc<dyn ClientRepository>,
        schedules: Arc<dyn ScheduleRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        visitors: Arc<dyn VisitorRepository>,
        payments: Arc<dyn PaymentRepository>,
        occurrences: Arc<dyn OccurrenceRepository>,
        changes: Arc<dyn ChangeSource>,
    ) -> Self {
        let reports = Arc::new(ReportService::new(
            guards.clone(),
            visitors.clone(),
            payments.clone(),
            schedules.clone(),
        ));
        Self {
            config,
            guards: Arc::new(GuardService::new(guards)),
            clients: Arc::new(ClientService::new(clients)),
            schedules: Arc::new(ScheduleService::new(schedules)),
            attendance: Arc::new(AttendanceService::new(attendance)),
            visitors: Arc::new(VisitorService::new(visitors)),
            payments: Arc::new(PaymentService::new(payments)),
            occurrences: Arc::new(OccurrenceService::new(occurrences)),
            reports,
            changes,
        }
    }

    /// 警備員一覧のライブコレクションを起動
    ///
    /// 先に購読してからスナップショットを取得するため、
    /// 取得中に届いた変更は受信側でバッファされて取りこぼさない。
    /// スナップショット取得の失敗はそのまま呼び出し元へ返す。
    pub async fn watch_guards(&self) -> Result<LiveCollection<Guard>, AppError> {
        let feed = self.changes.subscribe(Table::Guards);
        let initial = self.guards.get_all().await?;
        Ok(LiveCollection::spawn(initial, feed))
    }

    pub async fn watch_clients(&self) -> Result<LiveCollection<Client>, AppError> {
        let feed = self.changes.subscribe(Table::Clients);
        let initial = self.clients.get_all().await?;
        Ok(LiveCollection::spawn(initial, feed))
    }

    pub async fn watch_schedules(&self) -> Result<LiveCollection<Schedule>, AppError> {
        let feed = self.changes.subscribe(Table::Schedules);
        let initial = self.schedules.get_all().await?;
        Ok(LiveCollection::spawn(initial, feed))
    }

    pub async fn watch_attendance(&self) -> Result<LiveCollection<Attendance>, AppError> {
        let feed = self.changes.subscribe(Table::Attendance);
        let initial = self.attendance.get_all().await?;
        Ok(LiveCollection::spawn(initial, feed))
    }

    pub async fn watch_visitors(&self) -> Result<LiveCollection<Visitor>, AppError> {
        let feed = self.changes.subscribe(Table::Visitors);
        let initial = self.visitors.get_all().await?;
        Ok(LiveCollection::spawn(initial, feed))
    }

    pub async fn watch_payments(&self) -> Result<LiveCollection<Payment>, AppError> {
        let feed = self.changes.subscribe(Table::Payments);
        let initial = self.payments.get_all().await?;
        Ok(LiveCollection::spawn(initial, feed))
    }

    pub async fn watch_occurrences(&self) -> Result<LiveCollection<Occurrence>, AppError> {
        let feed = self.changes.subscribe(Table::OccurrenceBook);
        let initial = self.occurrences.get_all().await?;
        Ok(LiveCollection::spawn(initial, feed))
    }
}
