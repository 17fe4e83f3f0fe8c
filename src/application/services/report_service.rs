use crate::application::ports::repositories::{
    GuardRepository, PaymentRepository, ScheduleRepository, VisitorRepository,
};
use crate::shared::error::AppError;
use serde::Serialize;
use std::sync::Arc;

/// ダッシュボードに出す集計値
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub active_guards: usize,
    pub visitors_on_premises: usize,
    pub pending_payments: usize,
    pub pending_amount: f64,
    pub upcoming_shifts: usize,
}

pub struct ReportService {
    guards: Arc<dyn GuardRepository>,
    visitors: Arc<dyn VisitorRepository>,
    payments: Arc<dyn PaymentRepository>,
    schedules: Arc<dyn ScheduleRepository>,
}

impl ReportService {
    pub fn new(
        guards: Arc<dyn GuardRepository>,
        visitors: Arc<dyn VisitorRepository>,
        payments: Arc<dyn PaymentRepository>,
        schedules: Arc<dyn ScheduleRepository>,
    ) -> Self {
        Self {
            guards,
            visitors,
            payments,
            schedules,
        }
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let now = chrono::Utc::now();

        let (guards, visitors, payments, schedules) = futures::try_join!(
            self.guards.get_all(),
            self.visitors.get_all(),
            self.payments.get_all(),
            self.schedules.get_all(),
        )?;

        let pending: Vec<_> = payments.iter().filter(|p| p.is_pending()).collect();

        Ok(DashboardStats {
            active_guards: guards.iter().filter(|g| g.is_active()).count(),
            visitors_on_premises: visitors.iter().filter(|v| v.is_on_premises()).count(),
            pending_payments: pending.len(),
            pending_amount: pending.iter().map(|p| p.amount).sum(),
            upcoming_shifts: schedules.iter().filter(|s| s.shift_start > now).count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repositories::ClientRepository;
    use crate::domain::entities::{
        GuardStatus, NewGuard, NewPayment, NewSchedule, PaymentStatus,
    };
    use crate::infrastructure::memory::{MemoryStore, SeedData};
    use crate::application::services::visitor_service::{VisitorCheckIn, VisitorService};

    #[tokio::test]
    async fn dashboard_stats_aggregate_across_entities() {
        let store = Arc::new(MemoryStore::new(SeedData::sample(), 16));

        GuardRepository::create(
            store.as_ref(),
            NewGuard {
                full_name: "Off Duty".to_string(),
                email: "off@example.com".to_string(),
                phone: None,
                status: GuardStatus::Inactive,
            },
        )
        .await
        .unwrap();

        let client_id = ClientRepository::get_all(store.as_ref()).await.unwrap()[0]
            .id
            .clone();

        let visitor_service = VisitorService::new(store.clone());
        visitor_service
            .check_in(VisitorCheckIn {
                full_name: "Bob".to_string(),
                purpose: None,
                client_id: client_id.clone(),
            })
            .await
            .unwrap();
        let gone = visitor_service
            .check_in(VisitorCheckIn {
                full_name: "Carol".to_string(),
                purpose: None,
                client_id: client_id.clone(),
            })
            .await
            .unwrap();
        visitor_service.check_out(&gone.id).await.unwrap();

        PaymentRepository::create(
            store.as_ref(),
            NewPayment {
                client_id: client_id.clone(),
                amount: 500.0,
                status: PaymentStatus::Pending,
                payment_date: chrono::Utc::now(),
            },
        )
        .await
        .unwrap();
        PaymentRepository::create(
            store.as_ref(),
            NewPayment {
                client_id: client_id.clone(),
                amount: 250.0,
                status: PaymentStatus::Completed,
                payment_date: chrono::Utc::now(),
            },
        )
        .await
        .unwrap();

        let start = chrono::Utc::now() + chrono::Duration::hours(24);
        ScheduleRepository::create(
            store.as_ref(),
            NewSchedule {
                guard_id: GuardRepository::get_all(store.as_ref()).await.unwrap()[0]
                    .id
                    .clone(),
                client_id,
                shift_start: start,
                shift_end: start + chrono::Duration::hours(8),
            },
        )
        .await
        .unwrap();

        let service = ReportService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        );
        let stats = service.dashboard_stats().await.unwrap();

        // サンプルシードの2名に非アクティブ1名を足した状態
        assert_eq!(stats.active_guards, 2);
        assert_eq!(stats.visitors_on_premises, 1);
        assert_eq!(stats.pending_payments, 1);
        assert_eq!(stats.pending_amount, 500.0);
        assert_eq!(stats.upcoming_shifts, 1);
    }
}
