use std::time::Duration;

use tracing::info;

use guardpost::application::services::VisitorCheckIn;
use guardpost::domain::entities::{GuardStatus, NewGuard};
use guardpost::{init_logging, AppConfig, AppState};

/// インメモリバックエンドで管理コンソールの配線を一通り動かすデモ
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env();
    let state = AppState::new(config, None)?;

    info!("guardpost console demo starting");

    let guards = state.watch_guards().await?;
    let visitors = state.watch_visitors().await?;

    let recruit = state
        .guards
        .register(NewGuard {
            full_name: "Kenji Watanabe".to_string(),
            email: "kenji@example.com".to_string(),
            phone: Some("090-0000-0000".to_string()),
            status: GuardStatus::Active,
        })
        .await?;
    info!(id = %recruit.id, "registered guard");

    let clients = state.clients.get_all().await?;
    if let Some(client) = clients.first() {
        let visit = state
            .visitors
            .check_in(VisitorCheckIn {
                full_name: "Aiko Tanaka".to_string(),
                purpose: Some("contract review".to_string()),
                client_id: client.id.clone(),
            })
            .await?;
        info!(id = %visit.id, client = %client.company_name, "visitor checked in");
    }

    state
        .guards
        .set_status(&recruit.id, GuardStatus::Inactive)
        .await?;

    // ブロードキャストが畳み込まれるのを待つ
    tokio::time::sleep(Duration::from_millis(50)).await;

    println!("guards on file:");
    for guard in guards.snapshot().await {
        println!("  {} <{}> [{:?}]", guard.full_name, guard.email, guard.status);
    }

    println!("visitors on premises:");
    for visitor in visitors.snapshot().await {
        if visitor.is_on_premises() {
            let purpose = visitor.purpose.as_deref().unwrap_or("-");
            println!("  {} ({})", visitor.full_name, purpose);
        }
    }

    let stats = state.reports.dashboard_stats().await?;
    println!(
        "dashboard: {} active guards, {} visitors on premises, {} pending payments ({:.2} due), {} upcoming shifts",
        stats.active_guards,
        stats.visitors_on_premises,
        stats.pending_payments,
        stats.pending_amount,
        stats.upcoming_shifts
    );

    Ok(())
}
