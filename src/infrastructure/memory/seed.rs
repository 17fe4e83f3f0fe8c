use crate::domain::entities::{
    Attendance, Client, Guard, GuardStatus, NewClient, NewGuard, NewOccurrence, NewSchedule,
    Occurrence, Payment, Schedule, Severity, Visitor,
};

/// MemoryStoreへ注入する初期データ
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub guards: Vec<Guard>,
    pub clients: Vec<Client>,
    pub schedules: Vec<Schedule>,
    pub attendance: Vec<Attendance>,
    pub visitors: Vec<Visitor>,
    pub payments: Vec<Payment>,
    pub occurrences: Vec<Occurrence>,
}

impl SeedData {
    /// バックエンド未設定の環境向けの固定サンプル
    pub fn sample() -> Self {
        // コレクションは作成行と同じくcreated_atの降順で持つ
        let john = Guard::new(NewGuard {
            full_name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            status: GuardStatus::Active,
        });
        let jane = Guard::new(NewGuard {
            full_name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: Some("555-0101".to_string()),
            status: GuardStatus::Active,
        });

        let acme = Client::new(NewClient {
            company_name: "Acme Corp".to_string(),
            contact_person: Some("Alice".to_string()),
            email: Some("alice@acme.com".to_string()),
            phone: Some("555-0200".to_string()),
            address: Some("1 Acme Way".to_string()),
        });
        let globex = Client::new(NewClient {
            company_name: "Globex".to_string(),
            contact_person: Some("Bob".to_string()),
            email: Some("bob@globex.com".to_string()),
            phone: Some("555-0201".to_string()),
            address: Some("100 Globex Plaza".to_string()),
        });

        let shift_start = chrono::Utc::now();
        let schedules = vec![Schedule::new(NewSchedule {
            guard_id: john.id.clone(),
            client_id: acme.id.clone(),
            shift_start,
            shift_end: shift_start + chrono::Duration::hours(4),
        })
        .with_expansions(Some(john.clone()), Some(acme.clone()))];

        let occurrences = vec![Occurrence::new(NewOccurrence {
            title: "Unsecured side gate".to_string(),
            description: "South gate found unlocked during patrol".to_string(),
            incident_date: shift_start - chrono::Duration::hours(12),
            reported_by: john.id.clone(),
            severity: Severity::Low,
            location: "1 Acme Way, south entrance".to_string(),
        })];

        Self {
            guards: vec![jane, john],
            clients: vec![globex, acme],
            schedules,
            attendance: Vec::new(),
            visitors: Vec::new(),
            payments: Vec::new(),
            occurrences,
        }
    }
}
