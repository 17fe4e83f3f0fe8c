use crate::application::ports::repositories::OccurrenceRepository;
use crate::domain::entities::{NewOccurrence, Occurrence, Severity};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// 発生記録フォームのフィールド。reported_byは起票者のidで補われる
#[derive(Debug, Clone)]
pub struct OccurrenceReport {
    pub title: String,
    pub description: String,
    pub incident_date: DateTime<Utc>,
    pub severity: Severity,
    pub location: String,
}

pub struct OccurrenceService {
    repository: Arc<dyn OccurrenceRepository>,
}

impl OccurrenceService {
    pub fn new(repository: Arc<dyn OccurrenceRepository>) -> Self {
        Self { repository }
    }

    /// incident_dateの降順で全件を返す
    pub async fn get_all(&self) -> Result<Vec<Occurrence>, AppError> {
        self.repository.get_all().await
    }

    pub async fn report(
        &self,
        form: OccurrenceReport,
        reported_by: &str,
    ) -> Result<Occurrence, AppError> {
        let fields = NewOccurrence {
            title: form.title,
            description: form.description,
            incident_date: form.incident_date,
            reported_by: reported_by.to_string(),
            severity: form.severity,
            location: form.location,
        };
        self.repository.create(fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Repo {}

        #[async_trait]
        impl OccurrenceRepository for Repo {
            async fn get_all(&self) -> Result<Vec<Occurrence>, AppError>;
            async fn create(&self, fields: NewOccurrence) -> Result<Occurrence, AppError>;
        }
    }

    #[tokio::test]
    async fn report_attributes_the_record_to_the_reporter() {
        let mut repo = MockRepo::new();
        repo.expect_create()
            .withf(|fields| fields.reported_by == "g1" && fields.title == "Broken lock")
            .times(1)
            .returning(|fields| Ok(Occurrence::new(fields)));

        let service = OccurrenceService::new(Arc::new(repo));
        let occurrence = service
            .report(
                OccurrenceReport {
                    title: "Broken lock".to_string(),
                    description: "Rear door lock damaged".to_string(),
                    incident_date: chrono::Utc::now(),
                    severity: Severity::High,
                    location: "Warehouse B".to_string(),
                },
                "g1",
            )
            .await
            .unwrap();

        assert!(occurrence.is_open());
        assert_eq!(occurrence.reported_by, "g1");
    }
}
