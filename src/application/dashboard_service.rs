// Dashboard service - Use case for reading the current snapshot
use crate::application::error::AppError;
use crate::application::version_store::VersionStore;
use crate::domain::dashboard::DashboardData;
use std::sync::Arc;

const MESSAGE_POPULATED: &str = "Dashboard data retrieved successfully";
const MESSAGE_EMPTY: &str = "No data uploaded yet. Please upload an Excel or JSON file.";

/// Snapshot plus the human-readable status message. The message text is
/// part of the observable contract: the front end shows it on first run.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub data: DashboardData,
    pub message: &'static str,
}

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn VersionStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn VersionStore>) -> Self {
        Self { store }
    }

    pub async fn get_dashboard(&self) -> Result<DashboardView, AppError> {
        let data = self.store.current_dashboard().await?;
        let message = if data.has_snapshot() {
            MESSAGE_POPULATED
        } else {
            MESSAGE_EMPTY
        };
        Ok(DashboardView { data, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::UploadMeta;
    use crate::infrastructure::memory_store::InMemoryVersionStore;
    use serde_json::json;

    fn meta(filename: &str) -> UploadMeta {
        UploadMeta {
            filename: filename.to_string(),
            size: 0,
            uploaded_by: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_first_run_message() {
        let store = Arc::new(InMemoryVersionStore::new(10));
        let service = DashboardService::new(store);

        let view = service.get_dashboard().await.unwrap();
        assert!(!view.data.has_snapshot());
        assert_eq!(
            view.message,
            "No data uploaded yet. Please upload an Excel or JSON file."
        );
    }

    #[tokio::test]
    async fn test_populated_message() {
        let store = Arc::new(InMemoryVersionStore::new(10));
        store
            .record_upload(json!({"title": "Q4"}), meta("p.json"))
            .await
            .unwrap();
        let service = DashboardService::new(store);

        let view = service.get_dashboard().await.unwrap();
        assert!(view.data.has_snapshot());
        assert_eq!(view.message, "Dashboard data retrieved successfully");
    }
}
