// Version service - Use cases for history listing and rollback
use crate::application::error::AppError;
use crate::application::version_store::{VersionPage, VersionStore};
use crate::domain::version::VersionRecord;
use std::sync::Arc;

const DEFAULT_LIMIT: usize = 20;

/// Result of a completed rollback: the record that was restored plus a note
/// naming the marker record the restore produced.
#[derive(Debug, Clone)]
pub struct RollbackReport {
    pub version: VersionRecord,
    pub note: String,
}

#[derive(Clone)]
pub struct VersionService {
    store: Arc<dyn VersionStore>,
}

impl VersionService {
    pub fn new(store: Arc<dyn VersionStore>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<VersionPage, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let offset = offset.unwrap_or(0);
        Ok(self.store.list_versions(limit, offset).await?)
    }

    pub async fn get(&self, id: &str) -> Result<VersionRecord, AppError> {
        self.store
            .get_version(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Version {id} not found")))
    }

    pub async fn rollback(&self, id: &str) -> Result<RollbackReport, AppError> {
        let outcome = self
            .store
            .restore_version(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Version {id} not found")))?;

        tracing::info!(
            restored = %outcome.restored.id,
            marker = %outcome.marker.id,
            "Snapshot rolled back"
        );
        Ok(RollbackReport {
            version: outcome.restored,
            note: format!("Restore recorded as version {}", outcome.marker.id),
        })
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

    async fn seeded(count: usize) -> (Arc<InMemoryVersionStore>, VersionService) {
        let store = Arc::new(InMemoryVersionStore::new(10));
        for i in 0..count {
            store
                .record_upload(json!({"revision": i}), meta(&format!("v{i}.json")))
                .await
                .unwrap();
        }
        let service = VersionService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_list_applies_defaults() {
        let (_, service) = seeded(3).await;
        let page = service.list(None, None).await.unwrap();
        assert_eq!(page.versions.len(), 3);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (_, service) = seeded(1).await;
        let err = service.get("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rollback_unknown_id_leaves_store_unchanged() {
        let (store, service) = seeded(2).await;
        let before = store.current_dashboard().await.unwrap();

        let err = service.rollback("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let after = store.current_dashboard().await.unwrap();
        assert_eq!(before.portfolio_snapshot, after.portfolio_snapshot);
        assert_eq!(store.list_versions(20, 0).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_rollback_restores_snapshot_and_notes_marker() {
        let (store, service) = seeded(3).await;
        let page = store.list_versions(20, 0).await.unwrap();
        let oldest = page.versions.last().unwrap().clone();

        let report = service.rollback(&oldest.id).await.unwrap();
        assert_eq!(report.version.id, oldest.id);
        assert!(report.note.contains("Restore recorded as version"));

        let dashboard = store.current_dashboard().await.unwrap();
        assert_eq!(dashboard.portfolio_snapshot, Some(json!({"revision": 0})));
    }
}
