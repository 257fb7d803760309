// In-memory version store implementation
use crate::application::version_store::{RestoreOutcome, VersionPage, VersionStore};
use crate::domain::dashboard::DashboardData;
use crate::domain::version::{UploadMeta, VersionRecord};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

const ROLLBACK_UPLOADER: &str = "System";

/// A version record together with the snapshot payload that upload
/// produced. The payload stays internal so historical versions can be
/// restored; it is never serialized into listings.
#[derive(Debug, Clone)]
struct StoredVersion {
    record: VersionRecord,
    data: Value,
}

#[derive(Debug)]
struct StoreState {
    dashboard: DashboardData,
    versions: Vec<StoredVersion>,
}

/// Process-lifetime store guarding the snapshot and its history behind a
/// single lock, so writers replace the snapshot and prepend the record as
/// one critical section and readers always see a consistent pair.
#[derive(Debug)]
pub struct InMemoryVersionStore {
    state: RwLock<StoreState>,
    cap: usize,
}

impl InMemoryVersionStore {
    pub fn new(cap: usize) -> Self {
        Self {
            state: RwLock::new(StoreState {
                dashboard: DashboardData::empty(Utc::now()),
                versions: Vec::new(),
            }),
            cap,
        }
    }

    /// Time-derived id, unique within the store. Rapid uploads can land on
    /// the same millisecond; collisions resolve by incrementing.
    fn allocate_id(versions: &[StoredVersion]) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while versions.iter().any(|v| v.record.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn push_version(state: &mut StoreState, version: StoredVersion, cap: usize) {
        state.versions.insert(0, version);
        if state.versions.len() > cap {
            state.versions.truncate(cap);
        }
    }
}

#[async_trait]
impl VersionStore for InMemoryVersionStore {
    async fn current_dashboard(&self) -> anyhow::Result<DashboardData> {
        let state = self.state.read().await;
        Ok(state.dashboard.clone())
    }

    async fn list_versions(&self, limit: usize, offset: usize) -> anyhow::Result<VersionPage> {
        let state = self.state.read().await;
        let versions = state
            .versions
            .iter()
            .skip(offset)
            .take(limit)
            .map(|v| v.record.clone())
            .collect();
        Ok(VersionPage {
            versions,
            total: state.versions.len(),
        })
    }

    async fn get_version(&self, id: &str) -> anyhow::Result<Option<VersionRecord>> {
        let state = self.state.read().await;
        Ok(state
            .versions
            .iter()
            .find(|v| v.record.id == id)
            .map(|v| v.record.clone()))
    }

    async fn record_upload(
        &self,
        snapshot: Value,
        meta: UploadMeta,
    ) -> anyhow::Result<VersionRecord> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let id = Self::allocate_id(&state.versions);
        let record = VersionRecord::from_upload(id, now, meta);

        state.dashboard = DashboardData {
            last_updated: now,
            portfolio_snapshot: Some(snapshot.clone()),
        };
        Self::push_version(
            &mut state,
            StoredVersion {
                record: record.clone(),
                data: snapshot,
            },
            self.cap,
        );
        Ok(record)
    }

    async fn restore_version(&self, id: &str) -> anyhow::Result<Option<RestoreOutcome>> {
        let mut state = self.state.write().await;
        let Some(target) = state.versions.iter().find(|v| v.record.id == id).cloned() else {
            return Ok(None);
        };

        let now = Utc::now();
        let marker_id = Self::allocate_id(&state.versions);
        let marker = VersionRecord::from_upload(
            marker_id,
            now,
            UploadMeta {
                filename: target.record.filename.clone(),
                size: target.record.size,
                uploaded_by: Some(ROLLBACK_UPLOADER.to_string()),
                description: Some(format!("Rollback to version {id}")),
            },
        );

        state.dashboard = DashboardData {
            last_updated: now,
            portfolio_snapshot: Some(target.data.clone()),
        };
        Self::push_version(
            &mut state,
            StoredVersion {
                record: marker.clone(),
                data: target.data.clone(),
            },
            self.cap,
        );
        Ok(Some(RestoreOutcome {
            restored: target.record,
            marker,
        }))
    }
}
