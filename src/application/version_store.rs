// Store trait for the dashboard snapshot and its version history
use crate::domain::dashboard::DashboardData;
use crate::domain::version::{UploadMeta, VersionRecord};
use async_trait::async_trait;
use serde_json::Value;

/// One page of version history plus the full history length, so callers can
/// paginate without a second round trip.
#[derive(Debug, Clone)]
pub struct VersionPage {
    pub versions: Vec<VersionRecord>,
    pub total: usize,
}

/// Result of restoring a historical version: the record that was restored
/// and the new marker record documenting the rollback.
#[derive(Debug, Clone)]
pub struct RestoreOutcome {
    pub restored: VersionRecord,
    pub marker: VersionRecord,
}

#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Current dashboard state; the snapshot is None until the first
    /// committed upload.
    async fn current_dashboard(&self) -> anyhow::Result<DashboardData>;

    /// Paginate over the capped history, newest first. Out-of-range offsets
    /// yield an empty page, never an error.
    async fn list_versions(&self, limit: usize, offset: usize) -> anyhow::Result<VersionPage>;

    /// Look up a single version record by id.
    async fn get_version(&self, id: &str) -> anyhow::Result<Option<VersionRecord>>;

    /// Atomically replace the snapshot and prepend a new version record,
    /// then truncate history to the cap. A reader must never observe a
    /// record whose snapshot has not been applied, or vice versa.
    async fn record_upload(&self, snapshot: Value, meta: UploadMeta)
        -> anyhow::Result<VersionRecord>;

    /// Restore the snapshot stored with version `id` and prepend a marker
    /// record. Returns None (leaving state untouched) for an unknown id.
    async fn restore_version(&self, id: &str) -> anyhow::Result<Option<RestoreOutcome>>;
}
