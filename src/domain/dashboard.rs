// Dashboard domain model
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Current dashboard state: the portfolio snapshot plus when it last changed.
/// The snapshot stays `None` until the first committed upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub last_updated: DateTime<Utc>,
    pub portfolio_snapshot: Option<Value>,
}

impl DashboardData {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            last_updated: now,
            portfolio_snapshot: None,
        }
    }

    pub fn has_snapshot(&self) -> bool {
        self.portfolio_snapshot.is_some()
    }
}
