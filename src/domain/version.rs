// Version history domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

const DEFAULT_UPLOADER: &str = "Anonymous";
const DEFAULT_DESCRIPTION: &str = "File upload";

/// Metadata supplied with an upload, before defaults are applied.
#[derive(Debug, Clone)]
pub struct UploadMeta {
    pub filename: String,
    pub size: u64,
    pub uploaded_by: Option<String>,
    pub description: Option<String>,
}

/// One historical upload event. Immutable once created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub filename: String,
    pub size: u64,
    pub uploaded_by: String,
    pub description: String,
}

impl VersionRecord {
    pub fn from_upload(id: String, timestamp: DateTime<Utc>, meta: UploadMeta) -> Self {
        Self {
            id,
            timestamp,
            filename: meta.filename,
            size: meta.size,
            uploaded_by: meta
                .uploaded_by
                .unwrap_or_else(|| DEFAULT_UPLOADER.to_string()),
            description: meta
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_meta_defaults() {
        let meta = UploadMeta {
            filename: "report.json".to_string(),
            size: 42,
            uploaded_by: None,
            description: None,
        };
        let record = VersionRecord::from_upload("1".to_string(), Utc::now(), meta);
        assert_eq!(record.uploaded_by, "Anonymous");
        assert_eq!(record.description, "File upload");

        let meta = UploadMeta {
            filename: "report.json".to_string(),
            size: 42,
            uploaded_by: Some("PMO".to_string()),
            description: Some("Weekly refresh".to_string()),
        };
        let record = VersionRecord::from_upload("2".to_string(), Utc::now(), meta);
        assert_eq!(record.uploaded_by, "PMO");
        assert_eq!(record.description, "Weekly refresh");
    }
}
