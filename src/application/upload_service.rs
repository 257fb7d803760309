// Upload service - Use case for validating and persisting uploads
use crate::application::error::AppError;
use crate::application::version_store::VersionStore;
use crate::application::workbook_parser::WorkbookParser;
use crate::domain::version::{UploadMeta, VersionRecord};
use bytes::Bytes;
use serde_json::{json, Value};
use std::sync::Arc;

const JSON_CONTENT_TYPE: &str = "application/json";
const SPREADSHEET_CONTENT_TYPES: [&str; 2] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];
const FALLBACK_FILENAME: &str = "uploaded-file";

/// One file part from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// The full multipart form: the file plus optional free-text metadata.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub uploaded_by: Option<String>,
    pub description: Option<String>,
}

/// What an upload produced. `version` is None on the preview path, which
/// validates and extracts but never touches the store.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub version: Option<VersionRecord>,
    pub data: Value,
    pub committed: bool,
}

#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn VersionStore>,
    parser: Arc<dyn WorkbookParser>,
}

impl UploadService {
    pub fn new(store: Arc<dyn VersionStore>, parser: Arc<dyn WorkbookParser>) -> Self {
        Self { store, parser }
    }

    /// Handle a multipart upload. Validation happens before the
    /// preview/commit branch so both modes surface identical errors.
    pub async fn upload_file(
        &self,
        form: UploadForm,
        commit: bool,
    ) -> Result<UploadOutcome, AppError> {
        let file = form
            .file
            .ok_or_else(|| AppError::validation("No file uploaded"))?;
        let data = self.extract_payload(&file)?;
        let meta = UploadMeta {
            filename: file.filename,
            size: file.bytes.len() as u64,
            uploaded_by: form.uploaded_by,
            description: form.description,
        };
        self.finish(data, meta, commit).await
    }

    /// Handle a direct JSON document upload. The snapshot payload is the
    /// `data` field, or the whole document when `data` is absent.
    pub async fn upload_document(
        &self,
        body: Bytes,
        commit: bool,
    ) -> Result<UploadOutcome, AppError> {
        let document: Value = serde_json::from_slice(&body).map_err(|e| {
            AppError::validation_with_details(
                "Request body is not valid JSON",
                json!({
                    "parseError": e.to_string(),
                    "raw": String::from_utf8_lossy(&body),
                }),
            )
        })?;

        let filename = document
            .get("filename")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_FILENAME)
            .to_string();
        let size = document.get("size").and_then(Value::as_u64).unwrap_or(0);
        let uploaded_by = document
            .get("uploadedBy")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        let description = document
            .get("description")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        let data = match document.get("data").cloned() {
            Some(data) => data,
            None => document,
        };

        let meta = UploadMeta {
            filename,
            size,
            uploaded_by,
            description,
        };
        self.finish(data, meta, commit).await
    }

    fn extract_payload(&self, file: &UploadedFile) -> Result<Value, AppError> {
        if file.content_type == JSON_CONTENT_TYPE {
            return serde_json::from_slice(&file.bytes).map_err(|e| {
                AppError::validation_with_details(
                    "Uploaded file is not valid JSON",
                    json!({
                        "parseError": e.to_string(),
                        "raw": String::from_utf8_lossy(&file.bytes),
                    }),
                )
            });
        }

        if SPREADSHEET_CONTENT_TYPES.contains(&file.content_type.as_str()) {
            return self
                .parser
                .parse(&file.filename, &file.bytes)
                .map_err(|e| {
                    AppError::validation_with_details(
                        "Uploaded workbook could not be parsed",
                        json!({"parseError": e.to_string()}),
                    )
                });
        }

        Err(AppError::validation(
            "Invalid file type. Only Excel and JSON files are allowed.",
        ))
    }

    async fn finish(
        &self,
        data: Value,
        meta: UploadMeta,
        commit: bool,
    ) -> Result<UploadOutcome, AppError> {
        if !commit {
            tracing::debug!(filename = %meta.filename, "Preview upload validated, not persisted");
            return Ok(UploadOutcome {
                version: None,
                data,
                committed: false,
            });
        }

        let version = self.store.record_upload(data.clone(), meta).await?;
        tracing::debug!(version = %version.id, filename = %version.filename, "Upload committed");
        Ok(UploadOutcome {
            version: Some(version),
            data,
            committed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::InMemoryVersionStore;

    struct FixedParser;

    impl WorkbookParser for FixedParser {
        fn parse(&self, filename: &str, _bytes: &[u8]) -> anyhow::Result<Value> {
            Ok(json!({"workbook": filename}))
        }
    }

    fn service() -> (Arc<InMemoryVersionStore>, UploadService) {
        let store = Arc::new(InMemoryVersionStore::new(10));
        let service = UploadService::new(store.clone(), Arc::new(FixedParser));
        (store, service)
    }

    fn json_file(filename: &str, body: &str) -> UploadForm {
        UploadForm {
            file: Some(UploadedFile {
                filename: filename.to_string(),
                content_type: "application/json".to_string(),
                bytes: Bytes::from(body.as_bytes().to_vec()),
            }),
            uploaded_by: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_json_file_upload_commits() {
        let (store, service) = service();
        let outcome = service
            .upload_file(json_file("p.json", r#"{"title":"Q4"}"#), true)
            .await
            .unwrap();

        assert!(outcome.committed);
        let version = outcome.version.unwrap();
        assert_eq!(version.filename, "p.json");
        assert_eq!(outcome.data, json!({"title": "Q4"}));

        let dashboard = store.current_dashboard().await.unwrap();
        assert_eq!(dashboard.portfolio_snapshot, Some(json!({"title": "Q4"})));
    }

    #[tokio::test]
    async fn test_missing_file_is_validation_error() {
        let (store, service) = service();
        let err = service
            .upload_file(UploadForm::default(), true)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(store.list_versions(20, 0).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_rejects_unsupported_content_type() {
        let (store, service) = service();
        let form = UploadForm {
            file: Some(UploadedFile {
                filename: "notes.txt".to_string(),
                content_type: "text/plain".to_string(),
                bytes: Bytes::from_static(b"hello"),
            }),
            uploaded_by: None,
            description: None,
        };
        let err = service.upload_file(form, true).await.unwrap_err();

        match err {
            AppError::Validation { message, .. } => {
                assert_eq!(
                    message,
                    "Invalid file type. Only Excel and JSON files are allowed."
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.list_versions(20, 0).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_invalid_json_surfaces_raw_text() {
        let (_, service) = service();
        let err = service
            .upload_file(json_file("broken.json", "{not json"), true)
            .await
            .unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                let details = details.expect("parse errors carry details");
                assert_eq!(details["raw"], "{not json");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_preview_never_mutates_state() {
        let (store, service) = service();
        let outcome = service
            .upload_file(json_file("p.json", r#"{"title":"Q4"}"#), false)
            .await
            .unwrap();

        assert!(!outcome.committed);
        assert!(outcome.version.is_none());
        assert_eq!(outcome.data, json!({"title": "Q4"}));

        let dashboard = store.current_dashboard().await.unwrap();
        assert!(dashboard.portfolio_snapshot.is_none());
        assert_eq!(store.list_versions(20, 0).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_preview_and_commit_report_the_same_validation_error() {
        let (_, service) = service();
        let preview_err = service
            .upload_file(json_file("broken.json", "{not json"), false)
            .await
            .unwrap_err();
        let commit_err = service
            .upload_file(json_file("broken.json", "{not json"), true)
            .await
            .unwrap_err();

        assert_eq!(preview_err.to_string(), commit_err.to_string());
    }

    #[tokio::test]
    async fn test_spreadsheet_delegates_to_parser() {
        let (_, service) = service();
        let form = UploadForm {
            file: Some(UploadedFile {
                filename: "status.xlsx".to_string(),
                content_type:
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                        .to_string(),
                bytes: Bytes::from_static(b"PK\x03\x04"),
            }),
            uploaded_by: Some("PMO".to_string()),
            description: None,
        };
        let outcome = service.upload_file(form, true).await.unwrap();

        assert_eq!(outcome.data, json!({"workbook": "status.xlsx"}));
        assert_eq!(outcome.version.unwrap().uploaded_by, "PMO");
    }

    #[tokio::test]
    async fn test_document_upload_uses_embedded_data_and_filename() {
        let (store, service) = service();
        let body = Bytes::from_static(br#"{"filename":"p.json","data":{"title":"Q4"}}"#);
        let outcome = service.upload_document(body, true).await.unwrap();

        assert_eq!(outcome.version.unwrap().filename, "p.json");
        let dashboard = store.current_dashboard().await.unwrap();
        assert_eq!(dashboard.portfolio_snapshot.unwrap()["title"], "Q4");
    }

    #[tokio::test]
    async fn test_document_without_data_field_stores_whole_body() {
        let (store, service) = service();
        let body = Bytes::from_static(br#"{"title":"Q3 wrap-up"}"#);
        let outcome = service.upload_document(body, true).await.unwrap();

        assert_eq!(outcome.version.unwrap().filename, "uploaded-file");
        let dashboard = store.current_dashboard().await.unwrap();
        assert_eq!(dashboard.portfolio_snapshot.unwrap()["title"], "Q3 wrap-up");
    }

    #[tokio::test]
    async fn test_document_body_parse_failure_attaches_raw_text() {
        let (store, service) = service();
        let err = service
            .upload_document(Bytes::from_static(b"not json at all"), true)
            .await
            .unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details.unwrap()["raw"], "not json at all");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.list_versions(20, 0).await.unwrap().total, 0);
    }
}
