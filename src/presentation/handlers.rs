// HTTP request handlers
use crate::application::error::AppError;
use crate::application::upload_service::{UploadForm, UploadedFile};
use crate::domain::template::TemplateDescriptor;
use crate::presentation::app_state::AppState;
use crate::presentation::responses::error_response;
use axum::body::to_bytes;
use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct UploadQuery {
    pub commit: Option<bool>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Backend API is running successfully",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.config.server.environment,
    }))
}

/// Current dashboard snapshot, with the first-run message when nothing has
/// been uploaded yet
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard_service.get_dashboard().await {
        Ok(view) => Json(json!({
            "success": true,
            "data": view.data,
            "message": view.message,
        }))
        .into_response(),
        Err(e) => error_response(&e, state.config.server.is_development()),
    }
}

/// Accept an upload as multipart/form-data (file part plus optional
/// metadata fields) or as a direct JSON document. `commit=false` previews:
/// same validation, no store mutation.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    request: Request,
) -> Response {
    let commit = query.commit.unwrap_or(true);
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let outcome = if content_type.starts_with("multipart/form-data") {
        match Multipart::from_request(request, &()).await {
            Ok(multipart) => match read_upload_form(multipart).await {
                Ok(form) => state.upload_service.upload_file(form, commit).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(AppError::validation(format!(
                "Malformed multipart payload: {e}"
            ))),
        }
    } else if content_type.starts_with("application/json") {
        match to_bytes(request.into_body(), state.config.storage.max_upload_bytes).await {
            Ok(bytes) => state.upload_service.upload_document(bytes, commit).await,
            Err(e) => Err(AppError::validation(format!(
                "Unable to read request body: {e}"
            ))),
        }
    } else {
        Err(AppError::validation(
            "Unsupported content type. Send multipart/form-data or application/json.",
        ))
    };

    match outcome {
        Ok(outcome) => {
            let message = if outcome.committed {
                "File uploaded and processed successfully"
            } else {
                "File validated successfully; no changes were saved"
            };
            Json(json!({
                "success": true,
                "message": message,
                "version": outcome.version,
                "data": outcome.data,
            }))
            .into_response()
        }
        Err(e) => error_response(&e, state.config.server.is_development()),
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("uploaded-file").to_string();
                let file_content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Unable to read uploaded file: {e}"))
                })?;
                form.file = Some(UploadedFile {
                    filename,
                    content_type: file_content_type,
                    bytes,
                });
            }
            "uploadedBy" => {
                form.uploaded_by = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Unable to read uploadedBy field: {e}"))
                })?);
            }
            "description" => {
                form.description = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Unable to read description field: {e}"))
                })?);
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Static descriptor of the expected workbook layout
pub async fn get_template() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Template descriptor ready",
        "template": TemplateDescriptor::standard(),
    }))
}

/// Paginated version history
pub async fn list_versions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    match state.version_service.list(query.limit, query.offset).await {
        Ok(page) => {
            let message = if page.total > 0 {
                "Version history retrieved successfully"
            } else {
                "No versions available yet"
            };
            Json(json!({
                "success": true,
                "versions": page.versions,
                "total": page.total,
                "message": message,
            }))
            .into_response()
        }
        Err(e) => error_response(&e, state.config.server.is_development()),
    }
}

/// Single version record
pub async fn get_version(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.version_service.get(&id).await {
        Ok(version) => Json(json!({ "success": true, "version": version })).into_response(),
        Err(e) => error_response(&e, state.config.server.is_development()),
    }
}

/// Restore a historical version as the current snapshot
pub async fn rollback_version(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.version_service.rollback(&id).await {
        Ok(report) => Json(json!({
            "success": true,
            "message": format!("Rollback to version {id} completed"),
            "version": report.version,
            "note": report.note,
        }))
        .into_response(),
        Err(e) => error_response(&e, state.config.server.is_development()),
    }
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "message": "Not found",
                "details": { "path": uri.path() },
            }
        })),
    )
        .into_response()
}
