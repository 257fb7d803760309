// Error-to-response conversion for the HTTP boundary
use crate::application::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Convert an application error into the uniform `{"error": {...}}` body.
/// Internal error detail is suppressed unless running in development.
pub fn error_response(err: &AppError, development: bool) -> Response {
    let (status, message, details) = match err {
        AppError::Validation { message, details } => {
            (StatusCode::BAD_REQUEST, message.clone(), details.clone())
        }
        AppError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone(), None),
        AppError::Internal(source) => {
            tracing::error!(error = %source, "Unhandled internal error");
            let message = if development {
                source.to_string()
            } else {
                "Internal server error".to_string()
            };
            (StatusCode::INTERNAL_SERVER_ERROR, message, None)
        }
    };

    if status != StatusCode::INTERNAL_SERVER_ERROR {
        tracing::warn!(status = %status, message = %message, "Request rejected");
    }

    let mut body = json!({ "error": { "message": message } });
    if let Some(details) = details {
        body["error"]["details"] = details;
    }
    (status, Json(body)).into_response()
}
