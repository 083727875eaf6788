use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::FieldError;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

/// The single error body every route answers with:
/// `{"error": <title>, "message": <detail>, "fields": [...]}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message, fields: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = ?self.message, "request failed");
        } else {
            debug!(status = %self.status, message = ?self.message, "request rejected");
        }
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let message = Some(e.to_string());
        match e {
            ServiceError::Validation(errs) => Self {
                fields: Some(errs.0),
                ..Self::new(StatusCode::BAD_REQUEST, "Validation Error", message)
            },
            ServiceError::IdMismatch { .. } => Self::new(StatusCode::BAD_REQUEST, "Id Mismatch", message),
            ServiceError::InvalidQuery(_) => Self::new(StatusCode::BAD_REQUEST, "Bad Request", message),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", message),
            ServiceError::Storage(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", message),
        }
    }
}

/// Undecodable JSON is a 400. Other rejections keep axum's status, e.g. 415
/// for a missing content type or 413 for an oversized body.
impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        match r {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => Self::bad_request(r.body_text()),
            other => {
                let status = other.status();
                Self::new(status, status.canonical_reason().unwrap_or("Bad Request"), Some(other.body_text()))
            }
        }
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        Self::bad_request(r.body_text())
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self {
        Self::bad_request(r.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
