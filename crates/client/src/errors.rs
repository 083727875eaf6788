use models::FieldError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("api error {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        fields: Vec<FieldError>,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Build an `Api` error from a non-success response body, falling back
    /// to the raw text when it is not the server's error shape.
    pub(crate) fn from_body(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(b) => Self::Api {
                status,
                message: b.message.unwrap_or(b.error),
                fields: b.fields.unwrap_or_default(),
            },
            Err(_) => Self::Api {
                status,
                message: if body.is_empty() { status.to_string() } else { body.to_string() },
                fields: Vec::new(),
            },
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    message: Option<String>,
    fields: Option<Vec<FieldError>>,
}
