use models::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("id mismatch: path id {path} does not match body id {}", body_id(.body))]
    IdMismatch { path: i64, body: Option<i64> },
    #[error("invalid query parameter: {0}")]
    InvalidQuery(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i64) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }
}

fn body_id(id: &Option<i64>) -> String {
    id.map_or_else(|| "(none)".to_string(), |v| v.to_string())
}
