use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One failing field, named by its wire key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn required(field: &str) -> Self {
        Self { field: field.to_string(), message: "required".to_string() }
    }
}

/// Every field that failed validation for a single submission.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("validation failed: {}", describe(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Wire names of the failing fields, in reporting order.
    pub fn field_names(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.field.as_str()).collect()
    }
}

fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{} {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}
