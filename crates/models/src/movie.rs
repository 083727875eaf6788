use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ValidationErrors};

/// A stored movie as it travels on the wire.
/// - `id`: assigned by the store, never changes
/// - `release_year`: serialized as `releaseYear`, kept as text
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub description: String,
    pub release_year: String,
}

impl Movie {
    pub fn new(id: i64, content: MovieContent) -> Self {
        Self {
            id,
            title: content.title,
            genre: content.genre,
            description: content.description,
            release_year: content.release_year,
        }
    }

    /// Replace every content field, keeping the id.
    pub fn apply(&mut self, content: MovieContent) {
        self.title = content.title;
        self.genre = content.genre;
        self.description = content.description;
        self.release_year = content.release_year;
    }
}

/// Submitted create/update body. Every key may be missing so that an absent
/// field is reported by [`MovieInput::validate`] rather than by the decoder.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<String>,
}

/// Validated content fields, all non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieContent {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub release_year: String,
}

impl MovieInput {
    /// Check the four required fields and collect every failure, in wire
    /// order, instead of stopping at the first one.
    pub fn validate(&self) -> Result<MovieContent, ValidationErrors> {
        let mut errors = Vec::new();
        let title = required(&self.title, "title", &mut errors);
        let genre = required(&self.genre, "genre", &mut errors);
        let description = required(&self.description, "description", &mut errors);
        let release_year = required(&self.release_year, "releaseYear", &mut errors);

        match (title, genre, description, release_year) {
            (Some(title), Some(genre), Some(description), Some(release_year)) => Ok(MovieContent {
                title,
                genre,
                description,
                release_year,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn required(value: &Option<String>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => {
            errors.push(FieldError::required(field));
            None
        }
    }
}

impl From<Movie> for MovieInput {
    fn from(m: Movie) -> Self {
        Self {
            id: Some(m.id),
            title: Some(m.title),
            genre: Some(m.genre),
            description: Some(m.description),
            release_year: Some(m.release_year),
        }
    }
}

impl From<MovieContent> for MovieInput {
    fn from(c: MovieContent) -> Self {
        Self {
            id: None,
            title: Some(c.title),
            genre: Some(c.genre),
            description: Some(c.description),
            release_year: Some(c.release_year),
        }
    }
}
