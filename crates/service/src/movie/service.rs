use std::sync::Arc;

use models::{Movie, MovieInput};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::movie::{query::MovieQuery, repository::MovieRepository};

/// Application service encapsulating the movie resource's business rules:
/// required-field validation, path/body id consistency and not-found
/// reporting. Independent of any web framework.
pub struct MovieService<R: MovieRepository> {
    repo: Arc<R>,
}

impl<R: MovieRepository> MovieService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Movie>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &MovieQuery) -> Result<Vec<Movie>, ServiceError> {
        self.repo.search(query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Movie, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("movie", id))
    }

    /// Create a movie. Any `id` in the input is ignored; the store assigns one.
    #[instrument(skip(self, input), fields(title = ?input.title))]
    pub async fn create(&self, input: MovieInput) -> Result<Movie, ServiceError> {
        let content = input.validate()?;
        let created = self.repo.insert(content).await?;
        info!(id = created.id, title = %created.title, "movie_created");
        Ok(created)
    }

    /// Replace the content of movie `id`.
    ///
    /// Checks run in order: content validation, body id equal to `id` (a
    /// missing body id counts as a mismatch), then existence. Nothing is
    /// written when any of them fails.
    #[instrument(skip(self, input), fields(body_id = ?input.id))]
    pub async fn update(&self, id: i64, input: MovieInput) -> Result<Movie, ServiceError> {
        let content = input.validate()?;
        if input.id != Some(id) {
            return Err(ServiceError::IdMismatch { path: id, body: input.id });
        }
        let updated = self.repo.replace(id, content).await?;
        info!(id = updated.id, title = %updated.title, "movie_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<Movie, ServiceError> {
        let removed = self.repo.remove(id).await?;
        info!(id = removed.id, title = %removed.title, "movie_deleted");
        Ok(removed)
    }
}
