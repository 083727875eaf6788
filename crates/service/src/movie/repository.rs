use async_trait::async_trait;
use models::{Movie, MovieContent};

use crate::errors::ServiceError;
use crate::movie::query::MovieQuery;

/// Trait abstraction for movie storage.
/// Implementations own id assignment and must serialize mutations so that
/// concurrent inserts never hand out the same id.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// All movies in insertion order.
    async fn list(&self) -> Result<Vec<Movie>, ServiceError>;
    async fn search(&self, query: &MovieQuery) -> Result<Vec<Movie>, ServiceError>;
    async fn get(&self, id: i64) -> Result<Option<Movie>, ServiceError>;
    /// Store new content under the next free id.
    async fn insert(&self, content: MovieContent) -> Result<Movie, ServiceError>;
    /// Replace the content of an existing movie; `NotFound` otherwise.
    async fn replace(&self, id: i64, content: MovieContent) -> Result<Movie, ServiceError>;
    /// Remove and return an existing movie; `NotFound` otherwise.
    async fn remove(&self, id: i64) -> Result<Movie, ServiceError>;
}
