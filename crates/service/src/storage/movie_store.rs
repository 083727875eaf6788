use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::{Movie, MovieContent, MovieInput};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::movie::{query::MovieQuery, repository::MovieRepository};

/// On-disk layout. A bare JSON array of movies is accepted as well so a
/// hand-written seed file can be loaded directly.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Full {
        #[serde(default)]
        next_id: i64,
        movies: Vec<Movie>,
    },
    List(Vec<Movie>),
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    next_id: i64,
    movies: Vec<&'a Movie>,
}

/// Movies keyed by id. Ids only grow, so key order is insertion order.
#[derive(Debug)]
struct Catalog {
    movies: BTreeMap<i64, Movie>,
    next_id: i64,
}

impl Catalog {
    fn empty() -> Self {
        Self { movies: BTreeMap::new(), next_id: 1 }
    }

    /// Index loaded records. Rejects duplicate ids and records whose content
    /// would not pass validation as a submission.
    fn from_movies(movies: Vec<Movie>, next_id: i64) -> Result<Self, ServiceError> {
        let mut index = BTreeMap::new();
        for movie in movies {
            if let Err(e) = MovieInput::from(movie.clone()).validate() {
                return Err(ServiceError::Storage(format!("movie {}: {e}", movie.id)));
            }
            let id = movie.id;
            if index.insert(id, movie).is_some() {
                return Err(ServiceError::Storage(format!("duplicate movie id {id}")));
            }
        }
        let floor = match index.keys().next_back() {
            Some(max) => successor(*max)?,
            None => 1,
        };
        Ok(Self { movies: index, next_id: next_id.max(floor) })
    }
}

fn successor(id: i64) -> Result<i64, ServiceError> {
    id.checked_add(1)
        .ok_or_else(|| ServiceError::Storage(format!("movie id space exhausted after {id}")))
}

/// In-memory movie collection, optionally snapshotted to a JSON file.
///
/// Reads share the lock. Every mutation holds the write lock across id
/// assignment and the snapshot write, and is rolled back if the write fails.
pub struct MovieStore {
    inner: RwLock<Catalog>,
    file_path: Option<PathBuf>,
}

impl MovieStore {
    /// Empty store that is never written to disk.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Catalog::empty()), file_path: None })
    }

    /// Non-persistent store seeded with `movies`; the next id continues after
    /// the largest seeded one.
    pub fn with_movies(movies: Vec<Movie>) -> Result<Arc<Self>, ServiceError> {
        let catalog = Catalog::from_movies(movies, 1)?;
        Ok(Arc::new(Self { inner: RwLock::new(catalog), file_path: None }))
    }

    /// Open a file-backed store. Creates the file with an empty catalog if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("{}: {e}", parent.display())))?;
        }

        let (catalog, fresh) = match fs::read(&file_path).await {
            Ok(bytes) => {
                let parsed: SnapshotFile = serde_json::from_slice(&bytes)
                    .map_err(|e| ServiceError::Storage(format!("{}: {e}", file_path.display())))?;
                let catalog = match parsed {
                    SnapshotFile::Full { next_id, movies } => Catalog::from_movies(movies, next_id),
                    SnapshotFile::List(movies) => Catalog::from_movies(movies, 1),
                }
                .map_err(|e| match e {
                    ServiceError::Storage(msg) => ServiceError::Storage(format!("{}: {msg}", file_path.display())),
                    other => other,
                })?;
                (catalog, false)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => (Catalog::empty(), true),
            Err(e) => return Err(ServiceError::Storage(format!("{}: {e}", file_path.display()))),
        };

        info!(path = %file_path.display(), movies = catalog.movies.len(), next_id = catalog.next_id, "movie store opened");
        let store = Self { inner: RwLock::new(catalog), file_path: Some(file_path) };
        if fresh {
            let catalog = store.inner.read().await;
            store.save(&catalog).await?;
        }
        Ok(Arc::new(store))
    }

    async fn save(&self, catalog: &Catalog) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let snapshot = SnapshotRef { next_id: catalog.next_id, movies: catalog.movies.values().collect() };
        let data = serde_json::to_vec_pretty(&snapshot).map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::rename(&tmp, path).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        debug!(path = %path.display(), movies = catalog.movies.len(), "movie store persisted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.movies.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Id the next insert will receive.
    pub async fn next_id(&self) -> i64 {
        self.inner.read().await.next_id
    }
}

#[async_trait]
impl MovieRepository for MovieStore {
    async fn list(&self) -> Result<Vec<Movie>, ServiceError> {
        let catalog = self.inner.read().await;
        Ok(catalog.movies.values().cloned().collect())
    }

    async fn search(&self, query: &MovieQuery) -> Result<Vec<Movie>, ServiceError> {
        let catalog = self.inner.read().await;
        Ok(query.run(catalog.movies.values()))
    }

    async fn get(&self, id: i64) -> Result<Option<Movie>, ServiceError> {
        let catalog = self.inner.read().await;
        Ok(catalog.movies.get(&id).cloned())
    }

    async fn insert(&self, content: MovieContent) -> Result<Movie, ServiceError> {
        let mut catalog = self.inner.write().await;
        let id = catalog.next_id;
        catalog.next_id = successor(id)?;
        let movie = Movie::new(id, content);
        catalog.movies.insert(id, movie.clone());
        if let Err(e) = self.save(&catalog).await {
            catalog.movies.remove(&id);
            catalog.next_id = id;
            return Err(e);
        }
        Ok(movie)
    }

    async fn replace(&self, id: i64, content: MovieContent) -> Result<Movie, ServiceError> {
        let mut catalog = self.inner.write().await;
        let Some(existing) = catalog.movies.get_mut(&id) else {
            return Err(ServiceError::not_found("movie", id));
        };
        let previous = existing.clone();
        existing.apply(content);
        let updated = existing.clone();
        if let Err(e) = self.save(&catalog).await {
            catalog.movies.insert(id, previous);
            return Err(e);
        }
        Ok(updated)
    }

    async fn remove(&self, id: i64) -> Result<Movie, ServiceError> {
        let mut catalog = self.inner.write().await;
        let removed = catalog.movies.remove(&id).ok_or_else(|| ServiceError::not_found("movie", id))?;
        if let Err(e) = self.save(&catalog).await {
            catalog.movies.insert(id, removed);
            return Err(e);
        }
        Ok(removed)
    }
}
