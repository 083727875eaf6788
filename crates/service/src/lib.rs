//! Service layer providing the movie resource's CRUD and search operations.
//! - `storage` owns the collection and its optional JSON snapshot.
//! - `movie` holds the repository abstraction, query model and business rules.
//! - Errors are reported through [`errors::ServiceError`].

pub mod errors;
pub mod pagination;
pub mod storage;
pub mod movie;
#[cfg(test)]
pub mod test_support;
