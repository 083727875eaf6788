//! Storage for the service layer
//!
//! Holds the movie collection: an in-memory index that can snapshot itself
//! to a JSON file.

pub mod movie_store;

pub use movie_store::MovieStore;
