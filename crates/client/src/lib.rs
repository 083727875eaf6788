//! Consumer side of the movie API.
//!
//! [`MovieClient`] wraps one pooled `reqwest::Client` shared by every call.
//! Reads return `Result` so an empty list and a failed request stay
//! distinguishable; form submissions return [`SubmitOutcome`], which hands
//! the submitted input back on failure instead of surfacing the raw error.

pub mod errors;
pub mod movie_client;

pub use errors::ClientError;
pub use movie_client::{MovieClient, SearchParams, SubmitOutcome};
