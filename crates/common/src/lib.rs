//! Shared helpers for the movies workspace: logging setup, runtime
//! directory checks and small wire types used by more than one crate.

pub mod types;
pub mod utils;
pub mod env;
