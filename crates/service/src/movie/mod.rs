pub mod query;
pub mod repository;
pub mod service;

pub use query::{MovieQuery, SortField};
pub use repository::MovieRepository;
pub use service::MovieService;
