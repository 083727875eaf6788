pub mod errors;
pub mod movie;

pub use errors::{FieldError, ValidationErrors};
pub use movie::{Movie, MovieContent, MovieInput};
