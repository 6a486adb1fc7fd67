/// CLI Indexes: Models
pub mod models;

pub use models::{Model, ModelError};
