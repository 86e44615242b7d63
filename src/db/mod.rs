mod repository;
mod schema;

pub use repository::{NewSummary, Repository};
