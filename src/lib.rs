pub mod ai;
pub mod categories;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod feed;
pub mod fetch;
pub mod models;
pub mod summarize;

pub use error::{AppError, Result};
