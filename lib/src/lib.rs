pub mod config;
pub mod db;
pub mod error;
pub mod import_export;
pub mod models;
pub mod plugin;
pub mod tags;
pub mod utils;

// Re-export error types for convenience
pub use error::{PeywandError, Result};
