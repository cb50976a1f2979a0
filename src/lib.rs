pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod sheet;

pub use config::AppConfig;
pub use error::{IngestError, Result};
pub use service::{IngestOptions, IngestService, Upload};
