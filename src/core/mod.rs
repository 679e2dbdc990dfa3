//! Application plumbing: errors, settings, logging

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{AppError, AppResult};
pub use logging::init_logging;
pub use settings::{settings_path, AppSettings};
