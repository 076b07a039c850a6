//! Provides several utilities and helper functions.

pub mod env;
pub mod ext;
pub mod file;
mod log_level;

pub use log_level::LogLevel;
