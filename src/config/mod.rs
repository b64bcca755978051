//! Configuration module for the course-downloader.
//!
//! This module handles:
//! - Loading credentials and options from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::Config;
pub use validation::validate_config;
