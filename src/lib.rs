//! Course Downloader - download the videos, scripts and code of online courses.
//!
//! This library logs in to a course site, discovers its catalog and mirrors
//! every chapter's resources to a local directory tree.
//!
//! # Features
//!
//! - Form login with CSRF token handling
//! - Catalog discovery with a JSON "blueprint" cache
//! - Course allow-list
//! - One video per chapter, one script and one code archive per course
//! - Resumable runs: files already on disk are skipped
//! - Partial downloads are never left behind
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use course_downloader::{download_courses, validate_config, Config, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     validate_config(&config)?;
//!
//!     let stats = download_courses(&config, RunOptions::default()).await?;
//!     println!("{} files downloaded", stats.total_downloaded());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod markup;
pub mod output;

// Re-exports for convenience
pub use api::SiteClient;
pub use catalog::{Catalog, CatalogCache, ChapterMap};
pub use config::{validate_config, Config};
pub use download::{download_courses, GlobalState, RunOptions};
pub use error::{Error, Result};
