//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename generation

pub mod naming;
pub mod paths;

pub use naming::{
    archive_file_name, dashes_to_title, sanitize_title, script_file_name, video_file_name,
};
pub use paths::{course_directory, ensure_dir};
