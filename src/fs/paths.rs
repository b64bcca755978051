//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::naming::sanitize_title;

/// Directory of a course below the site directory, with its sanitized title.
pub fn course_directory(site_dir: &Path, title: &str) -> Result<(PathBuf, String)> {
    let title_path = sanitize_title(title)?;
    Ok((site_dir.join(&title_path), title_path))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.display().to_string(),
        source,
    })
}
