//! Catalog cache ("blueprint") persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::types::Catalog;
use crate::error::Result;

/// JSON file holding a previously discovered catalog.
///
/// The cache never expires on its own; it is replaced only when a refresh is
/// requested or the file is removed.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached catalog. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<Catalog>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let catalog = serde_json::from_str(&content)?;
        Ok(Some(catalog))
    }

    /// Write the catalog as indented JSON, creating parent directories as needed.
    pub fn persist(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(catalog)?;
        fs::write(&self.path, content)?;
        tracing::debug!("Saved blueprint to {}", self.path.display());
        Ok(())
    }
}
