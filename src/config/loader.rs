//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// File name of the catalog cache.
const BLUEPRINT_FILE: &str = "blueprint.json";

/// Main configuration structure.
///
/// Keys keep the upper-case spelling of the classic `local.ini` credentials
/// file, so an existing file only needs its values quoted to become valid TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    /// Site origin, e.g. `https://symfonycasts.com`.
    #[serde(default)]
    pub url: String,

    /// Account e-mail used for the login form.
    #[serde(default)]
    pub email: String,

    /// Account password used for the login form.
    #[serde(default)]
    pub password: String,

    /// Base directory for downloads.
    #[serde(default)]
    pub target: Option<PathBuf>,

    /// Course titles to download. Empty means every course.
    #[serde(default)]
    pub courses: Vec<String>,

    /// Name of the per-site folder below `target`. Derived from the host when unset.
    #[serde(default)]
    pub site_name: Option<String>,

    /// Location of the catalog cache.
    #[serde(default)]
    pub blueprint: Option<PathBuf>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            email: String::new(),
            password: String::new(),
            target: None,
            courses: Vec::new(),
            site_name: None,
            blueprint: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Parsed site origin. The path is always `/` so relative links join against the root.
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(self.url.trim())?;
        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.target
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Folder name for the site below the download directory.
    ///
    /// `https://www.symfonycasts.com` becomes `symfonycasts`; IP hosts are used verbatim.
    pub fn site_name(&self) -> String {
        if let Some(name) = self.site_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }

        let Ok(url) = self.base_url() else {
            return "site".to_string();
        };

        match url.host() {
            Some(url::Host::Domain(domain)) => {
                let domain = domain.strip_prefix("www.").unwrap_or(domain);
                domain.split('.').next().unwrap_or(domain).to_string()
            }
            Some(host) => host.to_string(),
            None => "site".to_string(),
        }
    }

    /// Root directory for this site's courses: `{TARGET}/<site-name>`.
    pub fn site_directory(&self) -> PathBuf {
        self.download_directory().join(self.site_name())
    }

    /// Location of the catalog cache.
    ///
    /// Falls back to the platform data directory, then to the working directory.
    pub fn blueprint_path(&self) -> PathBuf {
        if let Some(path) = &self.blueprint {
            return path.clone();
        }

        ProjectDirs::from("", "", "course-downloader")
            .map(|dirs| dirs.data_dir().join(BLUEPRINT_FILE))
            .unwrap_or_else(|| PathBuf::from(BLUEPRINT_FILE))
    }
}
