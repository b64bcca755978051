//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::download::RunOptions;

/// Course downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "course-downloader",
    version,
    about = "Download course videos, scripts and code archives",
    long_about = "Logs in to the course site, discovers the course catalog and downloads every \
                  chapter's video plus each course's script and code archive.\n\n\
                  Files that already exist are skipped, so interrupted runs can simply be restarted."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Site origin, e.g. https://symfonycasts.com.
    #[arg(long)]
    pub url: Option<String>,

    /// Account e-mail.
    #[arg(short, long, env = "COURSE_DL_EMAIL")]
    pub email: Option<String>,

    /// Account password.
    #[arg(short, long, env = "COURSE_DL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub target: Option<PathBuf>,

    /// Course title to download. Repeat for several courses.
    #[arg(long = "course")]
    pub courses: Vec<String>,

    /// Folder name for the site below the download directory.
    #[arg(long)]
    pub site_name: Option<String>,

    /// Path of the catalog cache.
    #[arg(long)]
    pub blueprint: Option<PathBuf>,

    /// Crawl the catalog again instead of using the cached blueprint.
    #[arg(long)]
    pub refresh_catalog: bool,

    /// Show what would be downloaded without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }

        if let Some(email) = &self.email {
            config.email = email.clone();
        }

        if let Some(password) = &self.password {
            config.password = password.clone();
        }

        if let Some(target) = &self.target {
            config.target = Some(target.clone());
        }

        if !self.courses.is_empty() {
            config.courses = self.courses.clone();
        }

        if let Some(site_name) = &self.site_name {
            config.site_name = Some(site_name.clone());
        }

        if let Some(blueprint) = &self.blueprint {
            config.blueprint = Some(blueprint.clone());
        }
    }

    /// Run switches selected on the command line.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            refresh_catalog: self.refresh_catalog,
            dry_run: self.dry_run,
        }
    }
}
