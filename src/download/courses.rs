//! Course download orchestration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::api::{login, SiteClient};
use crate::catalog::{filter_courses, load_or_discover, unmatched_titles, CatalogCache, Course};
use crate::config::Config;
use crate::download::classify::{
    classify_links, strip_activity_chapters, ChapterContext, Classified, CourseClaims,
    DownloadTarget,
};
use crate::download::engine::{fetch, Fetched};
use crate::download::state::{CourseState, GlobalState};
use crate::error::Result;
use crate::fs::{course_directory, dashes_to_title, ensure_dir};
use crate::markup;
use crate::output::{
    print_course_stats, print_error, print_info, print_listing, print_section, print_success,
    print_title, print_warning,
};

/// Switches for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Crawl the catalog even if a blueprint exists, and overwrite it.
    pub refresh_catalog: bool,
    /// Report what would be downloaded without writing files.
    pub dry_run: bool,
}

/// Run the whole pipeline: log in, get the catalog, download every wanted course.
///
/// Login, site directory and catalog failures abort the run. Everything
/// below course level is reported and skipped.
pub async fn download_courses(config: &Config, options: RunOptions) -> Result<GlobalState> {
    let client = SiteClient::new(config.base_url()?, &config.user_agent)?;

    print_info("Logging in...");
    login(&client, &config.email, &config.password).await?;
    print_success(&format!("Logged in as {}", config.email));

    let site_dir = config.site_directory();
    ensure_dir(&site_dir)?;

    let cache = CatalogCache::new(config.blueprint_path());
    let catalog = load_or_discover(&client, &cache, options.refresh_catalog).await?;

    for missing in unmatched_titles(&catalog, &config.courses) {
        print_warning(&format!("Course '{}' not found in catalog", missing));
    }
    let catalog = filter_courses(catalog, &config.courses);

    print_section("Wanted courses");
    print_listing(&catalog.titles());

    let mut global = GlobalState::default();
    let mut used_dirs = HashSet::new();
    let total = catalog.len();

    for (position, course) in catalog.iter().enumerate() {
        println!("\n\n");
        print_title(&format!(
            "Processing course: '{}' ({} of {})",
            course.title,
            position + 1,
            total
        ));

        match download_course(&client, &site_dir, course, &mut used_dirs, options).await {
            Some(state) => {
                print_course_stats(&state);
                global.add_course_stats(&state);
            }
            None => global.mark_course_skipped(),
        }
    }

    print_success("Finished");
    Ok(global)
}

/// Download one course. Returns `None` when the course was skipped entirely.
async fn download_course(
    client: &SiteClient,
    site_dir: &Path,
    course: &Course,
    used_dirs: &mut HashSet<PathBuf>,
    options: RunOptions,
) -> Option<CourseState> {
    if course.chapters.is_empty() {
        print_warning("No chapters to download");
        return None;
    }

    let (course_dir, title_path) = match course_directory(site_dir, &course.title) {
        Ok(dir) => dir,
        Err(e) => {
            print_error(&format!("Unable to create course directory: {}", e));
            return None;
        }
    };

    if !used_dirs.insert(course_dir.clone()) {
        print_warning(&format!(
            "Directory '{}' is already used by another course in this run",
            course_dir.display()
        ));
        return None;
    }

    if !options.dry_run {
        if let Err(e) = ensure_dir(&course_dir) {
            print_error(&format!("Unable to create course directory: {}", e));
            return None;
        }
    }

    let chapters = strip_activity_chapters(course.chapters.clone());
    let chapter_total = chapters.len();
    let mut state = CourseState::new(course.title.clone());
    let mut claims = CourseClaims::default();

    for (position, chapter) in chapters.iter().enumerate() {
        let chapter_index = position + 1;
        println!();
        print_section(&format!(
            "Chapter '{}' ({} of {})",
            dashes_to_title(&chapter.slug),
            chapter_index,
            chapter_total
        ));

        let page = match client.get_html(&chapter.url).await {
            Ok(page) => page,
            Err(e) => {
                print_error(&e.to_string());
                state.record_chapter_failed();
                continue;
            }
        };

        let links = markup::download_links(&page);
        let ctx = ChapterContext {
            base_url: client.base_url(),
            course_dir: &course_dir,
            title_path: &title_path,
            chapter_index,
            chapter_slug: &chapter.slug,
        };

        let (results, updated) = classify_links(&links, &ctx, claims);
        claims = updated;

        for result in results {
            match result {
                Classified::Target(target) => {
                    download_target(client, &target, &mut state, options).await;
                }
                Classified::Duplicate { kind, href } => {
                    tracing::debug!("Course {} already claimed, skipping {}", kind, href);
                }
                Classified::Unknown(href) => {
                    print_warning(&format!("Unknown link type: {}", href));
                }
                Classified::MissingFileName(href) => {
                    tracing::debug!("No file name for link {:?}", href);
                    print_warning("Unable to get download links");
                }
            }
        }
    }

    Some(state)
}

async fn download_target(
    client: &SiteClient,
    target: &DownloadTarget,
    state: &mut CourseState,
    options: RunOptions,
) {
    let file_name = target.file_name();

    if options.dry_run {
        if target.path.exists() {
            print_info(&format!("File '{}' was already downloaded", file_name));
            state.record_skipped();
        } else {
            print_info(&format!("Would download {} '{}'", target.kind, file_name));
            state.record_planned();
        }
        return;
    }

    match fetch(client, &target.url, &target.path).await {
        Ok(Fetched::Skipped) => {
            print_info(&format!("File '{}' was already downloaded", file_name));
            state.record_skipped();
        }
        Ok(Fetched::Written(bytes)) => {
            tracing::info!("Downloaded: {}", target.path.display());
            state.record_written(target.kind, bytes);
        }
        Err(e) => {
            print_warning(&format!("Failed to download '{}': {}", file_name, e));
            state.record_failed();
        }
    }
}
