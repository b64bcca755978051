//! Catalog discovery by crawling the course listing and course pages.

use crate::api::SiteClient;
use crate::catalog::cache::CatalogCache;
use crate::catalog::types::{Catalog, ChapterMap};
use crate::error::Result;
use crate::markup;
use crate::output::{create_item_bar, print_info, print_title, print_warning};

/// Path of the catalog listing, relative to the site origin.
pub const CATALOG_PATH: &str = "/courses/filtering";

/// Result of crawling the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub catalog: Catalog,
    /// Course pages that could not be fetched.
    pub failed_courses: usize,
}

impl Discovery {
    /// Whether every course page listed on the site was crawled.
    pub fn is_complete(&self) -> bool {
        self.failed_courses == 0
    }
}

/// Return the cached catalog, or crawl the site and cache the result.
///
/// With `refresh` set the cache is ignored and overwritten. A cache that
/// cannot be read is reported and treated as absent; a cache that cannot be
/// written is reported and the crawled catalog is used anyway. An incomplete
/// crawl is used for this run but never cached.
pub async fn load_or_discover(
    client: &SiteClient,
    cache: &CatalogCache,
    refresh: bool,
) -> Result<Catalog> {
    print_title("Fetching courses...");

    if refresh {
        print_info("Ignoring cached course blueprint (refresh requested)");
    } else {
        match cache.load() {
            Ok(Some(catalog)) => {
                print_info(&format!(
                    "Using course blueprint {} ({} courses)",
                    cache.path().display(),
                    catalog.len()
                ));
                return Ok(catalog);
            }
            Ok(None) => {}
            Err(e) => print_warning(&format!(
                "Unable to read course blueprint {}: {}",
                cache.path().display(),
                e
            )),
        }
    }

    let discovery = discover(client).await?;

    if !discovery.is_complete() {
        print_warning(&format!(
            "Course blueprint not saved: {} course(s) failed to load",
            discovery.failed_courses
        ));
    } else if let Err(e) = cache.persist(&discovery.catalog) {
        tracing::warn!("Failed to persist blueprint: {}", e);
        print_warning("Unable to save course blueprint");
    }

    Ok(discovery.catalog)
}

/// Crawl the catalog listing and every course page.
///
/// A listing that cannot be fetched is an error. Entries without a title or
/// link are skipped with a warning. Course pages that fail to load are
/// skipped with a warning and counted in [`Discovery::failed_courses`].
pub async fn discover(client: &SiteClient) -> Result<Discovery> {
    let listing = client.get_html(CATALOG_PATH).await?;
    let entries = markup::course_entries(&listing);
    tracing::debug!("Found {} course entries", entries.len());

    let mut catalog = Catalog::new();
    let mut failed_courses = 0;
    let progress = create_item_bar(entries.len() as u64);

    for entry in entries {
        let (Some(title), Some(href)) = (entry.title, entry.href) else {
            progress.inc(1);
            progress.suspend(|| print_warning("Skipping course entry without title or link"));
            continue;
        };

        progress.set_message(title.clone());
        progress.inc(1);

        match client.get_html(&href).await {
            Ok(page) => catalog.insert(title, parse_chapters(&page)),
            Err(e) => {
                failed_courses += 1;
                progress.suspend(|| {
                    print_warning(&format!("Unable to fetch course '{}': {}", title, e))
                });
            }
        }
    }

    progress.finish_and_clear();
    print_info(&format!("Discovered {} courses", catalog.len()));

    Ok(Discovery {
        catalog,
        failed_courses,
    })
}

/// Build the chapter map of a course page.
///
/// Placeholder `#` links are skipped; fragments are dropped and the last
/// path segment becomes the chapter slug.
pub fn parse_chapters(html: &str) -> ChapterMap {
    let mut chapters = ChapterMap::new();

    for href in markup::chapter_links(html) {
        if href == "#" {
            continue;
        }

        let url = href.split('#').next().unwrap_or_default();
        match chapter_slug(url) {
            Some(slug) => chapters.insert(slug, url),
            None => tracing::debug!("Ignoring chapter link without slug: {:?}", href),
        }
    }

    chapters
}

/// Last non-empty path segment of a chapter URL.
pub fn chapter_slug(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const LISTING: &str = r#"<html><body>
        <div class="course-list-bookmark-container js-course-item"><div><div>
            <a href="/screencast/symfony"><img alt="Symfony 5 Fundamentals"></a>
        </div></div></div>
        <div class="course-list-bookmark-container js-course-item"><div><div>
            <a href="/screencast/broken"><img alt="Broken Course"></a>
        </div></div></div>
        <div class="course-list-bookmark-container js-course-item"><div><div>
            <a href="/screencast/doctrine"><img alt="Doctrine"></a>
        </div></div></div>
    </body></html>"#;

    const SYMFONY: &str = r##"<ul class="chapter-list">
        <li><a href="/screencast/symfony/setup#play">Setup</a></li>
        <li><a href="#">Coming soon</a></li>
        <li><a href="/screencast/symfony/routes">Routes</a></li>
        <li><a href="/screencast/symfony/activity/123">Quiz</a></li>
    </ul>"##;

    const DOCTRINE: &str = r#"<ul class="chapter-list">
        <li><a href="/screencast/doctrine/entities">Entities</a></li>
    </ul>"#;

    async fn mount_site(server: &MockServer, broken_status: u16) {
        for (route, body) in [
            ("/courses/filtering", LISTING),
            ("/screencast/symfony", SYMFONY),
            ("/screencast/doctrine", DOCTRINE),
        ] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/screencast/broken"))
            .respond_with(ResponseTemplate::new(broken_status).set_body_string(DOCTRINE))
            .mount(server)
            .await;
    }

    fn client_for(server: &MockServer) -> SiteClient {
        SiteClient::new(Url::parse(&server.uri()).unwrap(), "test-agent").unwrap()
    }

    #[test]
    fn test_parse_chapters() {
        let chapters = parse_chapters(SYMFONY);
        let pairs: Vec<_> = chapters
            .iter()
            .map(|c| (c.slug.as_str(), c.url.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("setup", "/screencast/symfony/setup"),
                ("routes", "/screencast/symfony/routes"),
                ("123", "/screencast/symfony/activity/123"),
            ]
        );
    }

    #[test]
    fn test_chapter_slug() {
        assert_eq!(chapter_slug("/screencast/symfony/setup"), Some("setup"));
        assert_eq!(chapter_slug("/screencast/symfony/setup/"), Some("setup"));
        assert_eq!(
            chapter_slug("https://symfonycasts.com/screencast/a/b?x=1"),
            Some("b")
        );
        assert_eq!(chapter_slug(""), None);
        assert_eq!(chapter_slug("/"), None);
    }

    #[tokio::test]
    async fn test_discover_skips_failed_course() {
        let server = MockServer::start().await;
        mount_site(&server, 500).await;

        let discovery = discover(&client_for(&server)).await.unwrap();
        assert_eq!(discovery.failed_courses, 1);
        assert!(!discovery.is_complete());

        let catalog = discovery.catalog;
        assert_eq!(catalog.titles(), vec!["Symfony 5 Fundamentals", "Doctrine"]);
        assert_eq!(catalog.get("Symfony 5 Fundamentals").unwrap().len(), 3);
        assert_eq!(
            catalog.get("Doctrine").unwrap().get("entities"),
            Some("/screencast/doctrine/entities")
        );
    }

    #[tokio::test]
    async fn test_incomplete_crawl_is_not_cached() {
        let server = MockServer::start().await;
        mount_site(&server, 503).await;

        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::new(dir.path().join("blueprint.json"));
        let client = client_for(&server);

        let first = load_or_discover(&client, &cache, false).await.unwrap();
        assert_eq!(first.titles(), vec!["Symfony 5 Fundamentals", "Doctrine"]);
        assert_eq!(cache.load().unwrap(), None);

        // Once the page is back the next run crawls again and sees the course.
        server.reset().await;
        mount_site(&server, 200).await;

        let second = load_or_discover(&client, &cache, false).await.unwrap();
        assert_eq!(
            second.titles(),
            vec!["Symfony 5 Fundamentals", "Broken Course", "Doctrine"]
        );
        assert_eq!(cache.load().unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_unwritable_cache_keeps_crawled_catalog() {
        let server = MockServer::start().await;
        mount_site(&server, 200).await;

        // A directory where the blueprint file should go cannot be written.
        let dir = tempfile::tempdir().unwrap();
        let blueprint = dir.path().join("blueprint.json");
        std::fs::create_dir(&blueprint).unwrap();

        let cache = CatalogCache::new(blueprint.clone());
        let catalog = load_or_discover(&client_for(&server), &cache, true)
            .await
            .unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(blueprint.is_dir());
    }

    #[tokio::test]
    async fn test_listing_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(discover(&client_for(&server)).await.is_err());
    }

    #[tokio::test]
    async fn test_cached_catalog_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::new(dir.path().join("blueprint.json"));
        let mut cached = Catalog::new();
        cached.insert("Cached Course", ChapterMap::new());
        cache.persist(&cached).unwrap();

        let catalog = load_or_discover(&client_for(&server), &cache, false)
            .await
            .unwrap();
        assert_eq!(catalog, cached);
    }

    #[tokio::test]
    async fn test_refresh_recrawls_and_overwrites_cache() {
        let server = MockServer::start().await;
        mount_site(&server, 200).await;

        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::new(dir.path().join("blueprint.json"));
        let mut stale = Catalog::new();
        stale.insert("Old Course", ChapterMap::new());
        cache.persist(&stale).unwrap();

        let catalog = load_or_discover(&client_for(&server), &cache, true)
            .await
            .unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(cache.load().unwrap(), Some(catalog));
    }

    #[tokio::test]
    async fn test_corrupt_cache_triggers_crawl() {
        let server = MockServer::start().await;
        mount_site(&server, 200).await;

        let dir = tempfile::tempdir().unwrap();
        let blueprint = dir.path().join("blueprint.json");
        std::fs::write(&blueprint, "{ not json").unwrap();

        let cache = CatalogCache::new(blueprint);
        let catalog = load_or_discover(&client_for(&server), &cache, false)
            .await
            .unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(cache.load().unwrap().is_some());
    }
}
