//! Resource link classification.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::catalog::ChapterMap;
use crate::fs::{archive_file_name, script_file_name, video_file_name};

/// Chapter URLs ending like this are quiz/checkpoint pages without downloads.
static ACTIVITY_CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/activity/[0-9]{3}$").expect("valid activity pattern"));

/// Kind of a downloadable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Video,
    Script,
    Archive,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Video => write!(f, "video"),
            ResourceKind::Script => write!(f, "script"),
            ResourceKind::Archive => write!(f, "archive"),
        }
    }
}

/// A resource to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub path: PathBuf,
    pub kind: ResourceKind,
    pub url: Url,
}

impl DownloadTarget {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Course-wide record of which single-per-course resources were already claimed.
///
/// Passed by value into each chapter's classification and handed back updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseClaims {
    pub script: bool,
    pub archive: bool,
}

/// Outcome of classifying one download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// A resource to download.
    Target(DownloadTarget),
    /// A script or code link after the course already claimed one.
    Duplicate { kind: ResourceKind, href: String },
    /// A link of no known kind.
    Unknown(String),
    /// A link for which no destination file name could be derived.
    MissingFileName(String),
}

/// Where a chapter's resources go and how they are named.
#[derive(Debug, Clone, Copy)]
pub struct ChapterContext<'a> {
    pub base_url: &'a Url,
    pub course_dir: &'a Path,
    /// Sanitized course title, used for script and archive names.
    pub title_path: &'a str,
    /// 1-based position of the chapter in the course.
    pub chapter_index: usize,
    pub chapter_slug: &'a str,
}

/// Whether a chapter URL is an activity checkpoint.
pub fn is_activity_chapter(url: &str) -> bool {
    ACTIVITY_CHAPTER.is_match(url)
}

/// Remove activity checkpoint chapters, keeping the order of the rest.
pub fn strip_activity_chapters(mut chapters: ChapterMap) -> ChapterMap {
    chapters.retain(|chapter| !is_activity_chapter(&chapter.url));
    chapters
}

/// Classify a chapter's download links.
///
/// Links containing `video` always produce a target. The first link
/// containing `script` (resp. `code`) in the whole course produces the
/// course script (resp. archive); later ones are duplicates.
pub fn classify_links(
    links: &[String],
    ctx: &ChapterContext<'_>,
    mut claims: CourseClaims,
) -> (Vec<Classified>, CourseClaims) {
    let mut results = Vec::with_capacity(links.len());

    for href in links {
        let classified = classify_link(href, ctx, &mut claims);
        tracing::debug!("Classified {:?} as {:?}", href, classified);
        results.push(classified);
    }

    (results, claims)
}

fn classify_link(href: &str, ctx: &ChapterContext<'_>, claims: &mut CourseClaims) -> Classified {
    if href.is_empty() {
        return Classified::MissingFileName(href.to_string());
    }

    let kind = if href.contains("video") {
        ResourceKind::Video
    } else if href.contains("script") {
        if claims.script {
            return Classified::Duplicate {
                kind: ResourceKind::Script,
                href: href.to_string(),
            };
        }
        ResourceKind::Script
    } else if href.contains("code") {
        if claims.archive {
            return Classified::Duplicate {
                kind: ResourceKind::Archive,
                href: href.to_string(),
            };
        }
        ResourceKind::Archive
    } else {
        return Classified::Unknown(href.to_string());
    };

    let file_name = match kind {
        ResourceKind::Video => match video_file_name(ctx.chapter_index, ctx.chapter_slug) {
            Ok(name) => name,
            Err(_) => return Classified::MissingFileName(href.to_string()),
        },
        ResourceKind::Script => script_file_name(ctx.title_path),
        ResourceKind::Archive => archive_file_name(ctx.title_path),
    };

    let Ok(url) = ctx.base_url.join(href) else {
        return Classified::MissingFileName(href.to_string());
    };

    match kind {
        ResourceKind::Script => claims.script = true,
        ResourceKind::Archive => claims.archive = true,
        ResourceKind::Video => {}
    }

    Classified::Target(DownloadTarget {
        path: ctx.course_dir.join(file_name),
        kind,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://symfonycasts.com/").unwrap()
    }

    fn links(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn targets(results: &[Classified]) -> Vec<(ResourceKind, String)> {
        results
            .iter()
            .filter_map(|r| match r {
                Classified::Target(t) => Some((t.kind, t.file_name())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_classify_chapter_links() {
        let base = base();
        let ctx = ChapterContext {
            base_url: &base,
            course_dir: Path::new("/dl/symfonycasts/Doctrine"),
            title_path: "Doctrine",
            chapter_index: 3,
            chapter_slug: "entities",
        };

        let (results, claims) = classify_links(
            &links(&[
                "/screencast/doctrine/entities/download/video",
                "/screencast/doctrine/entities/download/script",
                "/screencast/doctrine/download/code",
                "/screencast/doctrine/entities/download/subtitles",
                "",
            ]),
            &ctx,
            CourseClaims::default(),
        );

        assert_eq!(
            targets(&results),
            vec![
                (ResourceKind::Video, "003-entities.mp4".to_string()),
                (ResourceKind::Script, "Doctrine.pdf".to_string()),
                (ResourceKind::Archive, "Doctrine.zip".to_string()),
            ]
        );
        assert_eq!(
            results[3],
            Classified::Unknown("/screencast/doctrine/entities/download/subtitles".into())
        );
        assert_eq!(results[4], Classified::MissingFileName(String::new()));
        assert_eq!(
            claims,
            CourseClaims {
                script: true,
                archive: true
            }
        );

        match &results[0] {
            Classified::Target(t) => {
                assert_eq!(
                    t.url.as_str(),
                    "https://symfonycasts.com/screencast/doctrine/entities/download/video"
                );
                assert_eq!(
                    t.path,
                    PathBuf::from("/dl/symfonycasts/Doctrine/003-entities.mp4")
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_claims_carry_across_chapters() {
        let base = base();
        let chapter_links = links(&["/c/1/video", "/c/1/script", "/c/code", "/c/1/script"]);
        let mut claims = CourseClaims::default();

        for (index, slug) in [(1, "one"), (2, "two")] {
            let ctx = ChapterContext {
                base_url: &base,
                course_dir: Path::new("/dl/course"),
                title_path: "course",
                chapter_index: index,
                chapter_slug: slug,
            };
            let (results, updated) = classify_links(&chapter_links, &ctx, claims);
            claims = updated;

            let kinds: Vec<_> = targets(&results).into_iter().map(|(k, _)| k).collect();
            if index == 1 {
                assert_eq!(
                    kinds,
                    vec![ResourceKind::Video, ResourceKind::Script, ResourceKind::Archive]
                );
                assert!(matches!(
                    results[3],
                    Classified::Duplicate {
                        kind: ResourceKind::Script,
                        ..
                    }
                ));
            } else {
                // Only the video is new; script and archive were claimed by chapter one.
                assert_eq!(kinds, vec![ResourceKind::Video]);
                assert_eq!(
                    results
                        .iter()
                        .filter(|r| matches!(r, Classified::Duplicate { .. }))
                        .count(),
                    3
                );
            }
        }
    }

    #[test]
    fn test_video_wins_over_script_keyword() {
        let base = base();
        let ctx = ChapterContext {
            base_url: &base,
            course_dir: Path::new("/dl/course"),
            title_path: "course",
            chapter_index: 1,
            chapter_slug: "video-scripts",
        };
        let (results, claims) =
            classify_links(&links(&["/c/video-scripts/video"]), &ctx, CourseClaims::default());
        assert_eq!(targets(&results)[0].0, ResourceKind::Video);
        assert_eq!(claims, CourseClaims::default());
    }

    #[test]
    fn test_activity_chapters() {
        assert!(is_activity_chapter("/screencast/symfony/activity/123"));
        assert!(is_activity_chapter(
            "https://symfonycasts.com/screencast/symfony/activity/007"
        ));
        assert!(!is_activity_chapter("/screencast/symfony/activity/12"));
        assert!(!is_activity_chapter("/screencast/symfony/activity/1234"));
        assert!(!is_activity_chapter("/screencast/symfony/activity/123/next"));
        assert!(!is_activity_chapter("/screencast/symfony/setup"));
    }

    #[test]
    fn test_strip_activity_chapters() {
        let mut chapters = ChapterMap::new();
        chapters.insert("setup", "/screencast/symfony/setup");
        chapters.insert("123", "/screencast/symfony/activity/123");
        chapters.insert("routes", "/screencast/symfony/routes");

        let stripped = strip_activity_chapters(chapters);
        let slugs: Vec<_> = stripped.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["setup", "routes"]);
    }
}
