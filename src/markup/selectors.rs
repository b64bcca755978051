//! CSS selectors describing the site's markup.
//!
//! When the site changes its templates, this is the file to update.

use std::sync::LazyLock;

use scraper::Selector;

/// Every form input on the login page.
pub const LOGIN_INPUT: &str = "input";

/// Name of the hidden login form field carrying the CSRF token.
pub const CSRF_FIELD: &str = "_csrf_token";

/// Course entry anchors on the catalog listing.
pub const COURSE_ENTRY: &str =
    "body > div.course-list-bookmark-container.js-course-item > div > div > a";

/// Course cover image inside an entry; its `alt` is the title.
pub const COURSE_IMAGE: &str = "img[alt]";

/// Dedicated title element inside an entry, used when the image has no `alt`.
pub const COURSE_TITLE: &str = ".course-title, h3";

/// Chapter anchors on a course page, in chapter order.
pub const CHAPTER_LINK: &str = "ul.chapter-list > li > a";

/// Anchors inside the chapter page's download menu.
pub const DOWNLOAD_LINK: &str = r#"[aria-labelledby="downloadDropdown"] a"#;

fn parse(selector: &'static str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid selector {selector:?}: {e:?}"))
}

pub(crate) static LOGIN_INPUT_SEL: LazyLock<Selector> = LazyLock::new(|| parse(LOGIN_INPUT));
pub(crate) static COURSE_ENTRY_SEL: LazyLock<Selector> = LazyLock::new(|| parse(COURSE_ENTRY));
pub(crate) static COURSE_IMAGE_SEL: LazyLock<Selector> = LazyLock::new(|| parse(COURSE_IMAGE));
pub(crate) static COURSE_TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| parse(COURSE_TITLE));
pub(crate) static CHAPTER_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| parse(CHAPTER_LINK));
pub(crate) static DOWNLOAD_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| parse(DOWNLOAD_LINK));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selectors_parse() {
        for selector in [
            LOGIN_INPUT,
            COURSE_ENTRY,
            COURSE_IMAGE,
            COURSE_TITLE,
            CHAPTER_LINK,
            DOWNLOAD_LINK,
        ] {
            assert!(Selector::parse(selector).is_ok(), "{selector}");
        }
    }
}
