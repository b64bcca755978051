//! HTML extraction.
//!
//! Every function here takes raw page markup and returns owned data, so
//! parsed documents never live across an `.await`. Site-specific selectors
//! are kept in [`selectors`].

pub mod selectors;

use scraper::{ElementRef, Html};

use self::selectors::{
    CHAPTER_LINK_SEL, COURSE_ENTRY_SEL, COURSE_IMAGE_SEL, COURSE_TITLE_SEL, CSRF_FIELD,
    DOWNLOAD_LINK_SEL, LOGIN_INPUT_SEL,
};

/// A course entry found on the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEntry {
    pub title: Option<String>,
    pub href: Option<String>,
}

/// Extract the login form's CSRF token.
///
/// The last token input wins, even when it has no value. Returns `None` when
/// no input carries the token or the winning value is empty.
pub fn csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let token = document
        .select(&LOGIN_INPUT_SEL)
        .filter(|input| input.value().attr("name") == Some(CSRF_FIELD))
        .map(|input| input.value().attr("value").unwrap_or(""))
        .last()
        .filter(|token| !token.is_empty())
        .map(str::to_string);
    token
}

/// Extract course entries from the catalog listing, in page order.
pub fn course_entries(html: &str) -> Vec<CourseEntry> {
    let document = Html::parse_document(html);

    let entries = document
        .select(&COURSE_ENTRY_SEL)
        .map(|anchor| CourseEntry {
            title: course_title(&anchor),
            href: non_empty_attr(&anchor, "href"),
        })
        .collect();
    entries
}

fn course_title(anchor: &ElementRef<'_>) -> Option<String> {
    let from_image = anchor
        .select(&COURSE_IMAGE_SEL)
        .next()
        .and_then(|img| non_empty_attr(&img, "alt"));

    from_image.or_else(|| {
        anchor
            .select(&COURSE_TITLE_SEL)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|title| !title.is_empty())
    })
}

/// Extract chapter hrefs from a course page, in chapter order.
pub fn chapter_links(html: &str) -> Vec<String> {
    hrefs(html, &CHAPTER_LINK_SEL)
}

/// Extract the download menu hrefs from a chapter page, in menu order.
///
/// Anchors without an `href` are returned as empty strings so callers can
/// report them.
pub fn download_links(html: &str) -> Vec<String> {
    hrefs(html, &DOWNLOAD_LINK_SEL)
}

fn hrefs(html: &str, selector: &scraper::Selector) -> Vec<String> {
    let document = Html::parse_document(html);

    let hrefs = document
        .select(selector)
        .map(|a| a.value().attr("href").unwrap_or("").trim().to_string())
        .collect();
    hrefs
}

fn non_empty_attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
