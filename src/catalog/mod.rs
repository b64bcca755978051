//! Course catalog module.
//!
//! This module provides:
//! - Ordered catalog types (course title -> chapter slug -> URL)
//! - Discovery by crawling the site
//! - Blueprint cache persistence
//! - Allow-list filtering

pub mod cache;
pub mod discover;
pub mod filter;
pub mod types;

pub use cache::CatalogCache;
pub use discover::{chapter_slug, discover, load_or_discover, parse_chapters, Discovery};
pub use filter::{filter_courses, unmatched_titles};
pub use types::{Catalog, Chapter, ChapterMap, Course};
