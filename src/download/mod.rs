//! Download module for course content.
//!
//! This module provides:
//! - Resource link classification
//! - Streaming file downloads with progress
//! - Download statistics
//! - Course-by-course orchestration

pub mod classify;
pub mod courses;
pub mod engine;
pub mod state;

pub use classify::{
    classify_links, is_activity_chapter, strip_activity_chapters, ChapterContext, Classified,
    CourseClaims, DownloadTarget, ResourceKind,
};
pub use courses::{download_courses, RunOptions};
pub use engine::{fetch, Fetched, ProgressEvent, ProgressState};
pub use state::{CourseState, GlobalState};
