//! Download statistics.

use crate::download::classify::ResourceKind;

/// Per-course download statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CourseState {
    pub title: String,

    // Files written this run
    pub video_count: u64,
    pub script_count: u64,
    pub archive_count: u64,
    pub bytes_written: u64,

    /// Targets already present on disk.
    pub skipped_count: u64,
    /// Targets whose transfer failed.
    pub failed_count: u64,
    /// Targets a dry run would have downloaded.
    pub planned_count: u64,
    /// Chapters whose page could not be fetched.
    pub chapters_failed: u64,
}

impl CourseState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Record a written file.
    pub fn record_written(&mut self, kind: ResourceKind, bytes: u64) {
        match kind {
            ResourceKind::Video => self.video_count += 1,
            ResourceKind::Script => self.script_count += 1,
            ResourceKind::Archive => self.archive_count += 1,
        }
        self.bytes_written += bytes;
    }

    pub fn record_skipped(&mut self) {
        self.skipped_count += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed_count += 1;
    }

    pub fn record_planned(&mut self) {
        self.planned_count += 1;
    }

    pub fn record_chapter_failed(&mut self) {
        self.chapters_failed += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.video_count + self.script_count + self.archive_count
    }
}

/// Global statistics across all courses.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GlobalState {
    pub video_count: u64,
    pub script_count: u64,
    pub archive_count: u64,
    pub bytes_written: u64,
    pub skipped_count: u64,
    pub failed_count: u64,
    pub planned_count: u64,
    pub courses_processed: u64,
    pub courses_skipped: u64,
}

impl GlobalState {
    /// Add statistics from a course's download state.
    pub fn add_course_stats(&mut self, state: &CourseState) {
        self.video_count += state.video_count;
        self.script_count += state.script_count;
        self.archive_count += state.archive_count;
        self.bytes_written += state.bytes_written;
        self.skipped_count += state.skipped_count;
        self.failed_count += state.failed_count;
        self.planned_count += state.planned_count;
        self.courses_processed += 1;
    }

    /// Mark a course as skipped entirely.
    pub fn mark_course_skipped(&mut self) {
        self.courses_skipped += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.video_count + self.script_count + self.archive_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_totals() {
        let mut course = CourseState::new("Doctrine");
        course.record_written(ResourceKind::Video, 100);
        course.record_written(ResourceKind::Video, 50);
        course.record_written(ResourceKind::Script, 10);
        course.record_skipped();
        course.record_failed();

        assert_eq!(course.video_count, 2);
        assert_eq!(course.total_downloaded(), 3);
        assert_eq!(course.bytes_written, 160);

        let mut global = GlobalState::default();
        global.add_course_stats(&course);
        global.add_course_stats(&CourseState::new("Empty"));
        global.mark_course_skipped();

        assert_eq!(global.total_downloaded(), 3);
        assert_eq!(global.skipped_count, 1);
        assert_eq!(global.failed_count, 1);
        assert_eq!(global.courses_processed, 2);
        assert_eq!(global.courses_skipped, 1);
    }
}
