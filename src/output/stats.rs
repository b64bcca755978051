//! Statistics reporting.

use console::style;
use indicatif::HumanBytes;

use crate::download::{CourseState, GlobalState};

/// Print statistics for a single course.
pub fn print_course_stats(state: &CourseState) {
    println!();
    println!("{}", style(format!("Statistics for '{}':", state.title)).bold());
    println!("  Videos:   {}", state.video_count);
    println!("  Scripts:  {}", state.script_count);
    println!("  Archives: {}", state.archive_count);
    println!("  Skipped:  {} (already downloaded)", state.skipped_count);
    if state.planned_count > 0 {
        println!("  Planned:  {} (dry run)", state.planned_count);
    }
    if state.failed_count > 0 {
        println!("  Failed:   {}", style(state.failed_count).red());
    }
    if state.chapters_failed > 0 {
        println!("  Chapters failed: {}", style(state.chapters_failed).red());
    }
    println!(
        "  Total:    {} downloaded ({})",
        state.total_downloaded(),
        HumanBytes(state.bytes_written)
    );
}

/// Print global statistics across all courses.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Courses processed: {}", state.courses_processed);
    if state.courses_skipped > 0 {
        println!(
            "  Courses skipped:   {}",
            style(state.courses_skipped).yellow()
        );
    }
    println!("  Videos:   {}", state.video_count);
    println!("  Scripts:  {}", state.script_count);
    println!("  Archives: {}", state.archive_count);
    println!("  Skipped:  {} (already downloaded)", state.skipped_count);
    if state.planned_count > 0 {
        println!("  Planned:  {} (dry run)", state.planned_count);
    }
    if state.failed_count > 0 {
        println!("  Failed:   {}", style(state.failed_count).red());
    }
    println!(
        "  Total:    {} downloaded ({})",
        state.total_downloaded(),
        HumanBytes(state.bytes_written)
    );
    println!("{}", style("═".repeat(50)).dim());
}
