//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output, headings and listings
//! - Progress bars
//! - Statistics reporting
//!
//! Nothing here can fail; reporting never interrupts a download.

pub mod console;
pub mod progress;
pub mod stats;

pub use self::console::{
    print_banner, print_config_summary, print_error, print_info, print_listing, print_section,
    print_success, print_title, print_warning,
};
pub use self::progress::{create_download_bar, create_item_bar};
pub use self::stats::{print_course_stats, print_global_stats};
