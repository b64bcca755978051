//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print a top-level title, underlined.
pub fn print_title(message: &str) {
    println!();
    println!("{}", style(message).green().bold());
    println!("{}", style("=".repeat(message.chars().count())).green());
}

/// Print a section heading.
pub fn print_section(message: &str) {
    println!();
    println!("{}", style(message).yellow().bold());
    println!("{}", style("-".repeat(message.chars().count())).yellow());
}

/// Print a bulleted list.
pub fn print_listing<S: AsRef<str>>(items: &[S]) {
    for item in items {
        println!("  * {}", item.as_ref());
    }
    println!();
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Course Downloader                                 ║
║     Videos, scripts and code for your courses         ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(site: &str, courses: &[String], download_dir: &str, blueprint: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Site: {}", site);
    if courses.is_empty() {
        println!("  Courses: all");
    } else {
        println!("  Courses: {}", courses.join(", "));
    }
    println!("  Directory: {}", download_dir);
    println!("  Blueprint: {}", blueprint);
    println!();
}
