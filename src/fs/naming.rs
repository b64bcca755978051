//! Filename generation.

use crate::error::{Error, Result};

/// Characters that are not allowed in Windows paths.
const BAD_PATH_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Extension of chapter videos.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Extension of course scripts.
pub const SCRIPT_EXTENSION: &str = "pdf";

/// Extension of course code archives.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Make a course title usable as a single path component.
///
/// Each of `< > : " / \ | ? *` becomes `-`. Names that would still escape
/// their parent directory, or are blank, are rejected.
pub fn sanitize_title(title: &str) -> Result<String> {
    if title.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            title
        )));
    }

    let sanitized: String = title
        .chars()
        .map(|c| if BAD_PATH_CHARS.contains(&c) { '-' } else { c })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Name cannot be empty or whitespace-only".to_string(),
        ));
    }

    if sanitized == "." || sanitized == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            title
        )));
    }

    Ok(sanitized)
}

/// Video file name: `NNN-<slug>.mp4`, NNN being the 1-based chapter position.
pub fn video_file_name(chapter_index: usize, slug: &str) -> Result<String> {
    let slug = sanitize_title(slug)?;
    Ok(format!("{:03}-{}.{}", chapter_index, slug, VIDEO_EXTENSION))
}

/// Script file name: `<sanitized title>.pdf`.
pub fn script_file_name(title_path: &str) -> String {
    format!("{}.{}", title_path, SCRIPT_EXTENSION)
}

/// Archive file name: `<sanitized title>.zip`.
pub fn archive_file_name(title_path: &str) -> String {
    format!("{}.{}", title_path, ARCHIVE_EXTENSION)
}

/// Turn a dashed slug into a heading: `the-first-route` becomes `The First Route`.
pub fn dashes_to_title(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
