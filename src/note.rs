//! Naming and formatting rules for a captured note.
//!
//! Everything here is pure: given the user's input and the current time, these
//! functions decide the title, the filename, the tag list and the exact text of
//! the file. Writing the result is left to [`crate::NoteStore`].
use chrono::{DateTime, Local};
use unicode_segmentation::UnicodeSegmentation;

/// First lines longer than this (in grapheme clusters) are not used as titles.
pub const MAX_FIRST_LINE_TITLE: usize = 80;

/// Derived titles are cut to this many grapheme clusters in filenames.
pub const MAX_FILENAME_TITLE: usize = 60;

const FILENAME_UNSAFE: &[char] = &[':', '/', '\\'];

const TITLE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Picks a display title for a note. See [`resolve_title_at`].
pub fn resolve_title(explicit: &str, body: &str) -> String {
    resolve_title_at(explicit, body, Local::now())
}

/// Picks a display title for a note.
///
/// A non-blank explicit title wins (trimmed). Otherwise the first line of the
/// body is used when it is non-empty and at most [`MAX_FIRST_LINE_TITLE`]
/// characters long. Failing both, the title is `Note yyyy-mm-dd HH:MM`.
pub fn resolve_title_at(explicit: &str, body: &str, now: DateTime<Local>) -> String {
    let explicit = explicit.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    let first_line = body.split(is_line_break).next().unwrap_or("");
    if !first_line.is_empty() && first_line.graphemes(true).count() <= MAX_FIRST_LINE_TITLE {
        return first_line.to_string();
    }

    format!("Note {}", now.format(TITLE_DATE_FORMAT))
}

/// Strips `:`, `/` and `\` and keeps at most [`MAX_FILENAME_TITLE`] characters.
///
/// Whitespace and case are left alone. Applying it twice changes nothing.
pub fn sanitize(title: &str) -> String {
    let filtered: String = title
        .chars()
        .filter(|c| !FILENAME_UNSAFE.contains(c))
        .collect();

    filtered.graphemes(true).take(MAX_FILENAME_TITLE).collect()
}

/// Builds `"{yyyyMMdd-HHmmss} {sanitized title}.md"` for a derived title.
pub fn make_filename(title: &str) -> String {
    make_filename_at(title, Local::now())
}

pub fn make_filename_at(title: &str, now: DateTime<Local>) -> String {
    format!(
        "{} {}.md",
        now.format(FILENAME_TIMESTAMP_FORMAT),
        sanitize(title)
    )
}

/// Splits comma-separated tags and puts `default_tag` first unless it is
/// already there.
///
/// The presence check is an exact string comparison: `"Work"` does not count
/// as `"work"`.
pub fn collect_tags(input: &str, default_tag: &str) -> Vec<String> {
    let mut tags: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    let default_tag = default_tag.trim();
    if !default_tag.is_empty() && !tags.iter().any(|tag| tag == default_tag) {
        tags.insert(0, default_tag.to_string());
    }

    tags
}

/// Renders the file text: the body alone, or a `tags:` front-matter block
/// followed by a blank line and the body.
pub fn make_content(body: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        return format!("{}\n", body);
    }

    let mut content = String::from("---\ntags:\n");
    for tag in tags {
        content.push_str("  - ");
        content.push_str(tag);
        content.push('\n');
    }
    content.push_str("---\n\n");
    content.push_str(body);
    content
}
