use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use chrono::{DateTime, Local};
use log::{debug, error, info, trace};
use tempfile::NamedTempFile;

use crate::{
    collect_tags, make_content, make_filename_at, resolve_title_at, Config, JotError, NoteInput,
    PreparedNote, Result, SaveOutcome,
};

/// Writes captured notes into the configured save directory.
pub struct NoteStore {
    /// Application configuration
    config: Config,
}

impl NoteStore {
    /// Creates a store that writes into `config.save_directory` and tags notes
    /// with `config.default_tag`.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn save_directory(&self) -> &Path {
        &self.config.save_directory
    }

    /// Computes the filename and content for `input` without touching the disk.
    ///
    /// Returns `None` when the body is blank.
    pub fn prepare(&self, input: &NoteInput, now: DateTime<Local>) -> Option<PreparedNote> {
        let body = input.body.trim();
        if body.is_empty() {
            return None;
        }

        let explicit_title = input.title.trim();
        let filename = if explicit_title.is_empty() {
            let title = resolve_title_at(&input.title, body, now);
            trace!("Derived title: {}", title);
            make_filename_at(&title, now)
        } else {
            format!("{}.md", explicit_title)
        };

        let tags = collect_tags(&input.tags_csv, &self.config.default_tag);
        let content = make_content(body, &tags);

        Some(PreparedNote { filename, content })
    }

    /// Saves a note, skipping it silently when the body is blank.
    pub fn save(&self, input: &NoteInput) -> Result<SaveOutcome> {
        self.save_at(input, Local::now())
    }

    pub fn save_at(&self, input: &NoteInput, now: DateTime<Local>) -> Result<SaveOutcome> {
        let Some(note) = self.prepare(input, now) else {
            debug!("Note body is blank, nothing to save");
            return Ok(SaveOutcome::Skipped);
        };

        info!("Saving note: {}", note.filename);

        let dir = &self.config.save_directory;
        self.ensure_directory(dir)?;

        if !is_writable(dir)? {
            error!("Save directory is not writable: {}", dir.display());
            return Err(JotError::DirectoryNotWritable { path: dir.clone() });
        }

        // a leading separator must not replace the save directory
        let file_path = dir.join(note.filename.trim_start_matches(['/', '\\']));
        write_atomically(dir, &file_path, &note.content)?;

        info!("Note saved successfully: {}", file_path.display());
        Ok(SaveOutcome::Saved(file_path))
    }

    fn ensure_directory(&self, dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }

        debug!("Creating save directory: {}", dir.display());
        fs::create_dir_all(dir).map_err(|source| {
            error!("Failed to create directory {}: {}", dir.display(), source);
            JotError::DirectoryError {
                path: dir.to_path_buf(),
                source,
            }
        })
    }
}

/// A directory counts as writable unless its permissions mark it read-only.
fn is_writable(dir: &Path) -> Result<bool> {
    let metadata = fs::metadata(dir)?;
    Ok(!metadata.permissions().readonly())
}

/// The permission bits can allow writing while the current user still may not
/// (another owner, ACLs, read-only mounts). The OS refusal is the same
/// condition as a read-only directory, so it is reported the same way.
fn temp_file_error(dir: &Path, e: io::Error) -> JotError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        JotError::DirectoryNotWritable {
            path: dir.to_path_buf(),
        }
    } else {
        JotError::Io(e)
    }
}

/// Writes `content` to a temporary file in `dir`, then renames it onto `file_path`.
fn write_atomically(dir: &Path, file_path: &Path, content: &str) -> Result<()> {
    debug!("Creating temporary file in directory: {}", dir.display());
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        error!("Failed to create temporary file: {}", e);
        temp_file_error(dir, e)
    })?;

    trace!("Writing to temporary file");
    temp_file.write_all(content.as_bytes()).map_err(|e| {
        error!("Failed to write to temporary file: {}", e);
        JotError::Io(e)
    })?;

    temp_file.flush().map_err(|e| {
        error!("Failed to flush temporary file: {}", e);
        JotError::Io(e)
    })?;

    debug!("Performing atomic move of temporary file to final location");
    temp_file.persist(file_path).map_err(|e| {
        error!(
            "Failed to persist file {}: {}",
            file_path.display(),
            e.error
        );
        JotError::Io(e.error)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 11, 2, 14, 30, 5)
            .single()
            .expect("unambiguous local time")
    }

    fn store_in(dir: &Path, default_tag: &str) -> NoteStore {
        NoteStore::new(Config {
            save_directory: dir.to_path_buf(),
            default_tag: default_tag.to_string(),
            editor_command: None,
        })
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn prepare_uses_trimmed_body() {
        let root = TempDir::new().expect("temp dir");
        let store = store_in(root.path(), "");
        let note = store
            .prepare(&NoteInput::new("", "\n  Body content \n\n", ""), fixed_now())
            .expect("prepared");
        assert_eq!(note.filename, "20251102-143005 Body content.md");
        assert_eq!(note.content, "Body content\n");
    }

    #[test]
    fn prepare_explicit_title_skips_sanitizing() {
        let root = TempDir::new().expect("temp dir");
        let store = store_in(root.path(), "");
        let title = "x".repeat(70) + ": done";
        let note = store
            .prepare(&NoteInput::new(format!("  {}  ", title), "body", ""), fixed_now())
            .expect("prepared");
        assert_eq!(note.filename, format!("{}.md", title));
    }

    #[test]
    fn prepare_blank_body_is_none() {
        let root = TempDir::new().expect("temp dir");
        let store = store_in(root.path(), "");
        assert!(store
            .prepare(&NoteInput::new("Title", " \n\t ", "a"), fixed_now())
            .is_none());
    }

    #[test]
    fn prepare_applies_default_tag() {
        let root = TempDir::new().expect("temp dir");
        let store = store_in(root.path(), "quicknote");
        let note = store
            .prepare(&NoteInput::new("T", "Text", "swift"), fixed_now())
            .expect("prepared");
        assert_eq!(
            note.content,
            "---\ntags:\n  - quicknote\n  - swift\n---\n\nText"
        );
    }

    #[test]
    fn save_creates_missing_directories() {
        let root = TempDir::new().expect("temp dir");
        let dir = root.path().join("a").join("b");
        let store = store_in(&dir, "");

        let outcome = store
            .save_at(&NoteInput::new("Deep", "Content", ""), fixed_now())
            .expect("save");
        assert_eq!(outcome, SaveOutcome::Saved(dir.join("Deep.md")));
        assert_eq!(file_names(&dir), ["Deep.md"]);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let root = TempDir::new().expect("temp dir");
        let store = store_in(root.path(), "");
        store
            .save(&NoteInput::new("Same", "first", ""))
            .expect("first save");
        store
            .save(&NoteInput::new("Same", "second", ""))
            .expect("second save");

        assert_eq!(file_names(root.path()), ["Same.md"]);
        let content = fs::read_to_string(root.path().join("Same.md")).expect("read");
        assert_eq!(content, "second\n");
    }

    #[test]
    fn save_into_file_path_is_io_error() {
        let root = TempDir::new().expect("temp dir");
        let blocker = root.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("write");
        let store = store_in(&blocker.join("notes"), "");

        let err = store
            .save(&NoteInput::new("T", "Body", ""))
            .expect_err("should fail");
        assert!(matches!(err, JotError::DirectoryError { .. }));
    }

    #[test]
    fn leading_separator_stays_inside_save_directory() {
        let root = TempDir::new().expect("temp dir");
        let store = store_in(root.path(), "");

        let outcome = store
            .save(&NoteInput::new("/escaped", "Body", ""))
            .expect("save");
        assert_eq!(outcome, SaveOutcome::Saved(root.path().join("escaped.md")));

        fs::create_dir(root.path().join("abs")).expect("create abs");
        let outcome = store
            .save(&NoteInput::new("/abs/x", "Body", ""))
            .expect("save nested");
        assert_eq!(outcome, SaveOutcome::Saved(root.path().join("abs").join("x.md")));
        assert_eq!(file_names(&root.path().join("abs")), ["x.md"]);
    }

    #[test]
    fn absolute_title_never_writes_outside_save_directory() {
        let root = TempDir::new().expect("temp dir");
        let elsewhere = TempDir::new().expect("other temp dir");
        let store = store_in(root.path(), "");

        let title = format!("{}/escaped", elsewhere.path().display());
        let result = store.save(&NoteInput::new(title, "Body", ""));

        assert!(matches!(result, Err(JotError::Io(_))));
        assert!(file_names(elsewhere.path()).is_empty());
    }

    #[test]
    fn permission_denied_on_temp_file_is_not_writable() {
        let dir = Path::new("/srv/notes");
        let err = temp_file_error(dir, io::Error::from(io::ErrorKind::PermissionDenied));
        match err {
            JotError::DirectoryNotWritable { path } => assert_eq!(path, dir),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = temp_file_error(dir, io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(matches!(err, JotError::Io(_)));
    }

    #[test]
    fn explicit_title_with_slash_is_not_sanitized() {
        let root = TempDir::new().expect("temp dir");
        let store = store_in(root.path(), "");

        let err = store
            .save(&NoteInput::new("missing/child", "Body", ""))
            .expect_err("nested path does not exist");
        assert!(matches!(err, JotError::Io(_)));
        assert!(file_names(root.path()).is_empty());
    }
}
