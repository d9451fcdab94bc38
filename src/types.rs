//! Core data structures for the jot application.
//!
//! This module contains the values that flow through a single save, and the
//! subcommands understood by the command-line front end.
use std::path::PathBuf;

use clap::Subcommand;

use crate::JotError;

/// A specialized Result type for jot operations.
pub type Result<T> = std::result::Result<T, JotError>;

/// What the editor hands over at save time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    /// Title typed by the user, possibly empty or whitespace
    pub title: String,
    /// Free-form note body
    pub body: String,
    /// Comma-separated tags
    pub tags_csv: String,
}

impl NoteInput {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        tags_csv: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags_csv: tags_csv.into(),
        }
    }
}

/// A note whose filename and file content have been computed but not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedNote {
    /// Name of the file inside the save directory
    pub filename: String,
    /// Exact text that will be written
    pub content: String,
}

/// Result of a save that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The note was written to this path
    Saved(PathBuf),
    /// The body was blank, nothing was written
    Skipped,
}

/// Available subcommands for the jot application
#[derive(Subcommand)]
pub enum Commands {
    /// Capture a new note
    New {
        /// Title of the note, used verbatim as the filename
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Body of the note
        #[clap(short, long)]
        body: Option<String>,

        /// Path to a file containing the note's body
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open the body in an editor before saving
        #[clap(short, long)]
        edit: bool,

        /// A tag to attach (repeatable)
        #[clap(short = 't', long = "tag")]
        tag: Vec<String>,

        /// Tags to attach (comma-separated)
        #[clap(long)]
        tags: Option<String>,

        /// Print the filename and content instead of writing
        #[clap(long)]
        dry_run: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
