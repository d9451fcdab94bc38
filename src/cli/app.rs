//! CLI module for the jot application
//!
//! This module turns parsed commands into calls on the note store, standing in
//! for the capture panel: it gathers a title, a body and tags, then saves.
use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, IsTerminal, Read, Write},
    path::{Path, PathBuf},
    process::Command,
};

use console::style;
use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{Commands, Config, JotError, NoteInput, NoteStore, Result, SaveOutcome, TagEntry};

/// CLI Application handler - processes CLI commands and interfaces with NoteStore
pub struct App {
    /// Store built from the effective configuration (file plus command-line overrides)
    store: NoteStore,

    /// Configuration as persisted on disk
    config: Config,

    /// Where `config` is read from and written to
    config_path: PathBuf,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    pub fn new(store: NoteStore, config: Config, config_path: PathBuf, verbose: bool) -> Self {
        Self {
            store,
            config,
            config_path,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::New {
                title,
                body,
                file,
                edit,
                tag,
                tags,
                dry_run,
            } => {
                let body = self.read_body(body, file, edit)?;
                let input = NoteInput::new(
                    title.unwrap_or_default(),
                    body,
                    tags_from_args(&tag, tags.as_deref()),
                );
                self.capture_note(&input, dry_run)?
            }

            Commands::Config { show, set, reset } => self.handle_config(show, set, reset)?,
        }

        Ok(())
    }

    fn capture_note(&self, input: &NoteInput, dry_run: bool) -> Result<()> {
        if dry_run {
            match self.store.prepare(input, chrono::Local::now()) {
                Some(note) => {
                    let path = self.store.save_directory().join(&note.filename);
                    println!("{}", style(path.display()).bold());
                    println!("{}", note.content);
                }
                None => println!("{}", style("Note body is empty, nothing to save.").yellow()),
            }
            return Ok(());
        }

        match self.store.save(input)? {
            SaveOutcome::Saved(path) => {
                println!("{} {}", style("Saved").green(), path.display());
            }
            SaveOutcome::Skipped => {
                println!("{}", style("Note body is empty, nothing saved.").yellow());
            }
        }
        Ok(())
    }

    /// Picks the body from `--body`, `--file`, piped stdin or the editor, in that order.
    fn read_body(&self, body: Option<String>, file: Option<PathBuf>, edit: bool) -> Result<String> {
        let initial = match (body, file) {
            (Some(b), _) => Some(b),
            (_, Some(file_path)) => Some(read_body_file(&file_path)?),
            (None, None) if !edit && !stdin().is_terminal() => {
                debug!("Reading note body from stdin");
                let mut buffer = String::new();
                stdin().read_to_string(&mut buffer)?;
                Some(buffer)
            }
            (None, None) => None,
        };

        match initial {
            Some(text) if !edit => Ok(text),
            other => self.open_editor_for_body(other.as_deref().unwrap_or("")),
        }
    }

    fn open_editor_for_body(&self, existing: &str) -> Result<String> {
        // Create a temporary file with .md extension
        let temp_file = Builder::new().prefix("jot-").suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let editor_cmd = self.config.get_editor_command();

        write_editor_template(&temp_path, existing)?;

        info!("Opening editor to write note body. Save and exit when done...");
        if self.verbose {
            println!("Opening {} ...", editor_cmd);
        }
        launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(strip_comments(&content))
    }

    fn handle_config(&self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        if reset {
            let config = Config::default();
            config.save(&self.config_path)?;
            println!("Configuration reset to defaults.");
            return print_config(&config);
        }

        if let Some(assignment) = set {
            let mut config = self.config.clone();
            config.set(&assignment)?;
            config.save(&self.config_path)?;
            println!("Configuration updated: {}", self.config_path.display());
            return print_config(&config);
        }

        if show || self.verbose {
            println!("# {}", self.config_path.display());
        }
        print_config(&self.config)
    }
}

fn print_config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn read_body_file(file_path: &Path) -> Result<String> {
    if !file_path.is_file() {
        return Err(JotError::FileNotFound {
            file_path: file_path.display().to_string(),
        });
    }
    Ok(read_to_string(file_path)?)
}

/// Runs every `--tag` and every piece of `--tags` through a [`TagEntry`] and
/// returns the resulting CSV.
pub fn tags_from_args(tag: &[String], tags: Option<&str>) -> String {
    let mut entry = TagEntry::new();
    for t in tag {
        entry.commit_csv(t);
    }
    if let Some(csv) = tags {
        entry.commit_csv(csv);
    }
    entry.to_csv()
}

fn write_editor_template(path: &Path, existing: &str) -> Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;

    writeln!(file, "<!--")?;
    writeln!(file, "Write your note below. The first line becomes the title")?;
    writeln!(file, "when none was given. Comments like this one are removed.")?;
    writeln!(file, "Save and exit the editor when you're done.")?;
    writeln!(file, "-->")?;
    write!(file, "{}", existing)?;

    Ok(())
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| JotError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let Some((program, rest)) = args.split_first() else {
        return Err(JotError::EditorError {
            message: "Empty editor command".to_string(),
        });
    };

    let status = Command::new(program)
        .args(rest)
        .arg(file_path)
        .status()
        .map_err(|e| JotError::EditorError {
            message: format!("Failed to execute editor command: {}", e),
        })?;

    if !status.success() {
        return Err(JotError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

/// Removes `<!-- ... -->` blocks. An unterminated block runs to the end.
pub fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start..].find("-->") {
            Some(end) => {
                rest = &rest[start + end + 3..];
                // drop the newline that closed the comment line
                rest = rest
                    .strip_prefix("\r\n")
                    .or_else(|| rest.strip_prefix('\n'))
                    .unwrap_or(rest);
            }
            None => {
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
