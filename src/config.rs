use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{JotError, Result};

const CONFIG_FILE_NAME: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory where notes are written
    pub save_directory: PathBuf,

    /// Tag added to every note unless already present; empty disables it
    pub default_tag: String,

    /// Editor command used when the body is written interactively
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            default_tag: String::new(),
            editor_command: None,
        }
    }
}

fn default_save_directory() -> PathBuf {
    if let Some(documents) = dirs::document_dir() {
        return documents;
    }
    dirs::home_dir()
        .map(|home| home.join("Documents"))
        .unwrap_or_else(|| PathBuf::from("Documents"))
}

/// Replaces a leading `~` with the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest.trim_start_matches('/'));
            }
        }
    }
    PathBuf::from(path)
}

impl Config {
    /// Location of the configuration file when none is given on the command line
    pub fn default_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "jot")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or_else(|| JotError::ConfigError {
                message: "Unable to determine the configuration directory".to_string(),
            })
    }

    /// Loads the configuration at `path`, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration {}: {}", path.display(), e);
            JotError::Io(e)
        })?;
        let config: Config = serde_json::from_str(&raw)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| JotError::DirectoryError {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Applies a single `key=value` assignment.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| JotError::ConfigError {
                message: format!("Expected key=value, got '{}'", assignment),
            })?;
        let value = value.trim();

        match key.trim() {
            "save_directory" => {
                if value.is_empty() {
                    return Err(JotError::ConfigError {
                        message: "save_directory cannot be empty".to_string(),
                    });
                }
                self.save_directory = expand_home(value);
            }
            "default_tag" => self.default_tag = value.to_string(),
            "editor_command" => {
                self.editor_command = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            other => {
                return Err(JotError::ConfigError {
                    message: format!("Unknown configuration key '{}'", other),
                })
            }
        }
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        for var in ["VISUAL", "EDITOR"] {
            if let Ok(editor) = std::env::var(var) {
                if !editor.trim().is_empty() {
                    return editor;
                }
            }
        }

        for editor in &["nano", "vim", "vi"] {
            if which(editor).is_ok() {
                return editor.to_string();
            }
        }
        "vi".to_string()
    }
}
