use std::path::PathBuf;

use clap::Parser;

use crate::{expand_home, Commands, Config};

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    name = "jot",
    version,
    about = "Capture a quick note as a Markdown file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Directory to save notes in (overrides the configuration for this run)
    #[clap(long, value_parser)]
    pub save_dir: Option<String>,

    /// Tag added to every note (overrides the configuration for this run)
    #[clap(long, value_parser)]
    pub default_tag: Option<String>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the jot application
    #[clap(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Layers the command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.save_dir {
            config.save_directory = expand_home(dir);
        }
        if let Some(tag) = &self.default_tag {
            config.default_tag = tag.clone();
        }
        config
    }
}
