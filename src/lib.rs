//! Quick-capture note library
//!
//! This library turns a title, a body and a list of tags into a Markdown file
//! with optional YAML front-matter, written atomically into a save directory.

mod cli;
mod config;
mod errors;
mod helper;
mod note;
mod storage;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use note::*;
pub use storage::*;
pub use types::*;
