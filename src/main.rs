use std::process::ExitCode;

use clap::Parser;
use console::style;
use log::{debug, info};

use jot::{App, Cli, Config, NoteStore, Result};

pub fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    debug!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    let config = Config::load(&config_path)?;
    let store = NoteStore::new(cli.apply_overrides(config.clone()));
    info!("Saving notes in {}", store.save_directory().display());

    let app = App::new(store, config, config_path, cli.verbose);
    app.run(cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
