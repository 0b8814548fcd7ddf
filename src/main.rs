mod app;
mod cli;
mod commands;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use showreel::config::CONFIG_FILE_NAME;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = commands::load_config(config_path)?;
            commands::run_tui(config)
        }
        Some(Commands::Themes { json }) => {
            let config = commands::load_config(config_path)?;
            commands::run_themes(&config, json)
        }
        Some(Commands::Preview { theme, width, height }) => {
            let config = commands::load_config(config_path)?;
            commands::run_preview(&config, &theme, width, height)
        }
        Some(Commands::Check) => commands::run_check(config_path),
        Some(Commands::Init { force }) => {
            let path = config_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            commands::run_init(&path, force)
        }
    }
}
