//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "showreel")]
#[command(author, version, about = "Themed hero scene with cinematic theme transitions")]
pub struct Cli {
    /// Configuration file (default: .showreel.toml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive showcase (default)
    Tui,
    /// List available themes
    Themes {
        /// Print full theme records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render one frame of a theme to stdout
    Preview {
        /// Theme key
        theme: String,
        #[arg(long, default_value_t = 80)]
        width: u16,
        #[arg(long, default_value_t = 24)]
        height: u16,
    },
    /// Validate the configuration and its themes
    Check,
    /// Write a default configuration file
    Init {
        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["showreel"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_preview_args() {
        let cli = Cli::try_parse_from(["showreel", "preview", "solar", "--width", "40"]).unwrap();
        match cli.command {
            Some(Commands::Preview { theme, width, height }) => {
                assert_eq!(theme, "solar");
                assert_eq!(width, 40);
                assert_eq!(height, 24);
            }
            _ => panic!("expected preview"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["showreel", "themes", "--json", "-c", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Commands::Themes { json: true })));
    }
}
