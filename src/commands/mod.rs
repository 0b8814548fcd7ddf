//! Command implementations

pub mod check;
pub mod init;
pub mod preview;
pub mod themes;
pub mod tui;

pub use check::run_check;
pub use init::run_init;
pub use preview::run_preview;
pub use themes::run_themes;
pub use tui::run_tui;

use anyhow::Result;
use showreel::Config;
use std::path::Path;

/// Configuration from `path`, or `.showreel.toml` when none is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
