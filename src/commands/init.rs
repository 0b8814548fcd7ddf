//! Init command implementation

use anyhow::{Context, Result};
use showreel::{BUILTIN_THEMES, Config};
use std::fs;
use std::path::Path;

/// Run the init command
pub fn run_init(config_path: &Path, force: bool) -> Result<()> {
    println!("🚀 Initializing showreel...\n");

    // 1. Create config if not exists
    if write_config(config_path, force)? {
        println!("✅ Created configuration: {}", config_path.display());
    } else {
        println!("📄 Configuration file already exists (use --force to overwrite)");
    }

    // 2. Seed avatar art next to it
    let config = Config::load_from(config_path)?;
    let avatar_dir = config.avatar_root();
    let written = write_avatars(&avatar_dir, force)?;
    if written > 0 {
        println!("✅ Wrote {written} avatar file(s) under {}", avatar_dir.display());
    } else {
        println!("📁 Avatar files already exist");
    }

    println!("\n🎉 showreel initialization complete!");
    println!("\nNext steps:");
    println!("  1. Edit {} to set your headline and tagline", config_path.display());
    println!("  2. Replace the avatar art with your own");
    println!("  3. Run 'showreel' and press n/p to switch themes");

    Ok(())
}

/// Write the default configuration; false when it exists and `force` is off
pub fn write_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    Config::generate_default(path)?;
    Ok(true)
}

/// Write the fallback art of every built-in theme to its avatar path
///
/// Returns the number of files written.
pub fn write_avatars(dir: &Path, force: bool) -> Result<usize> {
    let mut written = 0;
    for theme in BUILTIN_THEMES {
        let path = dir.join(theme.avatar.path.as_ref());
        if path.exists() && !force {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, format!("{}\n", theme.avatar.fallback))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_config_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".showreel.toml");

        assert!(write_config(&path, false).unwrap());
        fs::write(&path, "default_theme = \"solar\"\n").unwrap();
        assert!(!write_config(&path, false).unwrap());
        assert_eq!(Config::load_from(&path).unwrap().default_theme, "solar");

        assert!(write_config(&path, true).unwrap());
        assert_eq!(Config::load_from(&path).unwrap().default_theme, "midnight");
    }

    #[test]
    fn test_write_avatars_once() {
        let dir = TempDir::new().unwrap();
        let first = write_avatars(dir.path(), false).unwrap();
        // midnight and midnight-wide share one file
        assert_eq!(first, BUILTIN_THEMES.len() - 1);
        assert_eq!(write_avatars(dir.path(), false).unwrap(), 0);

        let art = fs::read_to_string(dir.path().join("assets/avatars/solar.txt")).unwrap();
        assert!(!art.trim().is_empty());
    }

    #[test]
    fn test_run_init_in_temp_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".showreel.toml");
        run_init(&path, false).unwrap();
        assert!(path.exists());
        assert!(dir.path().join("assets/avatars/midnight.txt").exists());
    }
}
