//! Check command implementation

use anyhow::{Result, bail};
use showreel::view::{AvatarSource, FileAvatarSource};
use showreel::{Config, ThemeRegistry};
use std::path::Path;

/// Outcome of one configuration check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Ok(String),
    Warning(String),
    Error(String),
}

impl Finding {
    fn icon(&self) -> &'static str {
        match self {
            Finding::Ok(_) => "✅",
            Finding::Warning(_) => "⚠️ ",
            Finding::Error(_) => "❌",
        }
    }

    fn message(&self) -> &str {
        match self {
            Finding::Ok(m) | Finding::Warning(m) | Finding::Error(m) => m,
        }
    }
}

/// Run the check command
pub fn run_check(config_path: Option<&Path>) -> Result<()> {
    println!("showreel Configuration Check\n");

    let config = match crate::commands::load_config(config_path) {
        Ok(config) => {
            match config_path {
                Some(path) => println!("✅ Loaded {}", path.display()),
                None if Path::new(showreel::config::CONFIG_FILE_NAME).exists() => {
                    println!("✅ Loaded {}", showreel::config::CONFIG_FILE_NAME)
                }
                None => println!("⚠️  No {} found, using defaults", showreel::config::CONFIG_FILE_NAME),
            }
            config
        }
        Err(e) => {
            println!("❌ {e:#}");
            bail!("configuration could not be loaded");
        }
    };

    let findings = check_config(&config);
    for finding in &findings {
        println!("{} {}", finding.icon(), finding.message());
    }

    let errors = findings
        .iter()
        .filter(|f| matches!(f, Finding::Error(_)))
        .count();
    println!();
    if errors > 0 {
        bail!("{errors} problem(s) found");
    }
    println!("Configuration looks good.");
    Ok(())
}

/// Validate everything the showcase needs from `config`
pub fn check_config(config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    let registry = match config.registry() {
        Ok(registry) => {
            findings.push(Finding::Ok(format!("{} themes registered", registry.len())));
            registry
        }
        Err(e) => {
            findings.push(Finding::Error(format!("{e:#}")));
            return findings;
        }
    };

    match registry.lookup(&config.default_theme) {
        Ok(theme) => findings.push(Finding::Ok(format!("Default theme: {}", theme.display_name))),
        Err(e) => findings.push(Finding::Error(format!("default_theme: {e}"))),
    }

    let t = &config.transition;
    if t.engage_ms == 0 || t.disengage_ms == 0 {
        findings.push(Finding::Warning(
            "Curtain duration of 0 ms makes theme switches instant".to_string(),
        ));
    }
    if t.max_queue == 0 {
        findings.push(Finding::Warning(
            "max_queue = 0 drops every request made during a transition".to_string(),
        ));
    }
    if config.animation.fps == 0 || config.animation.fps > 120 {
        findings.push(Finding::Warning(format!(
            "fps = {} is clamped to 1..=120",
            config.animation.fps
        )));
    }

    findings.extend(check_avatars(&registry, &config.avatar_root()));
    findings
}

fn check_avatars(registry: &ThemeRegistry, dir: &Path) -> Vec<Finding> {
    let source = FileAvatarSource::new(dir);
    registry
        .themes()
        .iter()
        .filter(|theme| source.load(&theme.avatar.path).is_none())
        .map(|theme| {
            Finding::Warning(format!(
                "{}: avatar {} not found, fallback art is used",
                theme.key,
                dir.join(theme.avatar.path.as_ref()).display()
            ))
        })
        .collect()
}
