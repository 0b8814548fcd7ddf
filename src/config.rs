//! Configuration file support for showreel
//!
//! Handles `.showreel.toml` configuration file loading and saving.

use crate::particles::ParticleConfig;
use crate::registry::{DEFAULT_THEME, ThemeRegistry};
use crate::theme::Theme;
use crate::transition::{BusyPolicy, TransitionConfig};
use crate::view::{AnimationTiming, HeroCopy};
use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = ".showreel.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Theme shown at startup (the selection is never written back)
    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// Directory avatar references are resolved against, relative to the
    /// configuration file
    #[serde(default = "default_avatar_dir")]
    pub avatar_dir: PathBuf,

    /// Directory of the file this configuration was loaded from
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,

    /// Curtain timing and busy policy
    #[serde(default)]
    pub transition: TransitionSettings,

    /// Per-layer exit/entrance timing and frame rate
    #[serde(default)]
    pub animation: AnimationSettings,

    /// Background particle decoration
    #[serde(default)]
    pub particles: ParticleSettings,

    /// Heading copy
    #[serde(default)]
    pub hero: HeroCopy,

    /// Additional themes, appended after the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<Theme>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_theme: default_theme(),
            transition: TransitionSettings::default(),
            animation: AnimationSettings::default(),
            particles: ParticleSettings::default(),
            hero: HeroCopy::default(),
            avatar_dir: default_avatar_dir(),
            base_dir: None,
            themes: Vec::new(),
        }
    }
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_avatar_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Curtain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionSettings {
    /// Curtain fade-in in milliseconds (default: 450)
    #[serde(default = "default_curtain_ms")]
    pub engage_ms: u64,

    /// Curtain fade-out in milliseconds (default: 450)
    #[serde(default = "default_curtain_ms")]
    pub disengage_ms: u64,

    /// "queue" or "ignore" (default: "queue")
    #[serde(default)]
    pub busy_policy: BusyPolicy,

    /// Max waiting requests under the queue policy (default: 8)
    #[serde(default = "default_max_queue")]
    pub max_queue: usize,

    /// Curtain color (default: "#000000")
    #[serde(default = "default_curtain_color")]
    pub curtain_color: Color,
}

fn default_curtain_ms() -> u64 {
    450
}

fn default_max_queue() -> usize {
    8
}

fn default_curtain_color() -> Color {
    Color::Rgb(0, 0, 0)
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            engage_ms: default_curtain_ms(),
            disengage_ms: default_curtain_ms(),
            busy_policy: BusyPolicy::default(),
            max_queue: default_max_queue(),
            curtain_color: default_curtain_color(),
        }
    }
}

/// Layer animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationSettings {
    /// Exit animation in milliseconds (default: 150)
    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,

    /// Entrance animation in milliseconds (default: 600)
    #[serde(default = "default_entrance_ms")]
    pub entrance_ms: u64,

    /// Target frames per second (default: 30)
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_exit_ms() -> u64 {
    150
}

fn default_entrance_ms() -> u64 {
    600
}

fn default_fps() -> u32 {
    30
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            exit_ms: default_exit_ms(),
            entrance_ms: default_entrance_ms(),
            fps: default_fps(),
        }
    }
}

/// Particle decoration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSettings {
    #[serde(default = "default_particles_enabled")]
    pub enabled: bool,

    #[serde(flatten)]
    pub field: ParticleConfig,
}

fn default_particles_enabled() -> bool {
    true
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            enabled: default_particles_enabled(),
            field: ParticleConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration file (returns default if not found)
    ///
    /// Searches for `.showreel.toml` in the current directory.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from specified path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        Ok(config)
    }

    /// Save configuration to specified path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default(path: &Path) -> Result<()> {
        let config = Config::default();
        config.save_to(path)
    }

    /// `avatar_dir` resolved against the configuration file's directory
    pub fn avatar_root(&self) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(&self.avatar_dir),
            None => self.avatar_dir.clone(),
        }
    }

    /// Built-in themes plus the configured ones, validated
    pub fn registry(&self) -> Result<ThemeRegistry> {
        ThemeRegistry::with_custom(self.themes.clone())
            .context("Invalid theme in configuration")
    }

    pub fn transition_config(&self) -> TransitionConfig {
        TransitionConfig {
            engage: Duration::from_millis(self.transition.engage_ms),
            disengage: Duration::from_millis(self.transition.disengage_ms),
            busy_policy: self.transition.busy_policy,
            max_queue: self.transition.max_queue,
        }
    }

    pub fn animation_timing(&self) -> AnimationTiming {
        AnimationTiming {
            exit: Duration::from_millis(self.animation.exit_ms),
            entrance: Duration::from_millis(self.animation.entrance_ms),
        }
    }

    /// Time budget for one frame
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.animation.fps.clamp(1, 120)
    }
}
