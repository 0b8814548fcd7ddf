//! showreel - themed hero scene with cinematic theme transitions
//!
//! This crate provides the theme model and the machinery that switches
//! between themes behind a full-screen curtain.
//!
//! # Modules
//!
//! - [`theme`] - Theme records and the built-in set
//! - [`registry`] - Validated lookup table of themes
//! - [`store`] - Active selection with explicit subscriptions
//! - [`transition`] - Curtain orchestrator (engage, mutate, disengage)
//! - [`view`] - Themed layers that re-animate on every theme change
//! - [`particles`] - Free-running background decoration
//! - [`config`] - `.showreel.toml` loading and saving

pub mod color;
pub mod config;
pub mod debug;
pub mod error;
pub mod particles;
pub mod registry;
pub mod store;
pub mod theme;
pub mod transition;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use error::{RegistryError, UnknownThemeError};
pub use particles::{ParticleConfig, ParticleField};
pub use registry::{DEFAULT_THEME, ThemeRegistry};
pub use store::{ThemeChange, ThemeStore, ThemeSubscription};
pub use theme::{BUILTIN_THEMES, Theme};
pub use transition::{
    BusyPolicy, Submission, TransitionConfig, TransitionEvent, TransitionOrchestrator,
    TransitionPhase,
};
pub use view::{AvatarSource, CurtainOverlay, ThemedLayer, ViewStack};
