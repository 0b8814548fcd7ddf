//! Error types for theme lookup and registry construction

use thiserror::Error;

/// A theme key that is not present in the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme: {name}")]
pub struct UnknownThemeError {
    /// The key that was requested
    pub name: String,
}

impl UnknownThemeError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Problems found while building a theme registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// A theme is missing or has an out-of-range attribute
    #[error("theme '{key}' is invalid: {reason}")]
    InvalidTheme { key: String, reason: String },

    /// Two themes share the same key
    #[error("duplicate theme key: {0}")]
    DuplicateKey(String),

    /// The registry would contain no themes
    #[error("theme registry is empty")]
    Empty,

    /// The configured default theme is not registered
    #[error("default theme is not registered: {0}")]
    UnknownDefault(#[from] UnknownThemeError),
}
