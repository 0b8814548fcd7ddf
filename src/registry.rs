//! Theme registry
//!
//! Read-only table of validated themes. Construction is the only place a
//! theme can be rejected; once a registry exists, every key it advertises
//! resolves to a complete theme.

use crate::error::{RegistryError, UnknownThemeError};
use crate::theme::{BUILTIN_THEMES, Theme};

/// Key of the theme selected at startup when nothing else is configured
pub const DEFAULT_THEME: &str = "midnight";

/// Validated, immutable set of themes in display order
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    /// Registry holding only the built-in themes
    pub fn builtin() -> Self {
        Self {
            themes: BUILTIN_THEMES.to_vec(),
        }
    }

    /// Build a registry from an explicit list, validating every theme
    pub fn from_themes(themes: Vec<Theme>) -> Result<Self, RegistryError> {
        if themes.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, theme) in themes.iter().enumerate() {
            theme.validate()?;
            if themes[..i].iter().any(|t| t.key == theme.key) {
                return Err(RegistryError::DuplicateKey(theme.key.to_string()));
            }
        }

        Ok(Self { themes })
    }

    /// Built-in themes followed by user-defined ones
    pub fn with_custom(custom: Vec<Theme>) -> Result<Self, RegistryError> {
        let mut themes = BUILTIN_THEMES.to_vec();
        themes.extend(custom);
        Self::from_themes(themes)
    }

    /// Resolve a key to its theme
    ///
    /// Keys match case-insensitively after trimming surrounding whitespace.
    pub fn lookup(&self, name: &str) -> Result<&Theme, UnknownThemeError> {
        let wanted = name.trim();
        self.themes
            .iter()
            .find(|t| t.key.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownThemeError::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// All keys in display order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.key.as_ref())
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Position of a key in display order
    pub fn index_of(&self, name: &str) -> Result<usize, UnknownThemeError> {
        let wanted = name.trim();
        self.themes
            .iter()
            .position(|t| t.key.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownThemeError::new(name))
    }

    /// Key after `current`, wrapping at the end
    pub fn next_key(&self, current: &str) -> Result<&str, UnknownThemeError> {
        let index = self.index_of(current)?;
        let next = (index + 1) % self.themes.len();
        Ok(self.themes[next].key.as_ref())
    }

    /// Key before `current`, wrapping at the start
    pub fn prev_key(&self, current: &str) -> Result<&str, UnknownThemeError> {
        let index = self.index_of(current)?;
        let prev = if index == 0 {
            self.themes.len() - 1
        } else {
            index - 1
        };
        Ok(self.themes[prev].key.as_ref())
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{CRIMSON, MIDNIGHT, SOLAR};
    use proptest::prelude::*;
    use std::borrow::Cow;

    #[test]
    fn test_builtin_contains_default() {
        let registry = ThemeRegistry::builtin();
        assert!(registry.contains(DEFAULT_THEME));
        assert_eq!(registry.len(), 6);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_lookup_known() {
        let registry = ThemeRegistry::builtin();
        let theme = registry.lookup("crimson").unwrap();
        assert_eq!(theme.key, "crimson");
        assert_eq!(theme.display_name, "Crimson");
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.lookup("  SOLAR ").unwrap().key, "solar");
    }

    #[test]
    fn test_lookup_unknown_fails_fast() {
        let registry = ThemeRegistry::builtin();
        let err = registry.lookup("nonexistent").unwrap_err();
        assert_eq!(err, UnknownThemeError::new("nonexistent"));
    }

    #[test]
    fn test_keys_in_display_order() {
        let registry = ThemeRegistry::builtin();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(
            keys,
            vec!["midnight", "crimson", "emerald", "aurora", "solar", "midnight-wide"]
        );
    }

    #[test]
    fn test_from_themes_rejects_empty() {
        assert_eq!(
            ThemeRegistry::from_themes(Vec::new()).unwrap_err(),
            RegistryError::Empty
        );
    }

    #[test]
    fn test_from_themes_rejects_duplicates() {
        let err = ThemeRegistry::from_themes(vec![MIDNIGHT, CRIMSON, MIDNIGHT]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey("midnight".to_string()));
    }

    #[test]
    fn test_from_themes_rejects_invalid() {
        let mut broken = SOLAR.clone();
        broken.avatar.fallback = Cow::Borrowed("");
        let err = ThemeRegistry::from_themes(vec![MIDNIGHT, broken]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTheme { .. }));
    }

    #[test]
    fn test_with_custom_appends() {
        let mut custom = CRIMSON.clone();
        custom.key = Cow::Borrowed("rose");
        custom.display_name = Cow::Borrowed("Rose");
        let registry = ThemeRegistry::with_custom(vec![custom]).unwrap();
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.keys().last(), Some("rose"));
    }

    #[test]
    fn test_with_custom_rejects_oversized_glow() {
        let mut wide_glow = MIDNIGHT.clone();
        wide_glow.key = Cow::Borrowed("flare");
        wide_glow.gradients.glow_overlay.radius = 40_000;
        let err = ThemeRegistry::with_custom(vec![wide_glow]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTheme { ref key, .. } if key == "flare"));
    }

    #[test]
    fn test_with_custom_cannot_shadow_builtin() {
        let err = ThemeRegistry::with_custom(vec![CRIMSON]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey("crimson".to_string()));
    }

    #[test]
    fn test_next_prev_wrap() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.next_key("midnight").unwrap(), "crimson");
        assert_eq!(registry.next_key("midnight-wide").unwrap(), "midnight");
        assert_eq!(registry.prev_key("midnight").unwrap(), "midnight-wide");
        assert_eq!(registry.prev_key("crimson").unwrap(), "midnight");
        assert!(registry.next_key("ghost").is_err());
    }

    proptest! {
        #[test]
        fn prop_every_advertised_key_resolves(index in 0usize..6) {
            let registry = ThemeRegistry::builtin();
            let key = registry.keys().nth(index).unwrap().to_string();
            let theme = registry.lookup(&key).unwrap();
            prop_assert_eq!(theme.key.as_ref(), key.as_str());
            prop_assert!(theme.validate().is_ok());
        }

        #[test]
        fn prop_unknown_names_never_resolve(name in "[a-z]{1,12}") {
            let registry = ThemeRegistry::builtin();
            let advertised = registry.keys().any(|k| k == name);
            prop_assert_eq!(registry.lookup(&name).is_ok(), advertised);
        }
    }
}
