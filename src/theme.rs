//! Theme records for showreel
//!
//! A theme is an immutable bundle of palette, gradient, avatar and layout
//! attributes. Built-in themes are `const` values; user themes come from the
//! configuration file and go through the same validation.
//! Themes include Midnight (default), Crimson, Emerald, Aurora, Solar and
//! Midnight Wide.

use crate::color;
use crate::error::RegistryError;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// ==================== Palette ====================

/// The small set of colors every themed layer draws from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Main brand color (borders, key hints)
    pub primary: Color,
    /// Supporting color (taglines, secondary text)
    pub secondary: Color,
    /// Halo and shadow color
    pub glow: Color,
}

// ==================== Gradients ====================

/// Axis a gradient runs along
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    /// Top to bottom
    #[default]
    Vertical,
    /// Left to right
    Horizontal,
    /// Top-left to bottom-right
    Diagonal,
}

/// Two or three stop gradient
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: Color,
    #[serde(default)]
    pub via: Option<Color>,
    pub to: Color,
    #[serde(default)]
    pub direction: GradientDirection,
}

impl Gradient {
    /// Color at position `t` in `0.0..=1.0`
    pub fn color_at(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        match self.via {
            Some(via) if t < 0.5 => color::mix(self.from, via, t * 2.0),
            Some(via) => color::mix(via, self.to, (t - 0.5) * 2.0),
            None => color::mix(self.from, self.to, t),
        }
    }

    /// Gradient position of cell `(x, y)` inside a `width` x `height` area
    pub fn position(&self, x: u16, y: u16, width: u16, height: u16) -> f32 {
        let fx = if width > 1 { x as f32 / (width - 1) as f32 } else { 0.0 };
        let fy = if height > 1 { y as f32 / (height - 1) as f32 } else { 0.0 };
        match self.direction {
            GradientDirection::Vertical => fy,
            GradientDirection::Horizontal => fx,
            GradientDirection::Diagonal => (fx + fy) / 2.0,
        }
    }
}

/// Halo drawn around the avatar
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlowOverlay {
    pub color: Color,
    /// Ring thickness in cells
    pub radius: u16,
    /// Blend strength against the background, `0.0..=1.0`
    pub intensity: f32,
}

/// Pre-composed gradient descriptors consumed by the view layers
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientSet {
    /// Full-frame background
    pub background: Gradient,
    /// Heading text color
    pub accent: Color,
    pub glow_overlay: GlowOverlay,
}

// ==================== Avatar ====================

/// Avatar asset reference plus the art used when it cannot be resolved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvatarAsset {
    /// Opaque reference handed to an `AvatarSource`
    pub path: Cow<'static, str>,
    /// Newline separated glyph art
    pub fallback: Cow<'static, str>,
}

impl AvatarAsset {
    pub fn fallback_lines(&self) -> Vec<String> {
        self.fallback.lines().map(str::to_string).collect()
    }
}

/// Avatar box size and anchor offsets, in cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarLayout {
    pub max_width: u16,
    pub max_height: u16,
    /// Horizontal shift from the anchor (center of the avatar column)
    #[serde(default)]
    pub offset_x: i16,
    /// Vertical shift from the anchor
    #[serde(default)]
    pub offset_y: i16,
}

// ==================== Theme ====================

/// Complete theme definition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Unique registry key
    pub key: Cow<'static, str>,
    pub display_name: Cow<'static, str>,
    #[serde(default)]
    pub description: Cow<'static, str>,
    pub palette: Palette,
    /// Glyph shown beside the heading and in the picker
    pub icon: Cow<'static, str>,
    pub gradients: GradientSet,
    pub avatar: AvatarAsset,
    pub layout: AvatarLayout,
}

impl Theme {
    /// Check that every attribute the view layers read is present and in range
    pub fn validate(&self) -> Result<(), RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidTheme {
            key: self.key.to_string(),
            reason: reason.to_string(),
        };

        if self.key.trim().is_empty() {
            return Err(invalid("key is empty"));
        }
        if self.key.chars().any(|c| c.is_whitespace() || c.is_ascii_uppercase()) {
            return Err(invalid("key must be lowercase without whitespace"));
        }
        if self.display_name.trim().is_empty() {
            return Err(invalid("display name is empty"));
        }
        if self.icon.trim().is_empty() {
            return Err(invalid("icon is empty"));
        }
        if self.avatar.path.trim().is_empty() {
            return Err(invalid("avatar path is empty"));
        }
        if self.avatar.fallback.trim().is_empty() {
            return Err(invalid("avatar fallback art is empty"));
        }
        if self.layout.max_width == 0 || self.layout.max_height == 0 {
            return Err(invalid("avatar box must be at least 1x1"));
        }
        let glow = &self.gradients.glow_overlay;
        if glow.radius == 0 || glow.radius > MAX_GLOW_RADIUS {
            return Err(invalid("glow radius must be within 1..=64"));
        }
        if !(0.0..=1.0).contains(&glow.intensity) {
            return Err(invalid("glow intensity must be within 0.0..=1.0"));
        }
        Ok(())
    }

    /// Base background color (first gradient stop)
    pub fn background(&self) -> Color {
        self.gradients.background.from
    }

    // ==================== Style Methods ====================

    /// Style for the hero heading
    pub fn style_heading(&self) -> Style {
        Style::default()
            .fg(self.gradients.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the tagline under the heading
    pub fn style_tagline(&self) -> Style {
        Style::default().fg(self.palette.secondary)
    }

    /// Style for glow accents
    pub fn style_glow(&self) -> Style {
        Style::default().fg(self.palette.glow)
    }

    /// Style for borders
    pub fn style_border(&self) -> Style {
        Style::default().fg(self.palette.primary)
    }

    /// Style for key bindings
    pub fn style_key(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for muted text
    pub fn style_muted(&self) -> Style {
        Style::default().fg(color::dim(self.palette.secondary, 0.6))
    }

    /// Style for selected/highlighted items
    pub fn style_selected(&self) -> Style {
        Style::default()
            .fg(self.background())
            .bg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for dialog background
    pub fn style_dialog_bg(&self) -> Style {
        Style::default().bg(self.background())
    }
}

// ==================== Theme Definitions ====================

/// Default avatar art, an 11x6 portrait
pub const PORTRAIT_ART: &str = r#"   .----.
  / .  . \
 |   __   |
 |  \__/  |
  \      /
   '----'"#;

const MIDNIGHT_PALETTE: Palette = Palette {
    primary: Color::Rgb(99, 102, 241),
    secondary: Color::Rgb(148, 163, 184),
    glow: Color::Rgb(129, 140, 248),
};

const MIDNIGHT_GRADIENTS: GradientSet = GradientSet {
    background: Gradient {
        from: Color::Rgb(2, 6, 23),
        via: Some(Color::Rgb(30, 27, 75)),
        to: Color::Rgb(15, 23, 42),
        direction: GradientDirection::Vertical,
    },
    accent: Color::Rgb(165, 180, 252),
    glow_overlay: GlowOverlay {
        color: Color::Rgb(99, 102, 241),
        radius: 2,
        intensity: 0.6,
    },
};

/// Largest glow halo radius a theme may ask for, in cells
pub const MAX_GLOW_RADIUS: u16 = 64;

/// Midnight theme - deep indigo night sky (default)
pub const MIDNIGHT: Theme = Theme {
    key: Cow::Borrowed("midnight"),
    display_name: Cow::Borrowed("Midnight"),
    description: Cow::Borrowed("Deep indigo with a soft violet glow"),
    palette: MIDNIGHT_PALETTE,
    icon: Cow::Borrowed("☾"),
    gradients: MIDNIGHT_GRADIENTS,
    avatar: AvatarAsset {
        path: Cow::Borrowed("assets/avatars/midnight.txt"),
        fallback: Cow::Borrowed(PORTRAIT_ART),
    },
    layout: AvatarLayout {
        max_width: 24,
        max_height: 12,
        offset_x: 0,
        offset_y: 0,
    },
};

/// Crimson theme - dark red with a hot rose halo
pub const CRIMSON: Theme = Theme {
    key: Cow::Borrowed("crimson"),
    display_name: Cow::Borrowed("Crimson"),
    description: Cow::Borrowed("Ember reds on a smouldering backdrop"),
    palette: Palette {
        primary: Color::Rgb(220, 38, 38),
        secondary: Color::Rgb(254, 202, 202),
        glow: Color::Rgb(248, 113, 113),
    },
    icon: Cow::Borrowed("✦"),
    gradients: GradientSet {
        background: Gradient {
            from: Color::Rgb(24, 4, 8),
            via: Some(Color::Rgb(69, 10, 10)),
            to: Color::Rgb(127, 29, 29),
            direction: GradientDirection::Diagonal,
        },
        accent: Color::Rgb(252, 165, 165),
        glow_overlay: GlowOverlay {
            color: Color::Rgb(239, 68, 68),
            radius: 2,
            intensity: 0.7,
        },
    },
    avatar: AvatarAsset {
        path: Cow::Borrowed("assets/avatars/crimson.txt"),
        fallback: Cow::Borrowed(PORTRAIT_ART),
    },
    layout: AvatarLayout {
        max_width: 22,
        max_height: 11,
        offset_x: 2,
        offset_y: -1,
    },
};

/// Emerald theme - forest greens
pub const EMERALD: Theme = Theme {
    key: Cow::Borrowed("emerald"),
    display_name: Cow::Borrowed("Emerald"),
    description: Cow::Borrowed("Calm forest greens"),
    palette: Palette {
        primary: Color::Rgb(16, 185, 129),
        secondary: Color::Rgb(167, 243, 208),
        glow: Color::Rgb(52, 211, 153),
    },
    icon: Cow::Borrowed("❖"),
    gradients: GradientSet {
        background: Gradient {
            from: Color::Rgb(2, 20, 14),
            via: None,
            to: Color::Rgb(6, 78, 59),
            direction: GradientDirection::Vertical,
        },
        accent: Color::Rgb(110, 231, 183),
        glow_overlay: GlowOverlay {
            color: Color::Rgb(16, 185, 129),
            radius: 1,
            intensity: 0.5,
        },
    },
    avatar: AvatarAsset {
        path: Cow::Borrowed("assets/avatars/emerald.txt"),
        fallback: Cow::Borrowed(PORTRAIT_ART),
    },
    layout: AvatarLayout {
        max_width: 26,
        max_height: 12,
        offset_x: -2,
        offset_y: 0,
    },
};

/// Aurora theme - teal and violet northern lights
pub const AURORA: Theme = Theme {
    key: Cow::Borrowed("aurora"),
    display_name: Cow::Borrowed("Aurora"),
    description: Cow::Borrowed("Teal and violet northern lights"),
    palette: Palette {
        primary: Color::Rgb(45, 212, 191),
        secondary: Color::Rgb(196, 181, 253),
        glow: Color::Rgb(94, 234, 212),
    },
    icon: Cow::Borrowed("✧"),
    gradients: GradientSet {
        background: Gradient {
            from: Color::Rgb(8, 12, 36),
            via: Some(Color::Rgb(30, 58, 95)),
            to: Color::Rgb(46, 16, 101),
            direction: GradientDirection::Horizontal,
        },
        accent: Color::Rgb(153, 246, 228),
        glow_overlay: GlowOverlay {
            color: Color::Rgb(94, 234, 212),
            radius: 3,
            intensity: 0.45,
        },
    },
    avatar: AvatarAsset {
        path: Cow::Borrowed("assets/avatars/aurora.txt"),
        fallback: Cow::Borrowed(PORTRAIT_ART),
    },
    layout: AvatarLayout {
        max_width: 24,
        max_height: 13,
        offset_x: 0,
        offset_y: 1,
    },
};

/// Solar theme - amber daylight
pub const SOLAR: Theme = Theme {
    key: Cow::Borrowed("solar"),
    display_name: Cow::Borrowed("Solar"),
    description: Cow::Borrowed("Warm amber daylight"),
    palette: Palette {
        primary: Color::Rgb(245, 158, 11),
        secondary: Color::Rgb(254, 243, 199),
        glow: Color::Rgb(251, 191, 36),
    },
    icon: Cow::Borrowed("☀"),
    gradients: GradientSet {
        background: Gradient {
            from: Color::Rgb(28, 16, 2),
            via: Some(Color::Rgb(120, 53, 15)),
            to: Color::Rgb(180, 83, 9),
            direction: GradientDirection::Vertical,
        },
        accent: Color::Rgb(253, 230, 138),
        glow_overlay: GlowOverlay {
            color: Color::Rgb(251, 191, 36),
            radius: 2,
            intensity: 0.8,
        },
    },
    avatar: AvatarAsset {
        path: Cow::Borrowed("assets/avatars/solar.txt"),
        fallback: Cow::Borrowed(PORTRAIT_ART),
    },
    layout: AvatarLayout {
        max_width: 20,
        max_height: 10,
        offset_x: 3,
        offset_y: 0,
    },
};

/// Midnight Wide - Midnight with a larger, shifted avatar box
pub const MIDNIGHT_WIDE: Theme = Theme {
    key: Cow::Borrowed("midnight-wide"),
    display_name: Cow::Borrowed("Midnight Wide"),
    description: Cow::Borrowed("Deep indigo with a soft violet glow"),
    palette: MIDNIGHT_PALETTE,
    icon: Cow::Borrowed("☾"),
    gradients: MIDNIGHT_GRADIENTS,
    avatar: AvatarAsset {
        path: Cow::Borrowed("assets/avatars/midnight.txt"),
        fallback: Cow::Borrowed(PORTRAIT_ART),
    },
    layout: AvatarLayout {
        max_width: 34,
        max_height: 14,
        offset_x: -4,
        offset_y: 1,
    },
};

/// Built-in themes in picker order
pub const BUILTIN_THEMES: &[Theme] = &[MIDNIGHT, CRIMSON, EMERALD, AURORA, SOLAR, MIDNIGHT_WIDE];

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes_validate() {
        for theme in BUILTIN_THEMES {
            assert!(theme.validate().is_ok(), "{} failed validation", theme.key);
        }
    }

    #[test]
    fn test_builtin_keys_unique() {
        let mut keys: Vec<&str> = BUILTIN_THEMES.iter().map(|t| t.key.as_ref()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), BUILTIN_THEMES.len());
    }

    #[test]
    fn test_midnight_wide_differs_only_by_layout() {
        let mut wide = MIDNIGHT_WIDE.clone();
        assert_ne!(wide.layout, MIDNIGHT.layout);
        wide.key = MIDNIGHT.key.clone();
        wide.display_name = MIDNIGHT.display_name.clone();
        wide.layout = MIDNIGHT.layout;
        assert_eq!(wide, MIDNIGHT);
    }

    #[test]
    fn test_validate_rejects_empty_icon() {
        let mut theme = CRIMSON.clone();
        theme.icon = Cow::Borrowed("  ");
        let err = theme.validate().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTheme { ref key, .. } if key == "crimson"));
    }

    #[test]
    fn test_validate_rejects_zero_avatar_box() {
        let mut theme = SOLAR.clone();
        theme.layout.max_height = 0;
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_glow_intensity_out_of_range() {
        let mut theme = AURORA.clone();
        theme.gradients.glow_overlay.intensity = 1.5;
        assert!(theme.validate().is_err());
        theme.gradients.glow_overlay.intensity = f32::NAN;
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_glow_radius() {
        let mut theme = MIDNIGHT.clone();
        theme.gradients.glow_overlay.radius = MAX_GLOW_RADIUS;
        assert!(theme.validate().is_ok());
        theme.gradients.glow_overlay.radius = MAX_GLOW_RADIUS + 1;
        assert!(theme.validate().is_err());
        theme.gradients.glow_overlay.radius = 40_000;
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_uppercase_key() {
        let mut theme = EMERALD.clone();
        theme.key = Cow::Borrowed("Emerald");
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_gradient_two_stop() {
        let g = EMERALD.gradients.background;
        assert_eq!(g.color_at(0.0), g.from);
        assert_eq!(g.color_at(1.0), g.to);
    }

    #[test]
    fn test_gradient_three_stop_midpoint_is_via() {
        let g = MIDNIGHT.gradients.background;
        assert_eq!(g.color_at(0.5), Color::Rgb(30, 27, 75));
    }

    #[test]
    fn test_gradient_position_by_direction() {
        let mut g = MIDNIGHT.gradients.background;
        assert_eq!(g.position(3, 9, 10, 10), 1.0);
        g.direction = GradientDirection::Horizontal;
        assert_eq!(g.position(9, 0, 10, 10), 1.0);
        g.direction = GradientDirection::Diagonal;
        assert_eq!(g.position(9, 0, 10, 10), 0.5);
        assert_eq!(g.position(0, 0, 1, 1), 0.0);
    }

    #[test]
    fn test_fallback_lines() {
        let lines = MIDNIGHT.avatar.fallback_lines();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
    }

    #[test]
    fn test_style_constructors() {
        let t = &MIDNIGHT;
        assert_eq!(t.style_heading().fg, Some(t.gradients.accent));
        assert_eq!(t.style_border().fg, Some(t.palette.primary));
        assert_eq!(t.style_glow().fg, Some(t.palette.glow));
        assert_eq!(t.style_selected().bg, Some(t.palette.primary));
        assert_eq!(t.style_selected().fg, Some(t.background()));
        assert_eq!(t.style_tagline().fg, Some(t.palette.secondary));
        assert_eq!(t.style_key().fg, Some(t.palette.primary));
        assert!(t.style_key().add_modifier.contains(Modifier::BOLD));
        assert_eq!(t.style_muted().fg, Some(color::dim(t.palette.secondary, 0.6)));
        assert_ne!(t.style_muted().fg, t.style_tagline().fg);
        assert_eq!(t.style_dialog_bg().bg, Some(t.background()));
        assert_eq!(t.style_dialog_bg().fg, None);
    }

    #[test]
    fn test_theme_toml_roundtrip_preserves_colors() {
        let text = toml::to_string(&CRIMSON).unwrap();
        let parsed: Theme = toml::from_str(&text).unwrap();
        assert_eq!(parsed.palette, CRIMSON.palette);
        assert_eq!(parsed.layout, CRIMSON.layout);
    }
}
