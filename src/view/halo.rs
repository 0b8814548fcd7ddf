//! Glow halo around the avatar frame

use super::{AnimationTiming, LayerAnimation, ThemedLayer, avatar_rect, hero_areas};
use crate::color;
use crate::store::ThemeChange;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::time::Duration;

/// Tints the cells around the avatar box toward the theme glow color
pub struct GlowHalo {
    animation: LayerAnimation,
}

impl GlowHalo {
    pub fn new(timing: AnimationTiming) -> Self {
        Self {
            animation: timing.animation(),
        }
    }
}

/// Chebyshev distance from `(x, y)` to the outside edge of `rect`
///
/// Zero for cells inside the rect.
fn distance_to(rect: Rect, x: u16, y: u16) -> u16 {
    let dx = rect.left().saturating_sub(x).max(x.saturating_sub(rect.right().saturating_sub(1)));
    let dy = rect.top().saturating_sub(y).max(y.saturating_sub(rect.bottom().saturating_sub(1)));
    dx.max(dy)
}

impl ThemedLayer for GlowHalo {
    fn name(&self) -> &'static str {
        "halo"
    }

    fn on_theme_change(&mut self, change: &ThemeChange, theme: &Theme) {
        self.animation.trigger(change, theme);
    }

    fn tick(&mut self, dt: Duration) {
        self.animation.tick(dt);
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let theme = self.animation.frame_theme(theme);
        let overlay = &theme.gradients.glow_overlay;
        let strength = overlay.intensity * self.animation.visibility();
        if strength <= 0.0 || overlay.radius == 0 {
            return;
        }

        let frame = avatar_rect(hero_areas(area).avatar, &theme.layout);
        let reach = overlay.radius.saturating_mul(2);
        let halo = Rect::new(
            frame.x.saturating_sub(overlay.radius),
            frame.y.saturating_sub(overlay.radius),
            frame.width.saturating_add(reach),
            frame.height.saturating_add(reach),
        )
        .intersection(area);

        for y in halo.top()..halo.bottom() {
            for x in halo.left()..halo.right() {
                let d = distance_to(frame, x, y);
                if d == 0 || d > overlay.radius {
                    continue;
                }
                let falloff = 1.0 - (d - 1) as f32 / overlay.radius as f32;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(color::mix(cell.bg, overlay.color, strength * falloff));
                }
            }
        }
    }

    fn triggers(&self) -> u64 {
        self.animation.triggers()
    }
}
