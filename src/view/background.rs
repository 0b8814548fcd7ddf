//! Full-frame gradient background

use super::{AnimationTiming, LayerAnimation, ThemedLayer};
use crate::color;
use crate::store::ThemeChange;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::time::Duration;

/// Paints the theme's background gradient behind everything else
///
/// On entrance the gradient blooms out of the base color.
pub struct BackgroundLayer {
    animation: LayerAnimation,
}

impl BackgroundLayer {
    pub fn new(timing: AnimationTiming) -> Self {
        Self {
            animation: timing.animation(),
        }
    }

    pub fn animation(&self) -> &LayerAnimation {
        &self.animation
    }
}

impl ThemedLayer for BackgroundLayer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn on_theme_change(&mut self, change: &ThemeChange, theme: &Theme) {
        self.animation.trigger(change, theme);
    }

    fn tick(&mut self, dt: Duration) {
        self.animation.tick(dt);
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let theme = self.animation.frame_theme(theme);
        let gradient = &theme.gradients.background;
        let base = theme.background();
        let bloom = self.animation.visibility();

        for y in 0..area.height {
            for x in 0..area.width {
                let t = gradient.position(x, y, area.width, area.height);
                let bg = color::mix(base, gradient.color_at(t), bloom);
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.reset();
                    cell.set_bg(bg);
                }
            }
        }
    }

    fn triggers(&self) -> u64 {
        self.animation.triggers()
    }
}
