//! Hero heading: icon, headline, glow rule and tagline

use super::{AnimationTiming, LayerAnimation, ThemedLayer, hero_areas};
use crate::color;
use crate::store::ThemeChange;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Text shown in the hero heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroCopy {
    pub headline: String,
    pub tagline: String,
}

impl Default for HeroCopy {
    fn default() -> Self {
        Self {
            headline: "Hi, I build things for the web".to_string(),
            tagline: "Full-stack developer · open source · motion design".to_string(),
        }
    }
}

/// Heading block drawn in the theme's accent and glow colors
///
/// The entrance types the text in while sliding up into place; the exit
/// erases it.
pub struct HeroHeading {
    copy: HeroCopy,
    animation: LayerAnimation,
}

impl HeroHeading {
    pub fn new(copy: HeroCopy, timing: AnimationTiming) -> Self {
        Self {
            copy,
            animation: timing.animation(),
        }
    }

    pub fn copy(&self) -> &HeroCopy {
        &self.copy
    }

    fn lines(&self, theme: &Theme, width: u16) -> Vec<Line<'static>> {
        let shown = self.animation.visibility();
        let headline = format!("{} {}", theme.icon, self.copy.headline);
        let rule_len = headline.chars().count().min(width as usize);

        vec![
            Line::from(Span::styled(reveal(&headline, shown), theme.style_heading())),
            Line::from(Span::styled(
                reveal(&"━".repeat(rule_len), shown),
                theme.style_glow(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                reveal(&self.copy.tagline, shown),
                theme.style_tagline(),
            )),
        ]
    }
}

/// Rows below the resting position where the entrance starts
const SLIDE_ROWS: u16 = 2;

/// Leading share of `text`, by characters
fn reveal(text: &str, shown: f32) -> String {
    let total = text.chars().count();
    let count = (total as f32 * shown.clamp(0.0, 1.0)).ceil() as usize;
    text.chars().take(count).collect()
}

impl ThemedLayer for HeroHeading {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn on_theme_change(&mut self, change: &ThemeChange, theme: &Theme) {
        self.animation.trigger(change, theme);
    }

    fn tick(&mut self, dt: Duration) {
        self.animation.tick(dt);
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let theme = self.animation.frame_theme(theme);
        let column = hero_areas(area).heading;
        let lines = self.lines(theme, column.width);
        let height = (lines.len() as u16).min(column.height);
        let spare = column.height.saturating_sub(height);
        let slide = ((1.0 - self.animation.visibility()) * SLIDE_ROWS as f32).round() as u16;
        let block = Rect::new(
            column.x,
            column.y + (spare / 2 + slide).min(spare),
            column.width,
            height,
        );

        // Soft glow band behind the headline
        let glow = theme.gradients.glow_overlay.color;
        let strength = 0.12 * self.animation.visibility();
        for x in block.left()..block.right() {
            if let Some(cell) = buf.cell_mut((x, block.y)) {
                cell.set_bg(color::mix(cell.bg, glow, strength));
            }
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(block, buf);
    }

    fn triggers(&self) -> u64 {
        self.animation.triggers()
    }
}
