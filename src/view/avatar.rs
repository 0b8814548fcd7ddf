//! Avatar frame and the art sources behind it

use super::{AnimationTiming, LayerAnimation, ThemedLayer, avatar_rect, hero_areas, scale_rect};
use crate::debug_log;
use crate::store::ThemeChange;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Resolves an avatar reference to glyph art
#[cfg_attr(test, automock)]
pub trait AvatarSource {
    /// Art lines for `reference`, or `None` when it cannot be resolved
    fn load(&self, reference: &str) -> Option<Vec<String>>;
}

/// Reads avatar art from text files under a directory
#[derive(Debug, Clone)]
pub struct FileAvatarSource {
    root: PathBuf,
}

impl FileAvatarSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AvatarSource for FileAvatarSource {
    fn load(&self, reference: &str) -> Option<Vec<String>> {
        let path = self.root.join(reference);
        let content = fs::read_to_string(&path).ok()?;
        let lines: Vec<String> = content.lines().map(|l| l.trim_end().to_string()).collect();
        if lines.iter().all(|l| l.trim().is_empty()) {
            debug_log!("avatar {} is empty", path.display());
            return None;
        }
        Some(lines)
    }
}

/// Bordered avatar box positioned by the theme layout
///
/// The entrance grows the box out of its center.
pub struct AvatarFrame {
    source: Box<dyn AvatarSource>,
    art: Vec<String>,
    exit_art: Vec<String>,
    animation: LayerAnimation,
}

impl AvatarFrame {
    pub fn new(source: Box<dyn AvatarSource>, theme: &Theme, timing: AnimationTiming) -> Self {
        let art = resolve(source.as_ref(), theme);
        Self {
            source,
            art,
            exit_art: Vec::new(),
            animation: timing.animation(),
        }
    }

    pub fn art(&self) -> &[String] {
        &self.art
    }
}

fn resolve(source: &dyn AvatarSource, theme: &Theme) -> Vec<String> {
    source
        .load(&theme.avatar.path)
        .unwrap_or_else(|| theme.avatar.fallback_lines())
}

impl ThemedLayer for AvatarFrame {
    fn name(&self) -> &'static str {
        "avatar"
    }

    fn on_theme_change(&mut self, change: &ThemeChange, theme: &Theme) {
        if self.animation.trigger(change, theme) {
            let incoming = resolve(self.source.as_ref(), theme);
            self.exit_art = std::mem::replace(&mut self.art, incoming);
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.animation.tick(dt);
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let theme = self.animation.frame_theme(theme);
        let art = if self.animation.is_exiting() {
            &self.exit_art
        } else {
            &self.art
        };
        let column = hero_areas(area).avatar;
        let frame = scale_rect(avatar_rect(column, &theme.layout), self.animation.visibility());
        if frame.width < 2 || frame.height < 2 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.style_border());
        let inner = block.inner(frame);
        block.render(frame, buf);

        let art_height = (art.len() as u16).min(inner.height);
        let art_area = Rect::new(
            inner.x,
            inner.y + inner.height.saturating_sub(art_height) / 2,
            inner.width,
            art_height,
        );
        let lines: Vec<Line> = art.iter().map(|l| Line::raw(l.as_str())).collect();
        Paragraph::new(lines)
            .style(theme.style_glow())
            .alignment(Alignment::Center)
            .render(art_area, buf);
    }

    fn triggers(&self) -> u64 {
        self.animation.triggers()
    }
}
