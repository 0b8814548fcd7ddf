//! Full-screen curtain drawn over everything during a transition

use crate::color;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

pub const DEFAULT_CURTAIN_COLOR: Color = Color::Rgb(0, 0, 0);

/// Curtain at a given opacity
///
/// At `1.0` every cell is blanked to the curtain color, so nothing of the
/// scene underneath is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurtainOverlay {
    pub opacity: f32,
    pub color: Color,
}

impl CurtainOverlay {
    pub fn new(opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            color: DEFAULT_CURTAIN_COLOR,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for CurtainOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity <= 0.0 {
            return;
        }
        let area = area.intersection(buf.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };
                if self.opacity >= 1.0 {
                    cell.reset();
                    cell.set_fg(self.color).set_bg(self.color);
                } else {
                    let fg = color::mix(cell.fg, self.color, self.opacity);
                    let bg = color::mix(cell.bg, self.color, self.opacity);
                    cell.set_fg(fg).set_bg(bg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Buffer {
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        buf.set_string(
            0,
            0,
            "scene!",
            ratatui::style::Style::default()
                .fg(Color::Rgb(200, 200, 200))
                .bg(Color::Rgb(100, 0, 0)),
        );
        buf
    }

    #[test]
    fn test_opaque_curtain_hides_everything() {
        let mut buf = scene();
        let area = buf.area;
        CurtainOverlay::new(1.0).render(area, &mut buf);
        for y in 0..2 {
            for x in 0..6 {
                let cell = &buf[(x, y)];
                assert_eq!(cell.symbol(), " ");
                assert_eq!(cell.bg, DEFAULT_CURTAIN_COLOR);
                assert_eq!(cell.fg, DEFAULT_CURTAIN_COLOR);
            }
        }
    }

    #[test]
    fn test_clear_curtain_is_noop() {
        let mut buf = scene();
        let area = buf.area;
        CurtainOverlay::new(0.0).render(area, &mut buf);
        assert_eq!(buf, scene());
    }

    #[test]
    fn test_partial_curtain_darkens_but_keeps_symbols() {
        let mut buf = scene();
        let area = buf.area;
        CurtainOverlay::new(0.5).render(area, &mut buf);
        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "s");
        assert_eq!(cell.bg, Color::Rgb(50, 0, 0));
        assert_eq!(cell.fg, Color::Rgb(100, 100, 100));
    }

    #[test]
    fn test_custom_color_and_clamp() {
        let curtain = CurtainOverlay::new(3.0).color(Color::Rgb(10, 10, 30));
        assert_eq!(curtain.opacity, 1.0);
        let mut buf = scene();
        let area = buf.area;
        curtain.render(area, &mut buf);
        assert_eq!(buf[(5, 1)].bg, Color::Rgb(10, 10, 30));
    }
}
