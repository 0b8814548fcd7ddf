//! TUI rendering functions

use crate::app::{App, AppMode, NotifyLevel};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use showreel::CurtainOverlay;
use showreel::transition::TransitionPhase;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Hero scene
            Constraint::Length(1), // Footer with key hints
        ])
        .split(f.area());

    render_scene(chunks[0], f.buffer_mut(), app);
    render_footer(f, app, chunks[1]);

    if app.mode == AppMode::ThemePicker {
        render_theme_picker(f, app, f.area());
    }

    if !app.notifications.is_empty() {
        render_notifications(f, app, f.area());
    }

    // Curtain goes over everything, footer and overlays included
    let area = f.area();
    render_curtain(area, f.buffer_mut(), app);
}

/// Themed layers and particles for the active theme
pub fn render_scene(area: Rect, buf: &mut Buffer, app: &App) {
    app.views.render(
        area,
        buf,
        app.store.current_theme(),
        app.particles.as_ref(),
    );
}

pub fn render_curtain(area: Rect, buf: &mut Buffer, app: &App) {
    CurtainOverlay::new(app.orchestrator.curtain_opacity())
        .color(app.config.transition.curtain_color)
        .render(area, buf);
}

/// Render footer with key hints and transition status
pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = app.store.current_theme();

    let mut left_spans: Vec<Span> = vec![
        Span::styled(format!(" {} ", t.icon), t.style_glow()),
        Span::styled(t.display_name.to_string(), t.style_key()),
    ];

    let phase = app.orchestrator.phase();
    if phase != TransitionPhase::Idle {
        left_spans.push(Span::styled(" | ", t.style_muted()));
        left_spans.push(Span::styled(format!("→ {} ({phase})", app.target), t.style_tagline()));
        let queued = app.orchestrator.queued_len();
        if queued > 0 {
            left_spans.push(Span::styled(format!(" +{queued} queued"), t.style_muted()));
        }
    }

    let right_spans: Vec<Span> = vec![
        Span::styled("n/p", t.style_key()),
        Span::styled(":switch ", t.style_muted()),
        Span::styled("t", t.style_key()),
        Span::styled(":themes ", t.style_muted()),
        Span::styled("q", t.style_key()),
        Span::styled(":quit ", t.style_muted()),
    ];

    // Calculate widths for left/right alignment
    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let available_width = area.width as usize;

    // Build final line with padding
    let mut spans = left_spans;
    let padding = available_width.saturating_sub(left_width + right_width);
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding)));
    }
    spans.extend(right_spans);

    let footer = Paragraph::new(Line::from(spans)).style(t.style_dialog_bg());
    f.render_widget(footer, area);
}

/// Render the theme picker modal
pub fn render_theme_picker(f: &mut Frame, app: &App, area: Rect) {
    let t = app.store.current_theme();
    let themes = app.store.registry().themes();

    // Calculate popup size
    let popup_width = 44u16;
    let popup_height = (themes.len() as u16) + 6; // blank + items + description + footer + borders

    // Center the popup
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    // Clear the popup area
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![Line::from("")];

    for (i, theme) in themes.iter().enumerate() {
        let is_selected = i == app.picker_index;
        let is_current = theme.key == app.store.current();

        let prefix = if is_selected { " > " } else { "   " };
        let suffix = if is_current { " ✓" } else { "" };

        let style = if is_selected {
            t.style_selected()
        } else if is_current {
            t.style_key()
        } else {
            t.style_tagline()
        };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{} {}", theme.icon, theme.display_name), style),
            Span::styled(suffix, t.style_glow()),
        ]));

        // Show description for selected item
        if is_selected && !theme.description.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("     "),
                Span::styled(theme.description.to_string(), t.style_muted()),
            ]));
        }
    }

    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled(" Enter", t.style_key()),
        Span::styled(": Apply  ", t.style_muted()),
        Span::styled("Space", t.style_key()),
        Span::styled(": Instant  ", t.style_muted()),
        Span::styled("Esc", t.style_key()),
        Span::styled(": Cancel", t.style_muted()),
    ]));

    let block = Block::default()
        .title(Span::styled(" Choose a theme ", t.style_heading()))
        .borders(Borders::ALL)
        .border_style(t.style_border())
        .style(t.style_dialog_bg());

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, popup_area);
}

/// Render notifications at the bottom of the screen
pub fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    let notification_count = app.notifications.len().min(3); // Show max 3 notifications
    if notification_count == 0 {
        return;
    }

    let height = notification_count as u16 + 2; // +2 for borders
    let notification_area = Rect {
        x: area.x + 2,
        y: area.height.saturating_sub(height + 1),
        width: area.width.saturating_sub(4).min(60),
        height,
    };

    let t = app.store.current_theme();
    let lines: Vec<Line> = app
        .notifications
        .iter()
        .rev()
        .take(3)
        .map(|n| {
            let color = match n.level {
                NotifyLevel::Info => t.palette.secondary,
                NotifyLevel::Warning => Color::Rgb(250, 204, 21),
                NotifyLevel::Error => Color::Rgb(248, 113, 113),
                NotifyLevel::Success => Color::Rgb(74, 222, 128),
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", n.icon()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(n.message.as_str()),
            ])
        })
        .collect();

    let notification_widget = Paragraph::new(lines).style(t.style_dialog_bg()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.style_border()),
    );

    f.render_widget(Clear, notification_area);
    f.render_widget(notification_widget, notification_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use showreel::Config;
    use std::time::Duration;

    fn app() -> App {
        let mut config = Config {
            avatar_dir: "/nonexistent".into(),
            ..Config::default()
        };
        config.particles.enabled = false;
        let mut app = App::new(config, Rect::new(0, 0, 80, 23)).unwrap();
        // Let the intro finish
        app.update(Duration::from_secs(2));
        app
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_idle_frame_shows_scene_and_footer() {
        let app = app();
        let buf = draw(&app);
        assert!(row(&buf, 23).contains("Midnight"));
        assert!(row(&buf, 23).contains("q:quit"));
        assert!((0..23).any(|y| row(&buf, y).contains(&app.config.hero.headline)));
    }

    #[test]
    fn test_opaque_curtain_covers_whole_frame() {
        let mut app = app();
        app.next_theme();
        app.update(Duration::from_millis(450));
        let buf = draw(&app);
        let black = app.config.transition.curtain_color;
        assert!(buf.content.iter().all(|c| c.symbol() == " " && c.bg == black));
    }

    #[test]
    fn test_footer_shows_pending_target() {
        let mut app = app();
        app.next_theme();
        app.update(Duration::from_millis(16));
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|f| render_footer(f, &app, f.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        assert!(row(buf, 0).contains("crimson (engaging)"));
    }

    #[test]
    fn test_picker_lists_every_theme() {
        let mut app = app();
        app.open_theme_picker();
        let buf = draw(&app);
        let text: String = (0..24).map(|y| row(&buf, y)).collect::<Vec<_>>().join("\n");
        for theme in app.store.registry().themes() {
            assert!(text.contains(theme.display_name.as_ref()), "{}", theme.key);
        }
    }
}
