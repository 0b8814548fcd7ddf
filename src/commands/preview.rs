//! Preview command implementation

use crate::app::App;
use crate::tui::render::render_scene;
use anyhow::{Result, bail};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use showreel::Config;

/// Run the preview command
pub fn run_preview(config: &Config, theme: &str, width: u16, height: u16) -> Result<()> {
    for line in preview_lines(config, theme, width, height)? {
        println!("{line}");
    }
    Ok(())
}

/// Settled frame of `theme` as plain text rows
pub fn preview_lines(config: &Config, theme: &str, width: u16, height: u16) -> Result<Vec<String>> {
    if width == 0 || height == 0 {
        bail!("Preview size must be at least 1x1");
    }

    let registry = config.registry()?;
    let key = registry.lookup(theme)?.key.to_string();
    let config = Config {
        default_theme: key,
        ..config.clone()
    };

    let area = Rect::new(0, 0, width, height);
    let mut app = App::new(config, area)?;
    // Play the intro to the end
    let timing = app.config.animation_timing();
    app.update(timing.exit + timing.entrance);

    let mut buf = Buffer::empty(area);
    render_scene(area, &mut buf, &app);
    Ok(buffer_lines(&buf))
}

fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
