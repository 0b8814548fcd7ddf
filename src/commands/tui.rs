//! TUI command implementation

use crate::app::App;
use crate::tui::{handle_key, ui};
use anyhow::{Context, Result};
use crossterm::{
    cursor::Hide,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use showreel::{Config, debug};
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

/// Rows taken by the footer
const FOOTER_ROWS: u16 = 1;

fn scene_area(cols: u16, rows: u16) -> Rect {
    Rect::new(0, 0, cols, rows.saturating_sub(FOOTER_ROWS))
}

static PANIC_HOOK: OnceLock<()> = OnceLock::new();

/// Leave raw mode and the alternate screen before a panic message is printed
fn install_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
    });
}

/// Best-effort terminal reset, safe to call when nothing was set up
fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = disable_raw_mode();
    let _ = execute!(stdout, crossterm::cursor::Show, LeaveAlternateScreen);
    let _ = stdout.flush();
}

/// Run the TUI application
pub fn run_tui(config: Config) -> Result<()> {
    debug::init();

    // Get terminal size
    let (cols, rows) = terminal::size().context("Failed to get terminal size")?;
    let frame_interval = config.frame_interval();

    // Build the app before touching the terminal so config errors print normally
    let mut app = App::new(config, scene_area(cols, rows))?;

    // Setup terminal
    install_panic_hook();
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    execute!(stdout, crossterm::terminal::SetTitle("showreel"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, frame_interval);

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        crossterm::cursor::Show,
        LeaveAlternateScreen
    )?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    frame_interval: std::time::Duration,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        // Draw
        terminal.draw(|f| ui(f, app))?;

        // Poll events until the next frame is due
        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug::log(&format!("KEY_EVENT: {:?}, mode={:?}", key.code, app.mode));
                    handle_key(app, key.modifiers, key.code);
                }
                Event::Resize(new_cols, new_rows) => {
                    app.resize(scene_area(new_cols, new_rows));
                }
                _ => {}
            }
        }

        // Advance by the real time since the previous update
        let now = Instant::now();
        app.update(now.duration_since(last_frame));
        last_frame = now;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
