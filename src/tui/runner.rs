//! Viewer runner — terminal lifecycle and the main event loop.
//!
//! Creates the terminal, enables mouse capture, runs the TEA loop:
//! - crossterm keyboard/mouse events (polled via `spawn_blocking`)
//! - tick interval (4Hz — refresh the external selection)
//! - render interval (~30fps — draw frame)

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::interval;

use super::app::ViewerApp;
use super::event::ViewerMessage;
use super::layout;

/// Selection shared between token actions and the embedding application.
/// The runner feeds it back into the app as the highlighted token.
pub type SelectionCell = Arc<Mutex<Option<usize>>>;

/// Refresh the externally owned selection into the app (brief lock).
pub fn refresh_selection(app: &mut ViewerApp, selection: &SelectionCell) {
    if let Ok(guard) = selection.lock() {
        app.highlight_token = *guard;
    }
}

/// Run the viewer main loop. Blocks until quit.
pub async fn run_viewer(
    app: &mut ViewerApp,
    selection: Option<SelectionCell>,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut tick_interval = interval(Duration::from_millis(250)); // 4Hz
    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                if let Some(selection) = &selection {
                    refresh_selection(app, selection);
                }
            }
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, app))?;
            }
            // Poll crossterm events (non-blocking via tokio::task::spawn_blocking)
            result = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            }) => {
                match result {
                    Ok(Some(Event::Key(key))) => app.update(ViewerMessage::Key(key)),
                    Ok(Some(Event::Mouse(mouse))) => app.update(ViewerMessage::Mouse(mouse)),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    io::stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
