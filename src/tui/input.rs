//! Key and mouse dispatch for the viewer.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::app::ViewerApp;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut ViewerApp, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.toggle_expand();
        }
        _ => {}
    }
}

/// Handle a mouse event: hover tracking and click dispatch.
pub fn handle_mouse(app: &mut ViewerApp, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => {
            app.hover_at(mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.click_at(mouse.column, mouse.row);
        }
        _ => {}
    }
}
