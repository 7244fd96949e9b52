//! TUI messages — everything that drives the viewer update loop.
//!
//! Keyboard and mouse events arrive from crossterm; render is handled
//! externally by the runner. Each message is fully processed before the
//! next one is read, so state mutation and window re-derivation never
//! interleave.

use crossterm::event::{KeyEvent, MouseEvent};

/// Messages that drive the viewer update loop.
#[derive(Debug, Clone)]
pub enum ViewerMessage {
    /// Keyboard input.
    Key(KeyEvent),
    /// Mouse input: hover tracking and clicks.
    Mouse(MouseEvent),
    /// Render: draw a frame.
    Render,
    /// Quit the viewer.
    Quit,
}
