//! Ratatui presentation layer for token traces.
//!
//! ## Architecture (TEA)
//!
//! Model (`ViewerApp`) + Update (message handler) + View (render). The
//! display window is derived state: recomputed by a pure function on
//! input/option/expansion changes, never mutated during rendering. Hit
//! boxes flow the other way — cached at draw time, consumed by the mouse
//! dispatcher on the next event.

pub mod app;
pub mod event;
pub mod flow;
pub mod input;
pub mod layout;
pub mod runner;
