//! Tokenlens — terminal viewer for token activation traces.
//!
//! The `view` module is a pure display-state engine: it turns
//! (tokens, activations, options, expanded) into a renderable unit list.
//! The `tui` module owns interaction state (hover, expand) and renders
//! through ratatui. `trace` handles ingestion and validation.

pub mod trace;
pub mod tui;
pub mod view;
