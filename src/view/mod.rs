//! Display-state engine — pure functions from trace data to display units.
//!
//! Stage order on every recompute: normalize → threshold → window → units.
//! Interaction state (hover, expanded) lives in the TUI layer and is fed in
//! as plain inputs; nothing in this module mutates state.

pub mod normalize;
pub mod options;
pub mod unit;
pub mod window;

pub use normalize::{activation_threshold, normalize_activations, OPACITY_FLOOR};
pub use options::{OptionsError, Percentile, ViewOptions};
pub use unit::{DisplayUnit, UnitBody, NEUTRAL_OPACITY};
pub use window::{compute_display_window, peak_index, DisplayWindow, WINDOW_WIDTH};
