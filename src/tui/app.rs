//! ViewerApp — the TEA model.
//!
//! All state lives here. Update receives ViewerMessages, mutates state.
//! View reads state to produce ratatui widgets. No side effects in view —
//! except the hit-box cache, which the renderer writes so the mouse
//! dispatcher can map cells back to units.

use ratatui::layout::{Position, Rect};

use crate::trace::TokenTrace;
use crate::view::{compute_display_window, DisplayUnit, DisplayWindow, ViewOptions};

use super::event::ViewerMessage;

/// Per-token click callback supplied by the embedding application.
pub type TokenAction = Box<dyn FnMut() + Send>;

/// A hoverable/clickable cell range from the last rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitBox {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    /// Index into the currently displayed unit list.
    pub unit: usize,
}

impl HitBox {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.y && column >= self.x && column < self.x.saturating_add(self.width)
    }
}

/// The viewer application state (TEA model).
pub struct ViewerApp {
    /// Input data.
    pub trace: TokenTrace,
    /// Viewer configuration.
    pub options: ViewOptions,
    /// Per-token click callbacks, index-aligned with the trace. A missing
    /// entry means the token is not clickable.
    pub actions: Vec<Option<TokenAction>>,
    /// Externally selected token, always drawn with the selected treatment.
    pub highlight_token: Option<usize>,
    /// Whether a collapsed shorthand view has been expanded.
    pub expanded: bool,
    /// Hovered index into the displayed unit list. Compared against the
    /// current list length at every use, so stale values self-discard when
    /// the window changes under it.
    pub hovered: Option<usize>,
    /// Derived display state. Recomputed via [`ViewerApp::recompute`] on
    /// trace/option/expansion changes, never mutated during rendering.
    pub window: DisplayWindow,
    /// Hit boxes from the last render (written by the renderer).
    pub hit_boxes: Vec<HitBox>,
    /// Expand/contract control cells from the last render, when shown.
    pub toggle_area: Option<Rect>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl ViewerApp {
    /// Create a viewer over a trace with the given options.
    pub fn new(trace: TokenTrace, options: ViewOptions) -> Self {
        let window = compute_display_window(
            &trace.tokens,
            trace.activations.as_deref(),
            options,
            false,
        );
        Self {
            trace,
            options,
            actions: Vec::new(),
            highlight_token: None,
            expanded: false,
            hovered: None,
            window,
            hit_boxes: Vec::new(),
            toggle_area: None,
            should_quit: false,
        }
    }

    /// Attach per-token click callbacks.
    pub fn with_actions(mut self, actions: Vec<Option<TokenAction>>) -> Self {
        self.actions = actions;
        self
    }

    /// Whether the current view is the collapsed shorthand window.
    pub fn collapsed(&self) -> bool {
        self.options.shorthand && !self.expanded
    }

    /// Re-derive the display window from current inputs.
    pub fn recompute(&mut self) {
        self.window = compute_display_window(
            &self.trace.tokens,
            self.trace.activations.as_deref(),
            self.options,
            self.expanded,
        );
    }

    /// Flip collapsed ↔ expanded. Meaningful only in shorthand mode; the
    /// single transition of the state machine.
    pub fn toggle_expand(&mut self) {
        if !self.options.shorthand {
            return;
        }
        self.expanded = !self.expanded;
        self.recompute();
        tracing::debug!(expanded = self.expanded, "view toggled");
    }

    /// The hovered unit, if the stored index is still valid for the
    /// currently displayed list.
    pub fn hovered_unit(&self) -> Option<(usize, &DisplayUnit)> {
        let index = self.hovered?;
        self.window.units.get(index).map(|unit| (index, unit))
    }

    /// Raw activation for a displayed unit, when one exists.
    pub fn raw_activation(&self, unit: &DisplayUnit) -> Option<f64> {
        let source = unit.source?;
        self.trace.activations.as_ref()?.get(source).copied()
    }

    /// Tooltip payload for the hovered unit: `(unit index, raw activation)`.
    ///
    /// Shown only outside collapsed shorthand, and only for a defined,
    /// non-zero activation.
    pub fn tooltip(&self) -> Option<(usize, f64)> {
        if self.collapsed() {
            return None;
        }
        let (index, unit) = self.hovered_unit()?;
        let raw = self.raw_activation(unit)?;
        if raw == 0.0 {
            return None;
        }
        Some((index, raw))
    }

    /// Maximum raw activation, for the collapsed summary control.
    pub fn max_activation(&self) -> Option<f64> {
        self.trace
            .activations
            .as_ref()?
            .iter()
            .copied()
            .reduce(f64::max)
    }

    /// Point the hover state at whatever unit sits under `(column, row)`.
    /// No unit there clears the hover — that is the pointer-leave.
    pub fn hover_at(&mut self, column: u16, row: u16) {
        self.hovered = self
            .hit_boxes
            .iter()
            .find(|hb| hb.contains(column, row))
            .map(|hb| hb.unit);
    }

    /// Dispatch a click at `(column, row)`: the expand control first, then
    /// the clicked token's action, if one is configured.
    pub fn click_at(&mut self, column: u16, row: u16) {
        if let Some(area) = self.toggle_area {
            if area.contains(Position::new(column, row)) {
                self.toggle_expand();
                return;
            }
        }
        let Some(unit) = self
            .hit_boxes
            .iter()
            .find(|hb| hb.contains(column, row))
            .map(|hb| hb.unit)
        else {
            return;
        };
        let Some(source) = self.window.units.get(unit).and_then(|u| u.source) else {
            return;
        };
        if let Some(Some(action)) = self.actions.get_mut(source) {
            tracing::debug!(token = source, "token action dispatched");
            action();
        }
    }

    /// Handle a viewer message (TEA update).
    pub fn update(&mut self, msg: ViewerMessage) {
        match msg {
            ViewerMessage::Key(key) => {
                super::input::handle_key(self, key);
            }
            ViewerMessage::Mouse(mouse) => {
                super::input::handle_mouse(self, mouse);
            }
            ViewerMessage::Render => {
                // Render handled externally by runner
            }
            ViewerMessage::Quit => {
                self.should_quit = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Percentile, NEUTRAL_OPACITY, WINDOW_WIDTH};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn trace(n: usize, peak: usize) -> TokenTrace {
        let tokens = (0..n).map(|i| format!("t{i}")).collect();
        let mut acts = vec![0.1; n];
        acts[peak] = 1.0;
        TokenTrace {
            tokens,
            activations: Some(acts),
        }
    }

    fn shorthand() -> ViewOptions {
        ViewOptions {
            shorthand: true,
            percentile: Percentile::default(),
        }
    }

    #[test]
    fn app_default_state() {
        let app = ViewerApp::new(trace(10, 5), ViewOptions::default());
        assert!(!app.expanded);
        assert!(!app.should_quit);
        assert_eq!(app.hovered, None);
        assert_eq!(app.window.units.len(), 10);
    }

    #[test]
    fn new_collapsed_shorthand_windows_immediately() {
        let app = ViewerApp::new(trace(50, 40), shorthand());
        assert_eq!(app.window.start, 28);
        assert!(app.collapsed());
    }

    // ── Expand/collapse state machine ──

    #[test]
    fn toggle_expand_round_trips_to_same_window() {
        let mut app = ViewerApp::new(trace(50, 40), shorthand());
        let collapsed_window = app.window.clone();

        app.toggle_expand();
        assert!(app.expanded);
        assert_eq!(app.window.units.len(), 50);
        assert_eq!(app.window.start, 0);

        app.toggle_expand();
        assert!(!app.expanded);
        assert_eq!(app.window, collapsed_window);
    }

    #[test]
    fn toggle_is_inert_without_shorthand() {
        let mut app = ViewerApp::new(trace(50, 40), ViewOptions::default());
        app.toggle_expand();
        assert!(!app.expanded);
        assert_eq!(app.window.units.len(), 50);
    }

    // ── Hover ──

    #[test]
    fn hover_at_hit_box_sets_index() {
        let mut app = ViewerApp::new(trace(5, 2), ViewOptions::default());
        app.hit_boxes = vec![
            HitBox { x: 1, y: 1, width: 2, unit: 0 },
            HitBox { x: 3, y: 1, width: 2, unit: 1 },
        ];

        app.hover_at(3, 1);
        assert_eq!(app.hovered, Some(1));

        // Leaving all hit boxes clears the hover.
        app.hover_at(40, 10);
        assert_eq!(app.hovered, None);
    }

    #[test]
    fn stale_hover_index_is_discarded() {
        let mut app = ViewerApp::new(trace(50, 40), shorthand());
        app.hovered = Some(app.window.units.len() + 5);
        assert!(app.hovered_unit().is_none());
        assert!(app.tooltip().is_none());
    }

    #[test]
    fn hover_survives_only_within_new_list_bounds() {
        let mut app = ViewerApp::new(trace(50, 40), shorthand());
        app.toggle_expand();
        // 50 expanded units; hover one near the end, then collapse back to
        // a 23-unit window. The index no longer resolves.
        app.hovered = Some(45);
        assert!(app.hovered_unit().is_some());
        app.toggle_expand();
        assert!(app.hovered_unit().is_none());
    }

    // ── Tooltip ──

    #[test]
    fn tooltip_hidden_in_collapsed_shorthand() {
        let mut app = ViewerApp::new(trace(50, 40), shorthand());
        app.hovered = Some(1);
        assert!(app.tooltip().is_none());

        app.toggle_expand();
        app.hovered = Some(1);
        assert!(app.tooltip().is_some());
    }

    #[test]
    fn tooltip_requires_defined_non_zero_activation() {
        let tokens: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let trace = TokenTrace {
            tokens,
            activations: Some(vec![0.0, 0.5, 0.9]),
        };
        let mut app = ViewerApp::new(trace, ViewOptions::default());

        app.hovered = Some(0);
        assert!(app.tooltip().is_none(), "zero activation shows no tooltip");

        app.hovered = Some(1);
        assert_eq!(app.tooltip(), Some((1, 0.5)));
    }

    #[test]
    fn tooltip_absent_without_activation_data() {
        let trace = TokenTrace {
            tokens: vec!["a".into()],
            activations: None,
        };
        let mut app = ViewerApp::new(trace, ViewOptions::default());
        app.hovered = Some(0);
        assert!(app.tooltip().is_none());
    }

    // ── Click dispatch ──

    #[test]
    fn click_invokes_exactly_the_configured_action() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);
        let mut actions: Vec<Option<TokenAction>> = (0..5).map(|_| None).collect();
        actions[2] = Some(Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        let mut app =
            ViewerApp::new(trace(5, 2), ViewOptions::default()).with_actions(actions);
        app.hit_boxes = (0..5)
            .map(|i| HitBox { x: i as u16 * 3, y: 0, width: 3, unit: i })
            .collect();

        app.click_at(7, 0); // unit 2
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        app.click_at(7, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        // Units without an action are not clickable.
        app.click_at(1, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn click_on_ellipsis_does_nothing() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);
        let actions: Vec<Option<TokenAction>> = (0..50)
            .map(|_| {
                let c = Arc::clone(&c);
                Some(Box::new(move || {
                    c.fetch_add(1, Ordering::SeqCst);
                }) as TokenAction)
            })
            .collect();

        let mut app = ViewerApp::new(trace(50, 40), shorthand()).with_actions(actions);
        // The first displayed unit is the ellipsis marker (start = 28 > 0).
        app.hit_boxes = vec![HitBox { x: 0, y: 0, width: 3, unit: 0 }];
        app.click_at(1, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn click_on_toggle_area_flips_expansion() {
        let mut app = ViewerApp::new(trace(50, 40), shorthand());
        app.toggle_area = Some(Rect::new(0, 20, 9, 1));
        app.click_at(4, 20);
        assert!(app.expanded);
    }

    // ── Misc model helpers ──

    #[test]
    fn max_activation_reduces_over_raw_values() {
        let app = ViewerApp::new(trace(50, 40), shorthand());
        assert_eq!(app.max_activation(), Some(1.0));

        let no_acts = TokenTrace {
            tokens: vec!["a".into()],
            activations: None,
        };
        assert_eq!(ViewerApp::new(no_acts, shorthand()).max_activation(), None);
    }

    #[test]
    fn quit_message_sets_flag() {
        let mut app = ViewerApp::new(trace(5, 2), ViewOptions::default());
        app.update(ViewerMessage::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn collapsed_window_without_activations_is_neutral() {
        let trace = TokenTrace {
            tokens: (0..40).map(|i| format!("t{i}")).collect(),
            activations: None,
        };
        let app = ViewerApp::new(trace, shorthand());
        assert_eq!(app.window.units.len(), WINDOW_WIDTH);
        assert!(app
            .window
            .units
            .iter()
            .all(|u| u.opacity == NEUTRAL_OPACITY && !u.highlighted));
    }
}
