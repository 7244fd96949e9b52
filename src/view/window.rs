//! Window selection — which tokens are visible, as a pure function.
//!
//! The collapsed shorthand view shows a fixed-width window centered on the
//! peak activation. The window start is returned alongside the units so the
//! caller can store it as derived state; nothing here mutates anything.

use super::normalize::{activation_threshold, normalize_activations};
use super::options::ViewOptions;
use super::unit::{DisplayUnit, NEUTRAL_OPACITY};

/// Number of tokens shown in a collapsed shorthand window.
pub const WINDOW_WIDTH: usize = 24;

/// The displayed unit list plus where it starts in the token sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayWindow {
    pub units: Vec<DisplayUnit>,
    /// Token index of the first windowed unit. 0 in full view.
    pub start: usize,
}

/// Index of the maximum activation, first occurrence on ties.
pub fn peak_index(activations: &[f64]) -> usize {
    let mut peak = 0;
    for (i, v) in activations.iter().enumerate().skip(1) {
        if *v > activations[peak] {
            peak = i;
        }
    }
    peak
}

/// Recompute the displayed unit list.
///
/// Full view (`!shorthand || expanded`) shows every token. Collapsed
/// shorthand shows a [`WINDOW_WIDTH`] window centered on the peak
/// activation, prefixed with an ellipsis unit when tokens precede the
/// window; with no activation data it shows the first [`WINDOW_WIDTH`]
/// tokens, all neutral. Opacity and highlight are always computed against
/// the full activation vector, never re-normalized to the window.
///
/// Per-token lookups are clamped: an index past the activation vector gets
/// neutral opacity and no highlight, so mismatched input lengths degrade
/// instead of faulting.
pub fn compute_display_window(
    tokens: &[String],
    activations: Option<&[f64]>,
    options: ViewOptions,
    expanded: bool,
) -> DisplayWindow {
    // Empty activation vectors behave as absent ones.
    let activations = activations.filter(|a| !a.is_empty());
    let normalized = activations.and_then(normalize_activations);
    let threshold = activations.and_then(|a| activation_threshold(a, options.percentile));

    let unit_at = |index: usize| -> DisplayUnit {
        let opacity = normalized
            .as_ref()
            .and_then(|n| n.get(index).copied())
            .unwrap_or(NEUTRAL_OPACITY);
        let highlighted = match (activations, threshold) {
            (Some(a), Some(cutoff)) => a.get(index).is_some_and(|v| *v >= cutoff),
            _ => false,
        };
        DisplayUnit {
            text: tokens[index].clone(),
            opacity,
            highlighted,
            source: Some(index),
        }
    };

    if !options.shorthand || expanded {
        return DisplayWindow {
            units: (0..tokens.len()).map(unit_at).collect(),
            start: 0,
        };
    }

    let Some(acts) = activations else {
        // No peak to center on: the leading tokens, nothing highlighted.
        return DisplayWindow {
            units: (0..tokens.len().min(WINDOW_WIDTH)).map(unit_at).collect(),
            start: 0,
        };
    };

    let peak = peak_index(acts).min(tokens.len().saturating_sub(1));
    let start = peak.saturating_sub(WINDOW_WIDTH / 2);
    let end = tokens.len().min(start + WINDOW_WIDTH);

    let mut units = Vec::with_capacity(end - start + 1);
    if start > 0 {
        units.push(DisplayUnit::ellipsis());
    }
    units.extend((start..end).map(unit_at));
    DisplayWindow { units, start }
}
