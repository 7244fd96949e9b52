//! Display units — the renderable token list and the newline-run policy.

use super::normalize::OPACITY_FLOOR;

/// Opacity used when no activation data applies.
pub const NEUTRAL_OPACITY: f64 = 1.0;

/// One renderable token.
///
/// Units are lightweight copies of trace data — no references held across
/// frames — recomputed on every window change and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUnit {
    /// Token text.
    pub text: String,
    /// Foreground intensity in `[OPACITY_FLOOR, 1.0]`; 1.0 when neutral.
    pub opacity: f64,
    /// Raw activation meets the percentile cutoff.
    pub highlighted: bool,
    /// Index into the original token sequence; `None` for the ellipsis
    /// marker prepended to a truncated window.
    pub source: Option<usize>,
}

/// How a unit's text renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitBody {
    /// Ordinary text; highlight and opacity are styling concerns.
    Text,
    /// `k` literal line advancements, preserving document structure.
    LineBreaks(usize),
    /// A bold escaped marker: `\n` repeated `k` times, backslash-escaped.
    /// Compact stand-in so collapsed views don't consume vertical space.
    EscapedNewlines(usize),
}

impl DisplayUnit {
    /// The synthetic "..." marker for a truncated window.
    pub fn ellipsis() -> Self {
        Self {
            text: "...".into(),
            opacity: NEUTRAL_OPACITY,
            highlighted: false,
            source: None,
        }
    }

    /// Whether this unit is a literal newline run: all whitespace with at
    /// least one line break.
    pub fn is_newline_run(&self) -> bool {
        !self.text.is_empty() && self.text.trim().is_empty() && self.text.contains('\n')
    }

    /// Rendering decision for this unit.
    ///
    /// `full_view` is true when the whole sequence is shown (shorthand off,
    /// or expanded). A newline run renders as literal breaks only in full
    /// view and only when its opacity sits exactly on the normalization
    /// floor; everywhere else it collapses to the escaped marker.
    pub fn body(&self, full_view: bool) -> UnitBody {
        if self.is_newline_run() {
            let breaks = self.text.matches('\n').count();
            if full_view && (self.opacity - OPACITY_FLOOR).abs() < f64::EPSILON {
                return UnitBody::LineBreaks(breaks);
            }
            return UnitBody::EscapedNewlines(breaks);
        }
        UnitBody::Text
    }
}
