//! Viewer configuration supplied by the embedding application.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("percentile must be strictly between 0 and 100, got {0}")]
    PercentileOutOfRange(f64),
}

/// Highlight cutoff percentile on the 0–100 scale.
///
/// The unit is part of the type: construction rejects anything outside the
/// open interval (0, 100), so a 0–1 fraction cannot slip through unnoticed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentile(f64);

impl Percentile {
    pub fn new(value: f64) -> Result<Self, OptionsError> {
        if value.is_finite() && value > 0.0 && value < 100.0 {
            Ok(Self(value))
        } else {
            Err(OptionsError::PercentileOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Percentile {
    /// Top decile: roughly the top 10% of activations get highlighted.
    fn default() -> Self {
        Self(90.0)
    }
}

/// How the viewer presents a trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    /// Collapsed windowed mode: show only tokens near the peak activation.
    pub shorthand: bool,
    /// Highlight cutoff.
    pub percentile: Percentile,
}
