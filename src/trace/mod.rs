//! Token traces — the input data for the viewer.
//!
//! A trace is an ordered token sequence with an optional index-aligned
//! activation vector. File format is JSON:
//!
//! ```json
//! {"tokens": ["The", " cat", "\n"], "activations": [0.02, 0.91, 0.0]}
//! ```
//!
//! Validation lives here, at the boundary: mismatched lengths and
//! non-finite activations are load errors. The view engine never faults on
//! bad data — it clamps lookups and renders neutrally — so traces built in
//! code skip validation entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("trace has {tokens} tokens but {activations} activations")]
    LengthMismatch { tokens: usize, activations: usize },

    #[error("activation at index {0} is not finite")]
    NonFiniteActivation(usize),
}

pub type TraceResult<T> = Result<T, TraceError>;

/// A token sequence with an optional activation vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenTrace {
    pub tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activations: Option<Vec<f64>>,
}

impl TokenTrace {
    /// Construct a validated trace.
    pub fn new(tokens: Vec<String>, activations: Option<Vec<f64>>) -> TraceResult<Self> {
        let trace = Self {
            tokens,
            activations,
        };
        trace.validate()?;
        Ok(trace)
    }

    /// Load and validate a trace from a JSON file.
    pub fn load(path: &Path) -> TraceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: Self = serde_json::from_str(&content)?;
        trace.validate()?;
        tracing::debug!(path = %path.display(), tokens = trace.tokens.len(), "trace loaded");
        Ok(trace)
    }

    fn validate(&self) -> TraceResult<()> {
        if let Some(activations) = &self.activations {
            if activations.len() != self.tokens.len() {
                return Err(TraceError::LengthMismatch {
                    tokens: self.tokens.len(),
                    activations: activations.len(),
                });
            }
            if let Some(index) = activations.iter().position(|a| !a.is_finite()) {
                return Err(TraceError::NonFiniteActivation(index));
            }
        }
        Ok(())
    }

    /// Built-in sample trace for running the viewer without a file.
    ///
    /// Long enough that shorthand mode truncates, with a clear activation
    /// peak past the window midpoint and a literal newline run.
    pub fn sample() -> Self {
        let text = [
            "The", " quick", " brown", " fox", " jumps", " over", " the", " lazy", " dog", ".",
            "\n\n", "A", " second", " sentence", " follows", " with", " a", " sharp", " spike",
            " on", " one", " particular", " token", " right", " about", " here", ",", " then",
            " the", " signal", " decays", " back", " toward", " the", " noise", " floor", ".",
        ];
        let tokens: Vec<String> = text.iter().map(|t| (*t).to_string()).collect();
        let activations: Vec<f64> = (0..tokens.len())
            .map(|i| {
                let d = i as f64 - 25.0;
                0.05 + 0.9 * (-d * d / 18.0).exp()
            })
            .collect();
        Self {
            tokens,
            activations: Some(activations),
        }
    }
}
