//! Activation normalization and percentile thresholding.

use super::options::Percentile;

/// Lowest opacity a token can normalize to. Keeps every token readable.
pub const OPACITY_FLOOR: f64 = 0.4;

/// Map raw activations into display opacities in `[OPACITY_FLOOR, 1.0]`.
///
/// Returns `None` for an empty slice — no activation data, render neutral.
/// A flat vector (`max == min`, including the single-element case) maps
/// every value to exactly 1.0: fully opaque, and no division by zero.
/// Otherwise values rescale linearly so the minimum lands on the floor and
/// the maximum on 1.0.
pub fn normalize_activations(activations: &[f64]) -> Option<Vec<f64>> {
    if activations.is_empty() {
        return None;
    }
    let min = activations.iter().copied().fold(f64::INFINITY, f64::min);
    let max = activations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return Some(vec![1.0; activations.len()]);
    }
    let range = max - min;
    Some(
        activations
            .iter()
            .map(|a| OPACITY_FLOOR + (1.0 - OPACITY_FLOOR) * ((a - min) / range))
            .collect(),
    )
}

/// Percentile cutoff for highlighting.
///
/// Sorts a copy ascending and indexes at `floor(len * P / 100)`, clamped to
/// the last element. A token is highlighted iff its raw activation ≥ the
/// returned cutoff, ties included. Returns `None` when there is nothing to
/// rank.
pub fn activation_threshold(activations: &[f64], percentile: Percentile) -> Option<f64> {
    if activations.is_empty() {
        return None;
    }
    let mut sorted = activations.to_vec();
    sorted.sort_by(f64::total_cmp);
    let index = (sorted.len() as f64 * percentile.value() / 100.0).floor() as usize;
    Some(sorted[index.min(sorted.len() - 1)])
}
