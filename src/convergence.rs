//! Windowed convergence test on the error history.
//!
//! The last `window` errors are smoothed with a trailing moving average of width
//! `window / 10`. The run counts as equilibrated only when every smoothed
//! value sits strictly inside `(tolerance / 10, tolerance)`. Values under the
//! lower edge count as a stall, not as convergence.

use crate::config::RelaxConfig;
use crate::history::ErrorHistory;

/// Trailing moving average of `samples` over full windows of `width`.
///
/// Yields `samples.len() - width + 1` values, or none if there are fewer
/// samples than `width`.
///
/// # Panics
///
/// Panics if `width` is zero.
#[must_use]
pub fn moving_average(samples: &[f64], width: usize) -> Vec<f64> {
    assert!(width > 0, "moving average width must be positive");
    let scale = 1.0 / width as f64;
    samples
        .windows(width)
        .map(|w| w.iter().sum::<f64>() * scale)
        .collect()
}

/// Whether every value lies strictly between `tolerance / 10` and `tolerance`.
#[must_use]
pub fn within_band(smoothed: &[f64], tolerance: f64) -> bool {
    let floor = tolerance / 10.0;
    smoothed.iter().all(|&e| e < tolerance && e > floor)
}

/// Convergence test after `completed` iterations.
///
/// Always false during the burn-in of `10 * window` iterations.
#[must_use]
pub fn is_equilibrated(history: &ErrorHistory, completed: usize, config: &RelaxConfig) -> bool {
    if completed <= config.burn_in() {
        return false;
    }
    let smoothed = moving_average(history.trailing(config.window), config.smoothing_width());
    !smoothed.is_empty() && within_band(&smoothed, config.tolerance)
}
