//! Run parameters for the relaxation driver.

use serde::{Deserialize, Serialize};

use crate::error::{FeketeError, Result};

/// Parameters of a single relaxation run. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxConfig {
    /// Number of points to sample when no initial configuration is supplied.
    pub points: usize,

    /// Step coefficient `a` in `x + a * d_min * w`.
    pub step: f64,

    /// Iteration budget.
    pub max_iterations: usize,

    /// Upper edge of the convergence band; the lower edge is `tolerance / 10`.
    pub tolerance: f64,

    /// Number of trailing error samples inspected by the convergence test.
    /// The smoothing width is `window / 10`.
    pub window: usize,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            points: 100,
            step: 1.0,
            max_iterations: 100,
            tolerance: 1e-20,
            window: 100,
        }
    }
}

impl RelaxConfig {
    /// Width of the moving-average filter applied to the error window.
    #[must_use]
    pub const fn smoothing_width(&self) -> usize {
        self.window / 10
    }

    /// Completed iterations required before convergence is tested at all.
    #[must_use]
    pub const fn burn_in(&self) -> usize {
        self.window.saturating_mul(10)
    }

    /// Validate parameters that do not depend on the initial configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(FeketeError::InvalidConfiguration(format!(
                "step must be finite and > 0, got {}",
                self.step
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(FeketeError::InvalidConfiguration(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if !(10..=usize::MAX / 10).contains(&self.window) {
            return Err(FeketeError::InvalidConfiguration(format!(
                "window must be in [10, {}], got {}",
                usize::MAX / 10,
                self.window
            )));
        }
        if self.max_iterations == 0 {
            return Err(FeketeError::InvalidConfiguration(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FeketeError::Config(format!("JSON parse error: {e}")))
    }
}
