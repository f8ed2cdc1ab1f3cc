use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Value the history starts with before any iteration runs.
pub const SEED_ERROR: f64 = 0.1;

/// Per-iteration maximum disequilibrium, oldest first.
///
/// Starts with a single [`SEED_ERROR`] entry and only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHistory(Vec<f64>);

impl Default for ErrorHistory {
    fn default() -> Self {
        Self(vec![SEED_ERROR])
    }
}

impl ErrorHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, err: f64) {
        self.0.push(err);
    }

    /// Entries recorded by iterations, without the seed.
    #[must_use]
    pub fn recorded(&self) -> &[f64] {
        self.0.get(1..).unwrap_or_default()
    }

    /// The last `n` entries (all of them if fewer exist).
    #[must_use]
    pub fn trailing(&self, n: usize) -> &[f64] {
        &self.0[self.0.len().saturating_sub(n)..]
    }
}

impl Deref for ErrorHistory {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}
