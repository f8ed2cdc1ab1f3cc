//! Iterative relaxation towards a Fekete-like configuration.
//!
//! Each iteration evaluates every point's disequilibrium against a frozen
//! snapshot, moves every point by `a * d_min` along it, and projects the
//! result back onto the unit sphere. The per-point work runs on the rayon
//! pool; the collect is the barrier before positions are replaced.

use nalgebra::Vector3;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::RelaxConfig;
use crate::convergence::is_equilibrated;
use crate::error::{FeketeError, Result};
use crate::force::{PointSample, sample_point};
use crate::history::ErrorHistory;
use crate::progress::{IterationReport, Progress, Silent};
use crate::sampler::random_unit_points;

/// How far an initial point may be from unit length.
const UNIT_NORM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Running,
    /// The smoothed error stayed inside the tolerance band for a full window.
    Converged,
    BudgetExhausted,
    /// Stopped by the progress observer at an iteration boundary.
    Cancelled,
}

impl Status {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Final state of a run that did not diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub points: Vec<Vector3<f64>>,
    pub history: ErrorHistory,
    pub status: Status,
    pub iterations: usize,
}

/// Relaxation driver owning the point set and error history of one run.
#[derive(Debug, Clone)]
pub struct Relaxation {
    config: RelaxConfig,
    points: Vec<Vector3<f64>>,
    history: ErrorHistory,
    iteration: usize,
    status: Status,
}

impl Relaxation {
    /// Prepare a run over `points`.
    ///
    /// The initial set decides N; `config.points` is only used for sampling.
    pub fn new(config: RelaxConfig, points: Vec<Vector3<f64>>) -> Result<Self> {
        config.validate()?;
        if points.len() < 2 {
            return Err(FeketeError::InvalidConfiguration(format!(
                "at least 2 points are required, got {}",
                points.len()
            )));
        }
        if let Some((i, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !((p.norm() - 1.0).abs() <= UNIT_NORM_TOLERANCE))
        {
            return Err(FeketeError::InvalidConfiguration(format!(
                "point {i} is not on the unit sphere (norm {})",
                p.norm()
            )));
        }
        Ok(Self {
            config,
            points,
            history: ErrorHistory::new(),
            iteration: 0,
            status: Status::Running,
        })
    }

    #[must_use]
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    #[must_use]
    pub const fn history(&self) -> &ErrorHistory {
        &self.history
    }

    /// Completed iterations.
    #[must_use]
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Run one iteration and return the resulting state.
    ///
    /// A terminal driver is left untouched.
    pub fn step(&mut self) -> Result<Status> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }
        self.advance()?;
        Ok(self.status)
    }

    /// Iterate until a terminal state, reporting each iteration to `progress`.
    pub fn run<P: Progress + ?Sized>(mut self, progress: &mut P) -> Result<Outcome> {
        while !self.status.is_terminal() {
            let report = self.advance()?;
            if progress.on_iteration(&report).is_break() && !self.status.is_terminal() {
                self.status = Status::Cancelled;
            }
        }
        info!(
            status = ?self.status,
            iterations = self.iteration,
            error = self.history.last().copied().unwrap_or_default(),
            "relaxation finished"
        );
        Ok(self.into_outcome())
    }

    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        Outcome {
            points: self.points,
            history: self.history,
            status: self.status,
            iterations: self.iteration,
        }
    }

    fn advance(&mut self) -> Result<IterationReport> {
        let points = &self.points;
        let samples: Vec<PointSample> = (0..points.len())
            .into_par_iter()
            .map(|i| sample_point(points, i))
            .collect();

        if let Some(i) = samples
            .iter()
            .position(|s| !s.disequilibrium.iter().all(|c| c.is_finite()))
        {
            return Err(self.diverged(i));
        }

        let error = samples
            .iter()
            .map(|s| s.disequilibrium.norm())
            .fold(0.0, f64::max);
        let min_distance = samples
            .iter()
            .map(|s| s.nearest)
            .fold(f64::INFINITY, f64::min);

        let scale = self.config.step * min_distance;
        let next: Vec<Vector3<f64>> = points
            .par_iter()
            .zip(&samples)
            .map(|(x, s)| (x + s.disequilibrium * scale).normalize())
            .collect();

        if let Some(i) = next.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(self.diverged(i));
        }

        self.points = next;
        self.history.push(error);
        self.iteration += 1;
        debug!(iteration = self.iteration, error, d_min = min_distance, "step");

        if is_equilibrated(&self.history, self.iteration, &self.config) {
            self.status = Status::Converged;
        } else if self.iteration >= self.config.max_iterations {
            self.status = Status::BudgetExhausted;
        }

        Ok(IterationReport {
            iteration: self.iteration,
            max_iterations: self.config.max_iterations,
            error,
            min_distance,
        })
    }

    fn diverged(&self, point: usize) -> FeketeError {
        warn!(iteration = self.iteration, point, "non-finite value, aborting");
        FeketeError::NumericalDivergence {
            iteration: self.iteration,
            point,
            last_valid: self.points.clone(),
        }
    }
}

/// Relax `initial`, or a fresh random configuration of `config.points` points.
pub fn relax(config: RelaxConfig, initial: Option<Vec<Vector3<f64>>>) -> Result<Outcome> {
    relax_with(config, initial, &mut rand::rng(), &mut Silent)
}

/// [`relax`] with an explicit random source and progress observer.
pub fn relax_with<R, P>(
    config: RelaxConfig,
    initial: Option<Vec<Vector3<f64>>>,
    rng: &mut R,
    progress: &mut P,
) -> Result<Outcome>
where
    R: Rng + ?Sized,
    P: Progress + ?Sized,
{
    let points = match initial {
        Some(points) => points,
        None => {
            debug!(points = config.points, "no initial configuration, sampling");
            random_unit_points(config.points, rng)
        }
    };
    Relaxation::new(config, points)?.run(progress)
}
