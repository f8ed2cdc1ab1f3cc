//! Per-iteration observation hook.

use std::ops::ControlFlow;

use tracing::info;

/// Snapshot handed to a [`Progress`] observer after each completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// Completed iterations, counting this one.
    pub iteration: usize,
    pub max_iterations: usize,
    /// Maximum disequilibrium of the iteration.
    pub error: f64,
    /// Minimum pairwise distance the step was scaled by.
    pub min_distance: f64,
}

/// Observer called at every iteration boundary.
///
/// Returning `ControlFlow::Break` cancels the run; the point set is left
/// on the unit sphere. Observers never influence the numerics otherwise.
pub trait Progress {
    fn on_iteration(&mut self, report: &IterationReport) -> ControlFlow<()>;
}

/// Observer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn on_iteration(&mut self, _report: &IterationReport) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Logs one line every `every` iterations through `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    pub every: usize,
}

impl Progress for LogProgress {
    fn on_iteration(&mut self, report: &IterationReport) -> ControlFlow<()> {
        if self.every > 0 && report.iteration % self.every == 0 {
            info!(
                iteration = report.iteration,
                max_iterations = report.max_iterations,
                error = report.error,
                d_min = report.min_distance,
                "relaxing"
            );
        }
        ControlFlow::Continue(())
    }
}

/// Adapts a closure into an observer.
pub struct FnProgress<F>(pub F);

impl<F> Progress for FnProgress<F>
where
    F: FnMut(&IterationReport) -> ControlFlow<()>,
{
    fn on_iteration(&mut self, report: &IterationReport) -> ControlFlow<()> {
        (self.0)(report)
    }
}
