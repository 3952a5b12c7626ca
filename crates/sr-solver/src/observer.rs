//! Solver observer trait for progress reporting and data collection.

use sr_core::TimeStep;

use crate::StepStats;

/// Callbacks invoked by [`Solver::run`][crate::Solver::run] around each
/// relaxation step.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress { every: u32 }
///
/// impl SolverObserver for Progress {
///     fn on_step_end(&mut self, stats: &StepStats) {
///         if stats.step.0 % self.every == 0 {
///             println!("{}: {} states accepted", stats.step, stats.accepted);
///         }
///     }
/// }
/// ```
pub trait SolverObserver {
    /// Called before step `step` is expanded.
    fn on_step_start(&mut self, _step: TimeStep) {}

    /// Called after the successors of `stats.step` have been merged.
    fn on_step_end(&mut self, _stats: &StepStats) {}

    /// Called once after the final step has been expanded.
    fn on_solve_end(&mut self, _final_step: TimeStep) {}
}

/// A [`SolverObserver`] that does nothing.
pub struct NoopObserver;

impl SolverObserver for NoopObserver {}
