//! `SolverOutputObserver<W>` — bridges `SolverObserver` to an `OutputWriter`.

use sr_core::TimeStep;
use sr_solver::{SolverObserver, StepStats};

use crate::row::StepSummaryRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SolverObserver`] that writes one step summary row per relaxation step
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SolverObserver`
/// methods have no return value.  After `solver.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SolverOutputObserver<W: OutputWriter> {
    writer:     W,
    steps:      u32,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SolverOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, steps: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `solver.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of step rows offered to the writer.
    pub fn steps_written(&self) -> u32 {
        self.steps
    }

    /// Unwrap the inner writer, e.g. to append route rows after the solve.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SolverObserver for SolverOutputObserver<W> {
    fn on_step_end(&mut self, stats: &StepStats) {
        let result = self.writer.write_step_summary(&StepSummaryRow::from(stats));
        self.steps += 1;
        self.store_err(result);
    }

    fn on_solve_end(&mut self, _final_step: TimeStep) {}
}
