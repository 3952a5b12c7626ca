//! The `OutputWriter` trait implemented by backend writers.

use sr_core::StepClock;
use sr_solver::Route;

use crate::row::waypoint_rows;
use crate::{OutputResult, RouteSummaryRow, StepSummaryRow, WaypointRow};

/// Trait implemented by output backends.
///
/// Errors raised while driven by the observer are stored and retrieved with
/// [`SolverOutputObserver::take_error`][crate::SolverOutputObserver::take_error].
pub trait OutputWriter {
    /// Write the waypoints of one route.
    fn write_waypoints(&mut self, rows: &[WaypointRow]) -> OutputResult<()>;

    /// Write one destination summary row.
    fn write_route_summary(&mut self, row: &RouteSummaryRow) -> OutputResult<()>;

    /// Write one relaxation-step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write the summary and waypoints of every route, in the given order.
pub fn write_routes<W: OutputWriter>(
    writer:  &mut W,
    routes:  &[Route],
    clock:   &StepClock,
    date_id: Option<u32>,
) -> OutputResult<()> {
    for route in routes {
        writer.write_route_summary(&RouteSummaryRow::from_route(route))?;
        let rows = waypoint_rows(route, clock, date_id);
        if !rows.is_empty() {
            writer.write_waypoints(&rows)?;
        }
    }
    Ok(())
}
