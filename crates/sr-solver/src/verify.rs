//! Replay a path against an observed (ground-truth) hazard field.

use sr_core::{Coordinate, HourLayer, StepClock, TimeStep};
use sr_hazard::HazardField;
use tracing::debug;

use crate::{Path, SolveError, SolveResult};

/// A waypoint whose observed intensity met or exceeded the limit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VerifyHit {
    pub coord:     Coordinate,
    pub step:      TimeStep,
    pub intensity: f64,
}

/// Outcome of [`verify_path`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerifyReport {
    /// Waypoints below the limit.
    pub ok_steps: usize,
    /// Waypoints at or above the limit, in path order.
    pub hits:     Vec<VerifyHit>,
}

impl VerifyReport {
    /// `true` if no waypoint reached the limit.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Check every waypoint of `path` against `truth` at the wall-clock hour of
/// its step.
///
/// `truth_first_hour` is the wall-clock hour stored in layer 0 of `truth`;
/// it need not match the first hour of `clock`.
///
/// # Errors
///
/// - `SolveError::Config` if a waypoint's hour is not covered by `truth`.
/// - `CoreError::OutOfBounds` (wrapped) if a waypoint lies outside `truth`.
pub fn verify_path(
    path:             &Path,
    truth:            &HazardField,
    truth_first_hour: u32,
    clock:            &StepClock,
    limit:            f64,
) -> SolveResult<VerifyReport> {
    let mut report = VerifyReport::default();
    for wp in path {
        let layer = observed_layer(truth, truth_first_hour, clock, wp.step)?;
        let intensity = truth.intensity_at(layer, wp.coord)?;
        if intensity >= limit {
            report.hits.push(VerifyHit { coord: wp.coord, step: wp.step, intensity });
        } else {
            report.ok_steps += 1;
        }
    }
    debug!(ok = report.ok_steps, hits = report.hits.len(), "path verified");
    Ok(report)
}

fn observed_layer(
    truth:      &HazardField,
    first_hour: u32,
    clock:      &StepClock,
    step:       TimeStep,
) -> SolveResult<HourLayer> {
    let (hour, _) = clock.wall_clock(step);
    hour.checked_sub(first_hour)
        .filter(|&layer| layer < truth.hour_count())
        .map(HourLayer)
        .ok_or_else(|| {
            SolveError::Config(format!(
                "observed data covers hours {first_hour}..{} but the path is at {}",
                first_hour + truth.hour_count(),
                clock.label(step)
            ))
        })
}
