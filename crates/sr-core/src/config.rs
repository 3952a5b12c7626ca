//! Run configuration.

use crate::{CoreError, CoreResult, StepClock};

/// Solver configuration.
///
/// Typically loaded from a TOML file by the driver and passed to the solver
/// builder.  Defaults: 30 steps per hour starting at 03:00, the full hazard
/// horizon, and intensity ≥ 15 treated as fatal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveConfig {
    /// Discrete steps per hazard hour layer.
    pub steps_per_hour: u32,

    /// Wall-clock hour of hazard layer 0.  Only affects output labels.
    pub first_hour: u32,

    /// Horizon length in steps.  `None` uses every step the hazard field
    /// covers (`hour_count * steps_per_hour`).
    pub total_steps: Option<u32>,

    /// Intensity at or above which a cell is treated as already fatal: no
    /// movement leaves it, only a stay transition.  `None` disables the rule.
    pub hard_ceiling: Option<f64>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            steps_per_hour: 30,
            first_hour:     3,
            total_steps:    None,
            hard_ceiling:   Some(15.0),
        }
    }
}

impl SolveConfig {
    /// Reject values the solver cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.steps_per_hour == 0 {
            return Err(CoreError::Config("steps_per_hour must be at least 1".into()));
        }
        if self.total_steps == Some(0) {
            return Err(CoreError::Config("total_steps must be at least 1".into()));
        }
        if let Some(limit) = self.hard_ceiling {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(CoreError::Config(format!(
                    "hard_ceiling must be a positive finite intensity, got {limit}"
                )));
            }
        }
        Ok(())
    }

    /// Construct the `StepClock` for a hazard field of `hour_count` layers.
    ///
    /// Fails if the configured horizon would step past the last layer.
    pub fn make_clock(&self, hour_count: u32) -> CoreResult<StepClock> {
        self.validate()?;
        let covered = hour_count.checked_mul(self.steps_per_hour).ok_or_else(|| {
            CoreError::Config(format!(
                "{hour_count} hours x {} steps/hour overflows the step counter",
                self.steps_per_hour
            ))
        })?;
        let total = self.total_steps.unwrap_or(covered);
        if total > covered {
            return Err(CoreError::Config(format!(
                "horizon of {total} steps exceeds the {covered} steps covered by {hour_count} hour layers"
            )));
        }
        StepClock::new(self.steps_per_hour, self.first_hour, total)
    }
}
