//! Discrete time model.
//!
//! # Design
//!
//! The solver clock is a monotonically increasing `TimeStep` counter.  Hazard
//! data is only sampled once per hour, so every step maps to a coarser
//! `HourLayer`:
//!
//!   hour_layer = step / steps_per_hour
//!
//! The mapping to wall-clock time is held in `StepClock`:
//!
//!   hour   = first_hour + hour_layer
//!   minute = (step % steps_per_hour) * 60 / steps_per_hour
//!
//! The default of 30 steps per hour gives 2-minute steps.  Integer steps keep
//! all horizon arithmetic exact.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── TimeStep ──────────────────────────────────────────────────────────────────

/// An absolute solver step, 0-based from the origin departure.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeStep(pub u32);

impl TimeStep {
    pub const ZERO: TimeStep = TimeStep(0);

    /// The following step.
    #[inline]
    pub fn next(self) -> TimeStep {
        TimeStep(self.0 + 1)
    }

    /// The preceding step, or `None` at step 0.
    #[inline]
    pub fn prev(self) -> Option<TimeStep> {
        self.0.checked_sub(1).map(TimeStep)
    }

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── HourLayer ─────────────────────────────────────────────────────────────────

/// Index of one hourly slice of the hazard field.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourLayer(pub u32);

impl HourLayer {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for HourLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Converts between steps, hour layers, and wall-clock labels for one run.
///
/// `StepClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepClock {
    steps_per_hour: u32,
    first_hour:     u32,
    total_steps:    u32,
}

impl StepClock {
    /// Create a clock covering steps `0 .. total_steps`.
    pub fn new(steps_per_hour: u32, first_hour: u32, total_steps: u32) -> CoreResult<Self> {
        if steps_per_hour == 0 {
            return Err(CoreError::Config("steps_per_hour must be at least 1".into()));
        }
        if total_steps == 0 {
            return Err(CoreError::Config("horizon must contain at least one step".into()));
        }
        Ok(Self { steps_per_hour, first_hour, total_steps })
    }

    #[inline]
    pub fn steps_per_hour(&self) -> u32 {
        self.steps_per_hour
    }

    #[inline]
    pub fn first_hour(&self) -> u32 {
        self.first_hour
    }

    /// Number of steps in the horizon (exclusive upper bound).
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// The final step inside the horizon.
    #[inline]
    pub fn last_step(&self) -> TimeStep {
        TimeStep(self.total_steps - 1)
    }

    #[inline]
    pub fn contains(&self, step: TimeStep) -> bool {
        step.0 < self.total_steps
    }

    /// Steps left between `step` and the end of the horizon.
    ///
    /// Zero at the last step; zero as well for steps past the horizon.
    #[inline]
    pub fn remaining(&self, step: TimeStep) -> u32 {
        self.last_step().0.saturating_sub(step.0)
    }

    /// Hour layer that holds the hazard data for `step`.
    pub fn hour_layer(&self, step: TimeStep) -> CoreResult<HourLayer> {
        if !self.contains(step) {
            return Err(CoreError::StepOutOfRange { step, total: self.total_steps });
        }
        Ok(HourLayer(step.0 / self.steps_per_hour))
    }

    /// `true` if `step` is the first step of a new hour layer.
    #[inline]
    pub fn is_hour_boundary(&self, step: TimeStep) -> bool {
        step.0.is_multiple_of(self.steps_per_hour)
    }

    /// Wall-clock `(hour, minute)` of `step`.
    pub fn wall_clock(&self, step: TimeStep) -> (u32, u32) {
        let hour = self.first_hour + step.0 / self.steps_per_hour;
        let minute = (step.0 % self.steps_per_hour) * 60 / self.steps_per_hour;
        (hour, minute)
    }

    /// `HH:MM` label used in path output.
    pub fn label(&self, step: TimeStep) -> String {
        let (h, m) = self.wall_clock(step);
        format!("{h:02}:{m:02}")
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps @ {}/h from {:02}:00",
            self.total_steps, self.steps_per_hour, self.first_hour
        )
    }
}
