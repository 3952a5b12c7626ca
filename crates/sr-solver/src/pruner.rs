//! Admissibility bound on the search window.

use sr_core::{City, Coordinate, StepClock, TimeStep};

/// Decides whether a candidate state is worth keeping.
///
/// A state is rejected when it lies outside the grid or the horizon, or when
/// its Manhattan distance to the *reference destination* exceeds the steps
/// left before the horizon closes.  Moves cover at most one cell per step, so
/// such a state can never reach the reference destination in time.
///
/// The bound says nothing about closer destinations, which stay fully
/// explored.
#[derive(Clone, Debug)]
pub struct FeasibilityPruner {
    xsize:     u32,
    ysize:     u32,
    clock:     StepClock,
    reference: Option<Coordinate>,
}

impl FeasibilityPruner {
    /// Build a pruner.  `reference = None` keeps only the bounds checks.
    pub fn new(xsize: u32, ysize: u32, clock: StepClock, reference: Option<Coordinate>) -> Self {
        Self { xsize, ysize, clock, reference }
    }

    /// The destination farthest (Manhattan) from the origin `cities[0]`.
    ///
    /// Ties keep the earliest city in the list.  Returns `None` when there
    /// are no destinations besides the origin.
    pub fn reference_destination(cities: &[City]) -> Option<Coordinate> {
        let (origin, destinations) = cities.split_first()?;
        let mut best: Option<(u32, Coordinate)> = None;
        for city in destinations {
            let d = origin.coord.manhattan(city.coord);
            if best.is_none_or(|(bd, _)| d > bd) {
                best = Some((d, city.coord));
            }
        }
        best.map(|(_, c)| c)
    }

    #[inline]
    pub fn reference(&self) -> Option<Coordinate> {
        self.reference
    }

    #[inline]
    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    /// `true` if a state at `coord`, `step` may still be useful.
    #[inline]
    pub fn is_feasible(&self, coord: Coordinate, step: TimeStep) -> bool {
        if !coord.within(self.xsize, self.ysize) || !self.clock.contains(step) {
            return false;
        }
        match self.reference {
            Some(target) => coord.manhattan(target) <= self.clock.remaining(step),
            None => true,
        }
    }
}
