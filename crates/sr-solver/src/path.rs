//! Parent-chain walk from a terminal state back to the origin.

use sr_core::{Coordinate, TimeStep};

use crate::{SolveError, SolveResult, State, StateStore};

/// One point of a path: a cell occupied at a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Waypoint {
    pub coord: Coordinate,
    pub step:  TimeStep,
}

/// An origin-to-terminal sequence of waypoints, one per step.
///
/// Consecutive waypoints differ by exactly one step and by at most one cell
/// (Manhattan distance 0 or 1).
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    waypoints: Vec<Waypoint>,
}

impl Path {
    /// Build a path from externally supplied waypoints.
    ///
    /// Fails unless the list is non-empty and each waypoint is one step after
    /// its predecessor and at most one cell away.
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> SolveResult<Self> {
        if waypoints.is_empty() {
            return Err(SolveError::Config("a path needs at least one waypoint".into()));
        }
        for pair in waypoints.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b.step.0 != a.step.0 + 1 || a.coord.manhattan(b.coord) > 1 {
                return Err(SolveError::Config(format!(
                    "waypoints {} at {} and {} at {} are not one move apart",
                    a.coord, a.step, b.coord, b.step
                )));
            }
        }
        Ok(Self { waypoints })
    }

    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of waypoints (`arrival step + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn origin(&self) -> Option<Waypoint> {
        self.waypoints.first().copied()
    }

    pub fn terminal(&self) -> Option<Waypoint> {
        self.waypoints.last().copied()
    }

    /// Step at which the path ends.
    pub fn arrival_step(&self) -> TimeStep {
        self.terminal().map_or(TimeStep::ZERO, |w| w.step)
    }

    /// Number of transitions that change cell.
    pub fn moves(&self) -> usize {
        self.waypoints.windows(2).filter(|w| w[0].coord != w[1].coord).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

/// Follow parent links from `terminal` back to the origin.
///
/// The walk is iterative and stops after `store.total_steps()` hops, so a
/// corrupted store cannot make it loop or overflow the stack.
///
/// # Errors
///
/// - [`SolveError::NoPathFound`] if `terminal` is `None`.
/// - [`SolveError::Integrity`] if a parent link dangles, the hop bound is
///   exceeded, or the chain ends anywhere but step 0.
pub fn reconstruct<S: StateStore>(store: &S, terminal: Option<State>) -> SolveResult<Path> {
    let mut cur = terminal.ok_or(SolveError::NoPathFound)?;
    let bound = store.total_steps() as usize;
    let mut waypoints = Vec::with_capacity(cur.step.index() + 1);

    loop {
        waypoints.push(Waypoint { coord: cur.coord, step: cur.step });
        let Some(via) = cur.via else { break };
        if waypoints.len() > bound {
            return Err(SolveError::Integrity(format!(
                "parent chain from {} exceeds {bound} hops",
                waypoints[0].coord
            )));
        }
        let (coord, step) = cur.parent().ok_or_else(|| {
            SolveError::Integrity(format!(
                "state {} at {} cannot have arrived via {via:?}",
                cur.coord, cur.step
            ))
        })?;
        cur = store.get(coord, step)?.ok_or_else(|| {
            SolveError::Integrity(format!("dangling parent {coord} at {step}"))
        })?;
    }

    if cur.step != TimeStep::ZERO {
        return Err(SolveError::Integrity(format!(
            "parent chain ends at {} on {} instead of step 0",
            cur.coord, cur.step
        )));
    }

    waypoints.reverse();
    Ok(Path { waypoints })
}
