//! One relaxation step: expand every state at `t` into `t + 1`.

use sr_core::{Coordinate, CoreError, Move, StepClock, TimeStep};
use sr_hazard::{HazardField, RiskModel};
use tracing::debug;

use crate::{FeasibilityPruner, SolveError, SolveResult, StateStore};

// ── StepStats ─────────────────────────────────────────────────────────────────

/// Counters for one call to [`StepEngine::advance`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Source step that was expanded.
    pub step:       TimeStep,
    /// Populated states at `step`.
    pub sources:    usize,
    /// Candidates offered to the store.
    pub candidates: usize,
    /// Candidates that won their slot.
    pub accepted:   usize,
    /// Candidates rejected by bounds or the feasibility bound.
    pub pruned:     usize,
    /// Candidates dropped because their confidence reached zero.
    pub lethal:     usize,
}

// ── Candidate generation ──────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct Candidate {
    coord:      Coordinate,
    confidence: f64,
    via:        Move,
}

/// Candidates produced by one source state, plus its rejection counts.
#[derive(Default)]
struct Expansion {
    candidates: Vec<Candidate>,
    pruned:     usize,
    lethal:     usize,
}

impl Expansion {
    fn offer(&mut self, coord: Coordinate, confidence: f64, via: Move) {
        if confidence > 0.0 {
            self.candidates.push(Candidate { coord, confidence, via });
        } else {
            self.lethal += 1;
        }
    }
}

// ── StepEngine ────────────────────────────────────────────────────────────────

/// Generates and merges successor states one step at a time.
///
/// # Successors of `(x, y, t)` with confidence `c`
///
/// | Move        | Target         | Confidence                                          |
/// |-------------|----------------|-----------------------------------------------------|
/// | orthogonal  | `(x±1 / y±1)`  | `c · (1 - p(hazard(target, layer(t+1))))`            |
/// | stay        | `(x, y)`       | `c` mid-hour; `c · (1 - p(hazard(x, y, layer(t+1))))` when `t+1` opens an hour |
///
/// A source whose own hazard at `layer(t)` is at or above the hard ceiling
/// produces only the stay.  Candidates with zero confidence are dropped.
///
/// # Determinism
///
/// Sources are expanded in [`StateStore::populated`] order and, per source,
/// in [`Move::ORTHOGONAL`] order followed by the stay.  With the `parallel`
/// feature the expansion runs on Rayon but the merge stays sequential in the
/// same order, so the final store is identical.
pub struct StepEngine<'a> {
    field:        &'a HazardField,
    risk:         &'a RiskModel,
    pruner:       FeasibilityPruner,
    hard_ceiling: Option<f64>,
}

impl<'a> StepEngine<'a> {
    pub fn new(
        field:        &'a HazardField,
        risk:         &'a RiskModel,
        pruner:       FeasibilityPruner,
        hard_ceiling: Option<f64>,
    ) -> Self {
        Self { field, risk, pruner, hard_ceiling }
    }

    #[inline]
    pub fn pruner(&self) -> &FeasibilityPruner {
        &self.pruner
    }

    #[inline]
    pub fn clock(&self) -> &StepClock {
        self.pruner.clock()
    }

    /// Expand every state at `t` into `t + 1`.
    ///
    /// All writes land in step `t + 1`; step `t` is only read.  Fails with
    /// `StepOutOfRange` if `t` is already the last step of the horizon.
    pub fn advance<S: StateStore>(&self, store: &mut S, t: TimeStep) -> SolveResult<StepStats> {
        let clock = *self.clock();
        let next = t.next();
        if !clock.contains(next) {
            return Err(CoreError::StepOutOfRange { step: next, total: clock.total_steps() }.into());
        }

        // ── Collect sources (read-only snapshot of step t) ────────────────
        let mut sources = Vec::with_capacity(store.populated(t).len());
        for &coord in store.populated(t) {
            let state = store.get(coord, t)?.ok_or_else(|| {
                SolveError::Integrity(format!("frontier lists {coord} at {t} but its slot is empty"))
            })?;
            sources.push((coord, state.confidence));
        }

        // ── Produce ───────────────────────────────────────────────────────
        let expansions = self.expand_all(&sources, t)?;

        // ── Apply (sequential, source order) ──────────────────────────────
        let mut stats = StepStats { step: t, sources: sources.len(), ..StepStats::default() };
        for expansion in expansions {
            stats.pruned += expansion.pruned;
            stats.lethal += expansion.lethal;
            for c in expansion.candidates {
                stats.candidates += 1;
                if store.try_insert(c.coord, next, c.confidence, c.via)? {
                    stats.accepted += 1;
                }
            }
        }

        debug!(
            step       = t.0,
            sources    = stats.sources,
            candidates = stats.candidates,
            accepted   = stats.accepted,
            pruned     = stats.pruned,
            lethal     = stats.lethal,
            "relaxation step"
        );
        Ok(stats)
    }

    fn expand_all(&self, sources: &[(Coordinate, f64)], t: TimeStep) -> SolveResult<Vec<Expansion>> {
        #[cfg(not(feature = "parallel"))]
        {
            sources.iter().map(|&(coord, c)| self.expand(coord, c, t)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            sources.par_iter().map(|&(coord, c)| self.expand(coord, c, t)).collect()
        }
    }

    /// Successors of one source state.  Pure: reads the field only.
    fn expand(&self, coord: Coordinate, confidence: f64, t: TimeStep) -> SolveResult<Expansion> {
        let clock = self.clock();
        let next = t.next();
        let here_layer = clock.hour_layer(t)?;
        let next_layer = clock.hour_layer(next)?;
        let mut out = Expansion::default();

        let fatal = match self.hard_ceiling {
            Some(limit) => self.field.intensity_at(here_layer, coord)? >= limit,
            None => false,
        };

        if !fatal {
            for mv in Move::ORTHOGONAL {
                let target = match coord.step(mv) {
                    Some(target) if self.pruner.is_feasible(target, next) => target,
                    _ => {
                        out.pruned += 1;
                        continue;
                    }
                };
                let hazard = self.field.intensity_at(next_layer, target)?;
                out.offer(target, confidence * self.risk.survival(hazard)?, mv);
            }
        }

        if self.pruner.is_feasible(coord, next) {
            let stay = if clock.is_hour_boundary(next) {
                let hazard = self.field.intensity_at(next_layer, coord)?;
                confidence * self.risk.survival(hazard)?
            } else {
                confidence
            };
            out.offer(coord, stay, Move::Stay);
        } else {
            out.pruned += 1;
        }

        Ok(out)
    }
}
