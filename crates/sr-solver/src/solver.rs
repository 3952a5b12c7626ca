//! The `Solver` struct, its step loop, and per-destination route extraction.

use sr_core::{City, SolveConfig, StepClock, TimeStep};
use tracing::{info, warn};

use crate::{Path, SolveResult, SolverObserver, StateStore, StepEngine, reconstruct};

// ── Route ─────────────────────────────────────────────────────────────────────

/// Result for one destination.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteOutcome {
    /// The highest-confidence arrival and how to get there.
    Found { path: Path, confidence: f64 },
    /// No state at the destination survived.
    Unreachable,
}

/// A destination city paired with its outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub city:    City,
    pub outcome: RouteOutcome,
}

impl Route {
    #[inline]
    pub fn is_reachable(&self) -> bool {
        matches!(self.outcome, RouteOutcome::Found { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            RouteOutcome::Found { path, .. } => Some(path),
            RouteOutcome::Unreachable => None,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self.outcome {
            RouteOutcome::Found { confidence, .. } => Some(confidence),
            RouteOutcome::Unreachable => None,
        }
    }
}

// ── Solver ────────────────────────────────────────────────────────────────────

/// The solve driver.
///
/// `Solver<S>` owns the state store and drives the step loop:
///
/// 1. **Seed** (done by [`SolverBuilder`][crate::SolverBuilder]): the origin
///    at step 0 with its own survival probability.
/// 2. **Relax**: for each `t` in `0 .. total_steps - 1`, expand step `t`
///    into `t + 1` through [`StepEngine::advance`].
/// 3. **Extract**: for each destination, pick the best state over all steps
///    and reconstruct its path.
pub struct Solver<'a, S: StateStore> {
    /// Configuration the solver was built with.
    pub config: SolveConfig,

    /// Maps steps to hour layers and wall-clock labels.
    pub clock: StepClock,

    cities:  Vec<City>,
    engine:  StepEngine<'a>,
    store:   S,
    /// Next step to expand.
    current: TimeStep,
}

impl<'a, S: StateStore> Solver<'a, S> {
    pub(crate) fn new(
        config: SolveConfig,
        clock:  StepClock,
        cities: Vec<City>,
        engine: StepEngine<'a>,
        store:  S,
    ) -> Self {
        Self { config, clock, cities, engine, store, current: TimeStep::ZERO }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Expand every remaining step up to the end of the horizon.
    ///
    /// Calls observer hooks around each step.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SolverObserver>(&mut self, observer: &mut O) -> SolveResult<()> {
        info!(
            clock     = %self.clock,
            cities    = self.cities.len(),
            reference = ?self.engine.pruner().reference(),
            "solve started"
        );
        while self.current < self.clock.last_step() {
            self.step_once(observer)?;
        }
        observer.on_solve_end(self.current);
        info!(states = self.store.len(), "solve finished");
        Ok(())
    }

    /// Expand at most `n` steps from the current position.
    ///
    /// Stops early at the end of the horizon.  Useful for tests and
    /// incremental stepping.
    pub fn run_steps<O: SolverObserver>(&mut self, n: u32, observer: &mut O) -> SolveResult<()> {
        for _ in 0..n {
            if self.current >= self.clock.last_step() {
                break;
            }
            self.step_once(observer)?;
        }
        Ok(())
    }

    /// `true` once every step of the horizon has been expanded.
    pub fn is_finished(&self) -> bool {
        self.current >= self.clock.last_step()
    }

    /// Next step to be expanded.
    #[inline]
    pub fn current_step(&self) -> TimeStep {
        self.current
    }

    #[inline]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The origin city (`cities[0]`).
    pub fn origin(&self) -> City {
        self.cities[0]
    }

    /// Destinations in input order (every city after the origin).
    pub fn destinations(&self) -> &[City] {
        &self.cities[1..]
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn engine(&self) -> &StepEngine<'a> {
        &self.engine
    }

    /// Best-confidence route to `city` over all steps solved so far.
    pub fn route_to(&self, city: City) -> SolveResult<Route> {
        let outcome = match self.store.best_over_time(city.coord)? {
            Some(best) => {
                let path = reconstruct(&self.store, Some(best))?;
                info!(
                    city       = city.id,
                    confidence = best.confidence,
                    arrival    = %self.clock.label(best.step),
                    "route found"
                );
                RouteOutcome::Found { path, confidence: best.confidence }
            }
            None => {
                warn!(city = city.id, coord = %city.coord, "destination unreachable");
                RouteOutcome::Unreachable
            }
        };
        Ok(Route { city, outcome })
    }

    /// Routes for every destination, in input order.
    pub fn routes(&self) -> SolveResult<Vec<Route>> {
        self.destinations().iter().map(|&city| self.route_to(city)).collect()
    }

    // ── Step processing ───────────────────────────────────────────────────

    fn step_once<O: SolverObserver>(&mut self, observer: &mut O) -> SolveResult<()> {
        let t = self.current;
        observer.on_step_start(t);
        let stats = self.engine.advance(&mut self.store, t)?;
        observer.on_step_end(&stats);
        self.current = t.next();
        Ok(())
    }
}
