//! Fluent builder for constructing a [`Solver`].

use sr_core::{City, HourLayer, SolveConfig};
use sr_hazard::{HazardField, RiskModel};
use tracing::debug;

use crate::{FeasibilityPruner, SolveError, SolveResult, Solver, StateStore, StepEngine};

/// Fluent builder for [`Solver<S>`].
///
/// # Required inputs
///
/// - [`SolveConfig`] — steps per hour, horizon, hard ceiling
/// - [`HazardField`] — the time-varying intensity grid
/// - [`RiskModel`] — intensity → per-step failure probability
/// - `.cities(v)` — origin first, then destinations
///
/// The store type is chosen at `build` time:
///
/// ```rust,ignore
/// let mut solver = SolverBuilder::new(config, &field, &risk)
///     .cities(cities)
///     .build::<DenseStore>()?;
/// solver.run(&mut NoopObserver)?;
/// ```
pub struct SolverBuilder<'a> {
    config: SolveConfig,
    field:  &'a HazardField,
    risk:   &'a RiskModel,
    cities: Option<Vec<City>>,
}

impl<'a> SolverBuilder<'a> {
    pub fn new(config: SolveConfig, field: &'a HazardField, risk: &'a RiskModel) -> Self {
        Self { config, field, risk, cities: None }
    }

    /// Route endpoints.  `cities[0]` is the origin; the rest are destinations.
    pub fn cities(mut self, cities: Vec<City>) -> Self {
        self.cities = Some(cities);
        self
    }

    /// Validate inputs, seed the origin, and return a ready-to-run [`Solver`].
    pub fn build<S: StateStore>(self) -> SolveResult<Solver<'a, S>> {
        let cities = self.cities.unwrap_or_default();
        let Some(origin) = cities.first().copied() else {
            return Err(SolveError::Config("at least one city (the origin) is required".into()));
        };

        let (xsize, ysize) = (self.field.xsize(), self.field.ysize());
        for city in &cities {
            city.coord.check_within(xsize, ysize)?;
        }

        let clock = self.config.make_clock(self.field.hour_count())?;
        let reference = FeasibilityPruner::reference_destination(&cities);
        let pruner = FeasibilityPruner::new(xsize, ysize, clock, reference);
        let engine = StepEngine::new(self.field, self.risk, pruner, self.config.hard_ceiling);

        let mut store = S::with_extents(xsize, ysize, clock.total_steps());
        let hazard = self.field.intensity_at(HourLayer(0), origin.coord)?;
        store.seed(origin.coord, self.risk.survival(hazard)?)?;

        debug!(
            xsize,
            ysize,
            steps     = clock.total_steps(),
            origin    = %origin.coord,
            reference = ?reference,
            "solver built"
        );

        Ok(Solver::new(self.config, clock, cities, engine, store))
    }
}
