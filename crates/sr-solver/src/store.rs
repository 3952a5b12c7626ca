//! State storage for the time-expanded grid.
//!
//! # Pluggability
//!
//! The step engine and path reconstruction talk to storage only through the
//! [`StateStore`] trait.  [`DenseStore`] is the default: one slot per
//! `(x, y, t)` in flat per-step arrays.  [`SparseStore`][crate::SparseStore]
//! keys slots by hash and only pays for states actually reached.
//!
//! # Parent encoding
//!
//! A state records the [`Move`] that produced it rather than a full parent
//! triple.  The parent lives at `coord.back(via)` one step earlier.  The
//! seeded origin is the only state with `via = None`.

use sr_core::{Coordinate, CoreError, Move, TimeStep};

use crate::{SolveError, SolveResult};

// ── State ─────────────────────────────────────────────────────────────────────

/// One reached `(x, y, t)` triple and the best confidence known for it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub coord:      Coordinate,
    pub step:       TimeStep,
    /// Probability of surviving from the origin to this state, in `[0, 1]`.
    pub confidence: f64,
    /// Move applied at the parent to arrive here.  `None` only for the origin.
    pub via:        Option<Move>,
}

impl State {
    /// `true` for the seeded origin.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.via.is_none()
    }

    /// The `(coord, step)` of the predecessor, if this is not the origin.
    ///
    /// Returns `None` for the origin and for malformed states whose parent
    /// would fall outside the non-negative quadrant or before step 0.
    pub fn parent(&self) -> Option<(Coordinate, TimeStep)> {
        let mv = self.via?;
        Some((self.coord.back(mv)?, self.step.prev()?))
    }
}

/// Stored payload of one slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Slot {
    pub(crate) confidence: f64,
    pub(crate) via:        Option<Move>,
}

impl Slot {
    #[inline]
    pub(crate) fn state(self, coord: Coordinate, step: TimeStep) -> State {
        State { coord, step, confidence: self.confidence, via: self.via }
    }
}

// ── StateStore trait ──────────────────────────────────────────────────────────

/// Storage for the best known state per `(x, y, t)`.
///
/// # Merge rule
///
/// [`try_insert`][StateStore::try_insert] writes only when the slot is empty
/// or the new confidence is strictly greater.  Equal confidence keeps the
/// first writer, so the iteration order of the step engine fixes the result.
///
/// # Frontier
///
/// [`populated`][StateStore::populated] lists the coordinates occupied at one
/// step in the order they were first filled.  Overwriting a slot with a
/// better value does not move it in the list.
pub trait StateStore: Send + Sync {
    /// An empty store for an `xsize × ysize` grid over `total_steps` steps.
    fn with_extents(xsize: u32, ysize: u32, total_steps: u32) -> Self
    where
        Self: Sized;

    fn xsize(&self) -> u32;
    fn ysize(&self) -> u32;
    fn total_steps(&self) -> u32;

    /// Place the origin at step 0.  Fails if the store already holds any state.
    fn seed(&mut self, origin: Coordinate, confidence: f64) -> SolveResult<()>;

    /// Merge a candidate reached from its parent via `via`.
    ///
    /// Returns `true` if the slot was written.  Step 0 is reserved for the
    /// origin and rejected.
    fn try_insert(
        &mut self,
        coord:      Coordinate,
        step:       TimeStep,
        confidence: f64,
        via:        Move,
    ) -> SolveResult<bool>;

    /// The state at `(coord, step)`, or `None` if never reached.
    fn get(&self, coord: Coordinate, step: TimeStep) -> SolveResult<Option<State>>;

    /// Coordinates occupied at `step`, in first-insertion order.
    fn populated(&self, step: TimeStep) -> &[Coordinate];

    /// Number of occupied slots across all steps.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The state with the highest confidence at `coord` over all steps.
    ///
    /// Ties keep the earliest step.  `None` if `coord` was never reached.
    fn best_over_time(&self, coord: Coordinate) -> SolveResult<Option<State>> {
        let mut best: Option<State> = None;
        for t in 0..self.total_steps() {
            if let Some(state) = self.get(coord, TimeStep(t))? {
                if best.is_none_or(|b| state.confidence > b.confidence) {
                    best = Some(state);
                }
            }
        }
        Ok(best)
    }
}

/// Shared bounds check for every keyed store operation.
pub(crate) fn check_slot(
    coord: Coordinate,
    step:  TimeStep,
    xsize: u32,
    ysize: u32,
    total: u32,
) -> SolveResult<()> {
    coord.check_within(xsize, ysize)?;
    if step.0 >= total {
        return Err(CoreError::StepOutOfRange { step, total }.into());
    }
    Ok(())
}

/// Step 0 belongs to the origin alone.
pub(crate) fn check_not_root_step(coord: Coordinate, step: TimeStep) -> SolveResult<()> {
    if step == TimeStep::ZERO {
        return Err(SolveError::Integrity(format!(
            "candidate {coord} targets step 0, which only the origin may occupy"
        )));
    }
    Ok(())
}

// ── DenseStore ────────────────────────────────────────────────────────────────

/// Flat `Option<Slot>` arrays, one per step, indexed `x * ysize + y`.
///
/// A step's array is allocated on the first write into that step, so memory
/// grows with the explored prefix of the horizon.
pub struct DenseStore {
    xsize:    u32,
    ysize:    u32,
    layers:   Vec<Vec<Option<Slot>>>,
    frontier: Vec<Vec<Coordinate>>,
    len:      usize,
}

impl DenseStore {
    #[inline]
    fn offset(&self, coord: Coordinate) -> usize {
        coord.x as usize * self.ysize as usize + coord.y as usize
    }

    fn layer_mut(&mut self, step: TimeStep) -> &mut Vec<Option<Slot>> {
        let cells = self.xsize as usize * self.ysize as usize;
        let layer = &mut self.layers[step.index()];
        if layer.is_empty() {
            layer.resize(cells, None);
        }
        layer
    }
}

impl StateStore for DenseStore {
    fn with_extents(xsize: u32, ysize: u32, total_steps: u32) -> Self {
        Self {
            xsize,
            ysize,
            layers:   vec![Vec::new(); total_steps as usize],
            frontier: vec![Vec::new(); total_steps as usize],
            len:      0,
        }
    }

    #[inline]
    fn xsize(&self) -> u32 {
        self.xsize
    }

    #[inline]
    fn ysize(&self) -> u32 {
        self.ysize
    }

    #[inline]
    fn total_steps(&self) -> u32 {
        self.layers.len() as u32
    }

    fn seed(&mut self, origin: Coordinate, confidence: f64) -> SolveResult<()> {
        check_slot(origin, TimeStep::ZERO, self.xsize, self.ysize, self.total_steps())?;
        if self.len > 0 {
            return Err(SolveError::AlreadySeeded);
        }
        let i = self.offset(origin);
        self.layer_mut(TimeStep::ZERO)[i] = Some(Slot { confidence, via: None });
        self.frontier[0].push(origin);
        self.len = 1;
        Ok(())
    }

    fn try_insert(
        &mut self,
        coord:      Coordinate,
        step:       TimeStep,
        confidence: f64,
        via:        Move,
    ) -> SolveResult<bool> {
        check_slot(coord, step, self.xsize, self.ysize, self.total_steps())?;
        check_not_root_step(coord, step)?;
        let fresh = Slot { confidence, via: Some(via) };
        let i = self.offset(coord);
        let slot = &mut self.layer_mut(step)[i];
        match slot {
            Some(existing) if confidence <= existing.confidence => return Ok(false),
            Some(existing) => {
                *existing = fresh;
                return Ok(true);
            }
            None => *slot = Some(fresh),
        }
        self.frontier[step.index()].push(coord);
        self.len += 1;
        Ok(true)
    }

    fn get(&self, coord: Coordinate, step: TimeStep) -> SolveResult<Option<State>> {
        check_slot(coord, step, self.xsize, self.ysize, self.total_steps())?;
        let layer = &self.layers[step.index()];
        if layer.is_empty() {
            return Ok(None);
        }
        Ok(layer[self.offset(coord)].map(|s| s.state(coord, step)))
    }

    fn populated(&self, step: TimeStep) -> &[Coordinate] {
        self.frontier.get(step.index()).map_or(&[], Vec::as_slice)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

// ── StoreKind ─────────────────────────────────────────────────────────────────

/// Names a [`StateStore`] implementation on configuration surfaces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Dense,
    Sparse,
}

impl std::str::FromStr for StoreKind {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(StoreKind::Dense),
            "sparse" => Ok(StoreKind::Sparse),
            other => Err(SolveError::Config(format!(
                "unknown store {other:?}: expected \"dense\" or \"sparse\""
            ))),
        }
    }
}
