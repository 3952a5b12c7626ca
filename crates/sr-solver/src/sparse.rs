//! Hash-keyed [`StateStore`] for runs that reach a small part of the grid.

use std::collections::hash_map::Entry;

use sr_core::{Coordinate, Move, TimeStep};

use crate::store::{Slot, check_not_root_step, check_slot};
use crate::{SolveError, SolveResult, State, StateStore};

#[cfg(feature = "fx-hash")]
type SlotMap = rustc_hash::FxHashMap<(Coordinate, TimeStep), Slot>;
#[cfg(not(feature = "fx-hash"))]
type SlotMap = std::collections::HashMap<(Coordinate, TimeStep), Slot>;

/// Slots keyed by `(coord, step)`.
///
/// Produces exactly the same states as [`DenseStore`][crate::DenseStore]; the
/// merge rule and frontier order are shared.
pub struct SparseStore {
    xsize:    u32,
    ysize:    u32,
    total:    u32,
    slots:    SlotMap,
    frontier: Vec<Vec<Coordinate>>,
}

impl StateStore for SparseStore {
    fn with_extents(xsize: u32, ysize: u32, total_steps: u32) -> Self {
        Self {
            xsize,
            ysize,
            total:    total_steps,
            slots:    SlotMap::default(),
            frontier: vec![Vec::new(); total_steps as usize],
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
        self.total
    }

    fn seed(&mut self, origin: Coordinate, confidence: f64) -> SolveResult<()> {
        check_slot(origin, TimeStep::ZERO, self.xsize, self.ysize, self.total)?;
        if !self.slots.is_empty() {
            return Err(SolveError::AlreadySeeded);
        }
        self.slots.insert((origin, TimeStep::ZERO), Slot { confidence, via: None });
        self.frontier[0].push(origin);
        Ok(())
    }

    fn try_insert(
        &mut self,
        coord:      Coordinate,
        step:       TimeStep,
        confidence: f64,
        via:        Move,
    ) -> SolveResult<bool> {
        check_slot(coord, step, self.xsize, self.ysize, self.total)?;
        check_not_root_step(coord, step)?;
        let fresh = Slot { confidence, via: Some(via) };
        match self.slots.entry((coord, step)) {
            Entry::Occupied(mut e) => {
                if confidence <= e.get().confidence {
                    return Ok(false);
                }
                e.insert(fresh);
                Ok(true)
            }
            Entry::Vacant(e) => {
                e.insert(fresh);
                self.frontier[step.index()].push(coord);
                Ok(true)
            }
        }
    }

    fn get(&self, coord: Coordinate, step: TimeStep) -> SolveResult<Option<State>> {
        check_slot(coord, step, self.xsize, self.ysize, self.total)?;
        Ok(self.slots.get(&(coord, step)).map(|s| s.state(coord, step)))
    }

    fn populated(&self, step: TimeStep) -> &[Coordinate] {
        self.frontier.get(step.index()).map_or(&[], Vec::as_slice)
    }

    #[inline]
    fn len(&self) -> usize {
        self.slots.len()
    }
}
