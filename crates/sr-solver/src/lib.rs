//! `sr-solver` — maximum-survival routing through a time-varying hazard field.
//!
//! # Forward DP over a time-expanded grid
//!
//! ```text
//! seed origin at T0 with confidence 1 - risk(hazard(origin, H0))
//! for t in 0..total_steps-1:
//!   for every populated slot (x, y, t):           ← insertion order
//!     ① Fatal check — hazard(x, y) ≥ hard_ceiling suppresses movement
//!     ② Moves      — four orthogonal neighbours at t+1,
//!                    confidence *= 1 - risk(hazard(neighbour, layer(t+1)))
//!     ③ Stay       — same cell at t+1; re-priced only on an hour boundary
//!     ④ Prune      — outside grid, or too far from the reference destination
//!     ⑤ Merge      — try_insert: keep the strictly better value per slot
//! for every destination:
//!   best_over_time(destination) → reconstruct parent chain → Path
//! ```
//!
//! Step `t+1` is only ever derived from step `t`, and `advance(t)` completes
//! every merge before `advance(t+1)` starts.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`pruner`]   | `FeasibilityPruner` — bounds + reference-distance horizon   |
//! | [`store`]    | `StateStore` trait, `State`, `DenseStore`, `StoreKind`     |
//! | [`sparse`]   | `SparseStore` — hash-keyed alternative store               |
//! | [`engine`]   | `StepEngine`, `StepStats` — one relaxation step            |
//! | [`path`]     | `reconstruct`, `Path`, `Waypoint`                          |
//! | [`solver`]   | `Solver`, `Route`, `RouteOutcome`                          |
//! | [`builder`]  | `SolverBuilder`                                            |
//! | [`observer`] | `SolverObserver`, `NoopObserver`                           |
//! | [`verify`]   | `verify_path` — replay a path against ground truth         |
//! | [`error`]    | `SolveError`, `SolveResult<T>`                             |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Generates successors on Rayon's thread pool.           |
//! | `fx-hash`  | Uses FxHash for the `SparseStore` slot map.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sr_solver::{DenseStore, NoopObserver, SolverBuilder};
//!
//! let mut solver = SolverBuilder::new(config, &field, &risk)
//!     .cities(cities)
//!     .build::<DenseStore>()?;
//! solver.run(&mut NoopObserver)?;
//! for route in solver.routes()? { /* … */ }
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod path;
pub mod pruner;
pub mod solver;
pub mod sparse;
pub mod store;
pub mod verify;


pub use builder::SolverBuilder;
pub use engine::{StepEngine, StepStats};
pub use error::{SolveError, SolveResult};
pub use observer::{NoopObserver, SolverObserver};
pub use path::{Path, Waypoint, reconstruct};
pub use pruner::FeasibilityPruner;
pub use solver::{Route, RouteOutcome, Solver};
pub use sparse::SparseStore;
pub use store::{DenseStore, State, StateStore, StoreKind};
pub use verify::{VerifyHit, VerifyReport, verify_path};
