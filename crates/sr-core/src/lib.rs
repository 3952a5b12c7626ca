//! `sr-core` — foundational types for the `stormroute` solver.
//!
//! This crate is a dependency of every other `sr-*` crate.  It intentionally
//! has no `sr-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`coord`]       | `Coordinate`, `Move`, `City`, Manhattan distance      |
//! | [`time`]        | `TimeStep`, `HourLayer`, `StepClock`                  |
//! | [`config`]      | `SolveConfig`                                         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod coord;
pub mod error;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SolveConfig;
pub use coord::{City, Coordinate, Move};
pub use error::{CoreError, CoreResult};
pub use time::{HourLayer, StepClock, TimeStep};
