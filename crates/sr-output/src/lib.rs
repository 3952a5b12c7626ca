//! `sr-output` — route and progress writers for the stormroute solver.
//!
//! The CSV backend creates three files in the output directory:
//!
//! | File                  | One row per                                   |
//! |-----------------------|-----------------------------------------------|
//! | `paths.csv`           | waypoint of every found route                 |
//! | `route_summaries.csv` | destination, reachable or not                 |
//! | `step_summaries.csv`  | relaxation step                               |
//!
//! Writers implement [`OutputWriter`].  Step rows are produced by
//! [`SolverOutputObserver`], which implements `sr_solver::SolverObserver`;
//! route rows by [`write_routes`] once the solve has finished.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sr_output::{CsvWriter, SolverOutputObserver, write_routes};
//!
//! let mut obs = SolverOutputObserver::new(CsvWriter::new(Path::new("./out"))?);
//! solver.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { return Err(e.into()); }
//! let mut writer = obs.into_writer();
//! write_routes(&mut writer, &solver.routes()?, &solver.clock, day)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SolverOutputObserver;
pub use row::{RouteSummaryRow, StepSummaryRow, WaypointRow};
pub use writer::{OutputWriter, write_routes};
