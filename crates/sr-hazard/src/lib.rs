//! `sr-hazard` — the immutable inputs of a solve.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`risk`]      | `RiskModel`, `RiskConfig` — intensity → failure probability |
//! | [`field`]     | `HazardField`, `HazardFieldBuilder`                         |
//! | [`loader`]    | CSV loaders for hazard records, cities, and risk tables     |
//! | [`aggregate`] | `downsample`, `Accumulation` — coarser grids from fine data |
//! | [`error`]     | `HazardError`, `HazardResult<T>`                            |
//!
//! Both `RiskModel` and `HazardField` are validated once at construction and
//! never mutated afterwards; the solver only ever holds shared references.

pub mod aggregate;
pub mod error;
pub mod field;
pub mod loader;
pub mod risk;

#[cfg(test)]
mod tests;

pub use aggregate::{Accumulation, downsample};
pub use error::{HazardError, HazardResult};
pub use field::{HazardField, HazardFieldBuilder};
pub use loader::{
    GridSpec, load_cities_csv, load_cities_reader, load_field_csv, load_field_reader,
    load_risk_csv, load_risk_reader, scan_dimensions_csv, scan_dimensions_reader,
};
pub use risk::{RiskConfig, RiskModel};
