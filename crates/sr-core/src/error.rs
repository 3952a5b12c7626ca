//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so bounds violations keep their underlying context
//! all the way up to the driver.

use thiserror::Error;

use crate::{Coordinate, HourLayer, TimeStep};

/// Errors raised by the coordinate and time model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("coordinate {coord} outside {xsize}x{ysize} grid")]
    OutOfBounds {
        coord: Coordinate,
        xsize: u32,
        ysize: u32,
    },

    #[error("time step {step} outside horizon of {total} steps")]
    StepOutOfRange { step: TimeStep, total: u32 },

    #[error("hour layer {layer} outside the {count} layers of the field")]
    LayerOutOfRange { layer: HourLayer, count: u32 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `sr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
