//! The 3-D hazard intensity array and its builder.
//!
//! # Data layout
//!
//! Intensities are stored in one flat `Vec<f64>` in layer-major order:
//!
//! ```text
//! values[ (layer * xsize + x) * ysize + y ]
//! ```
//!
//! A whole hour layer is therefore one contiguous slice, which is what the
//! step engine touches for every source state within one hour.
//!
//! Cells never written by the builder hold 0.0 ("calm").  That is a
//! deliberate default, not a missing-data sentinel; callers that need to
//! detect gaps must track coverage themselves.

use sr_core::{CoreError, Coordinate, HourLayer};

use crate::{HazardError, HazardResult};

// ── HazardField ───────────────────────────────────────────────────────────────

/// Immutable hazard intensity per `(hour layer, x, y)` for one scenario/day.
///
/// Do not construct directly; use [`HazardFieldBuilder`] or one of the
/// loaders in [`crate::loader`].
#[derive(Clone, Debug, PartialEq)]
pub struct HazardField {
    xsize:      u32,
    ysize:      u32,
    hour_count: u32,
    day:        Option<u32>,
    values:     Vec<f64>,
}

impl HazardField {
    #[inline]
    pub fn xsize(&self) -> u32 {
        self.xsize
    }

    #[inline]
    pub fn ysize(&self) -> u32 {
        self.ysize
    }

    #[inline]
    pub fn hour_count(&self) -> u32 {
        self.hour_count
    }

    /// The scenario/day id every input record carried, if known.
    #[inline]
    pub fn day(&self) -> Option<u32> {
        self.day
    }

    /// Intensity at `coord` during `layer`.
    ///
    /// # Errors
    ///
    /// `CoreError::OutOfBounds` (wrapped) for a coordinate outside the grid
    /// and `CoreError::LayerOutOfRange` for a layer past the last hour.
    #[inline]
    pub fn intensity_at(&self, layer: HourLayer, coord: Coordinate) -> HazardResult<f64> {
        coord.check_within(self.xsize, self.ysize)?;
        if layer.0 >= self.hour_count {
            return Err(CoreError::LayerOutOfRange { layer, count: self.hour_count }.into());
        }
        Ok(self.values[self.offset(layer, coord)])
    }

    /// One hour layer as an `x`-major slice of length `xsize * ysize`.
    pub fn layer(&self, layer: HourLayer) -> Option<&[f64]> {
        if layer.0 >= self.hour_count {
            return None;
        }
        let len = self.xsize as usize * self.ysize as usize;
        let start = layer.index() * len;
        Some(&self.values[start..start + len])
    }

    /// Largest intensity anywhere in the field (0.0 for an all-calm field).
    pub fn max_intensity(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    #[inline]
    fn offset(&self, layer: HourLayer, coord: Coordinate) -> usize {
        (layer.index() * self.xsize as usize + coord.x as usize) * self.ysize as usize
            + coord.y as usize
    }
}

// ── HazardFieldBuilder ────────────────────────────────────────────────────────

/// Incremental builder for [`HazardField`].
///
/// Every write is bounds- and value-checked, so a built field is always
/// internally consistent.
pub struct HazardFieldBuilder {
    field: HazardField,
}

impl HazardFieldBuilder {
    /// Start an all-calm field of the given extents.
    pub fn new(xsize: u32, ysize: u32, hour_count: u32) -> HazardResult<Self> {
        if xsize == 0 || ysize == 0 || hour_count == 0 {
            return Err(HazardError::Config(format!(
                "hazard field extents must be non-zero, got {xsize}x{ysize}x{hour_count}"
            )));
        }
        let len = (xsize as usize)
            .checked_mul(ysize as usize)
            .and_then(|n| n.checked_mul(hour_count as usize))
            .ok_or_else(|| {
                HazardError::Config(format!(
                    "hazard field {xsize}x{ysize}x{hour_count} is too large"
                ))
            })?;
        Ok(Self {
            field: HazardField {
                xsize,
                ysize,
                hour_count,
                day: None,
                values: vec![0.0; len],
            },
        })
    }

    /// Record the scenario/day id the data belongs to.
    pub fn day(mut self, day: u32) -> Self {
        self.field.day = Some(day);
        self
    }

    /// Set the intensity of one cell in one hour layer.
    pub fn set(&mut self, layer: HourLayer, coord: Coordinate, intensity: f64) -> HazardResult<()> {
        check_intensity(intensity)?;
        coord.check_within(self.field.xsize, self.field.ysize)?;
        if layer.0 >= self.field.hour_count {
            return Err(CoreError::LayerOutOfRange { layer, count: self.field.hour_count }.into());
        }
        let i = self.field.offset(layer, coord);
        self.field.values[i] = intensity;
        Ok(())
    }

    /// Set every cell of `layer` to `intensity`.
    pub fn fill_layer(&mut self, layer: HourLayer, intensity: f64) -> HazardResult<()> {
        check_intensity(intensity)?;
        let len = self.field.xsize as usize * self.field.ysize as usize;
        if layer.0 >= self.field.hour_count {
            return Err(CoreError::LayerOutOfRange { layer, count: self.field.hour_count }.into());
        }
        let start = layer.index() * len;
        self.field.values[start..start + len].fill(intensity);
        Ok(())
    }

    /// Set the same cell to `intensity` in every hour layer.
    pub fn set_all_hours(&mut self, coord: Coordinate, intensity: f64) -> HazardResult<()> {
        for h in 0..self.field.hour_count {
            self.set(HourLayer(h), coord, intensity)?;
        }
        Ok(())
    }

    pub fn build(self) -> HazardField {
        self.field
    }
}

fn check_intensity(intensity: f64) -> HazardResult<()> {
    if intensity.is_finite() && intensity >= 0.0 {
        Ok(())
    } else {
        Err(HazardError::InvalidIntensity(intensity))
    }
}
