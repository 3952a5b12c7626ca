//! Bucketed intensity → failure-probability lookup.
//!
//! # Bucketing
//!
//! ```text
//! bucket = floor(intensity / bucket_width)      clamped to bucket_count - 1
//! ```
//!
//! Intensities past the end of the table saturate at the last bucket: risk is
//! assumed to plateau for extreme values rather than being undefined.  With
//! the default 60 buckets of 0.5 the table covers winds 0 ..< 30.

use crate::{HazardError, HazardResult};

// ── RiskConfig ────────────────────────────────────────────────────────────────

/// Shape of the probability table a `RiskModel` is built from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiskConfig {
    /// Intensity span covered by one bucket.
    pub bucket_width: f64,
    /// Exact number of probabilities the table must hold.
    pub bucket_count: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self { bucket_width: 0.5, bucket_count: 60 }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> HazardResult<()> {
        if !self.bucket_width.is_finite() || self.bucket_width <= 0.0 {
            return Err(HazardError::Config(format!(
                "bucket_width must be positive and finite, got {}",
                self.bucket_width
            )));
        }
        if self.bucket_count == 0 {
            return Err(HazardError::Config("bucket_count must be at least 1".into()));
        }
        Ok(())
    }
}

// ── RiskModel ─────────────────────────────────────────────────────────────────

/// Maps a hazard intensity to the probability of catastrophic failure when
/// entering (or waiting in) a cell for one hour layer.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskModel {
    probabilities: Vec<f64>,
    bucket_width:  f64,
}

impl RiskModel {
    /// Build a model from a probability table.
    ///
    /// # Errors
    ///
    /// [`HazardError::Config`] if `config` is invalid, the table length
    /// differs from `config.bucket_count`, or any entry lies outside `[0, 1]`.
    pub fn new(probabilities: Vec<f64>, config: &RiskConfig) -> HazardResult<Self> {
        config.validate()?;
        if probabilities.len() != config.bucket_count {
            return Err(HazardError::Config(format!(
                "expected {} probabilities, got {}",
                config.bucket_count,
                probabilities.len()
            )));
        }
        if let Some((i, p)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(HazardError::Config(format!(
                "probability {p} in bucket {i} is outside [0, 1]"
            )));
        }
        Ok(Self { probabilities, bucket_width: config.bucket_width })
    }

    /// A model that assigns the same probability to every intensity.
    pub fn constant(probability: f64, bucket_count: usize) -> HazardResult<Self> {
        let config = RiskConfig { bucket_count, ..RiskConfig::default() };
        Self::new(vec![probability; bucket_count], &config)
    }

    #[inline]
    pub fn bucket_width(&self) -> f64 {
        self.bucket_width
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.probabilities.len()
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Table index for `intensity`, saturating at the last bucket.
    pub fn bucket_index(&self, intensity: f64) -> HazardResult<usize> {
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(HazardError::InvalidIntensity(intensity));
        }
        // `as usize` saturates for values beyond usize::MAX.
        let raw = (intensity / self.bucket_width).floor() as usize;
        Ok(raw.min(self.probabilities.len() - 1))
    }

    /// Probability of failure at `intensity`.
    #[inline]
    pub fn probability_of_failure(&self, intensity: f64) -> HazardResult<f64> {
        Ok(self.probabilities[self.bucket_index(intensity)?])
    }

    /// Probability of surviving `intensity`: `1 - probability_of_failure`.
    #[inline]
    pub fn survival(&self, intensity: f64) -> HazardResult<f64> {
        Ok(1.0 - self.probability_of_failure(intensity)?)
    }
}
