//! Optional TOML run configuration.
//!
//! ```toml
//! [solve]
//! steps_per_hour = 30
//! total_steps    = 540
//! hard_ceiling   = 15.0
//!
//! [risk]
//! bucket_width = 0.5
//! bucket_count = 60
//! ```
//!
//! Every table and field may be omitted.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sr_core::SolveConfig;
use sr_hazard::RiskConfig;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub solve: SolveConfig,
    pub risk:  RiskConfig,
}

impl AppConfig {
    /// Read `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.solve.validate()?;
        config.risk.validate()?;
        Ok(config)
    }
}
