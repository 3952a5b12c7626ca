use sr_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HazardError {
    #[error("hazard configuration error: {0}")]
    Config(String),

    #[error("invalid hazard intensity {0}: must be finite and non-negative")]
    InvalidIntensity(f64),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("hazard parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HazardResult<T> = Result<T, HazardError>;
