use sr_core::CoreError;
use sr_hazard::HazardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("solver configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Hazard(#[from] HazardError),

    #[error("store already holds a seeded origin")]
    AlreadySeeded,

    /// `reconstruct` was handed no terminal state.
    #[error("no path found")]
    NoPathFound,

    /// A parent chain that does not lead back to the origin at step 0.
    #[error("state store integrity violated: {0}")]
    Integrity(String),
}

pub type SolveResult<T> = Result<T, SolveError>;
