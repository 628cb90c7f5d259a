use epi_core::EpiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{what} length {got} does not match population {expected}")]
    PopulationMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] EpiError),

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
