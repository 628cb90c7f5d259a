//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `EpiError` via `From` impls, or keep them separate and wrap `EpiError` as
//! one variant.  Both patterns are acceptable; prefer whichever keeps error
//! sites clean.
//!
//! Note the split mandated by the error taxonomy: invalid *parameters* are
//! `EpiError::Config` and surface as `Result`s from constructors; broken
//! *invariants* (an agent indexed past the store, a double cell insert) are
//! bugs and panic at the violation site instead of flowing through here.

use thiserror::Error;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EpiError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `epi-*` crates.
pub type EpiResult<T> = Result<T, EpiError>;
