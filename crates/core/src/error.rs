//! Error types for edgevision-core

use crate::params::SubstitutionError;
use thiserror::Error;

/// Result type alias for edgevision-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for edgevision-core
#[derive(Debug, Error)]
pub enum Error {
    /// Solution lookup failed at instantiation time
    #[error("Solution not found: {0}")]
    SolutionNotFound(String),

    /// Solution failed registration-time validation
    #[error("Invalid solution: {0}")]
    InvalidSolution(String),

    /// A template placeholder had no value in the effective parameters
    #[error(transparent)]
    Unresolved(#[from] SubstitutionError),

    /// Registry lock was poisoned by a panicking thread
    #[error("Registry lock poisoned: {0}")]
    LockPoisoned(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
