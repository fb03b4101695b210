//! Error types shared across the sentiment trading core.
//!
//! Pure computation (aggregation, classification) has no failure path; these
//! errors cover the validated boundaries: record ingestion, position sizing,
//! and the paper position lifecycle.

use thiserror::Error;

/// Errors surfaced by the core components.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed or out-of-range input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown position id on close or lookup.
    #[error("position {0} not found")]
    PositionNotFound(i64),

    /// Attempt to close a position that is already closed.
    #[error("position {0} is already closed")]
    PositionAlreadyClosed(i64),
}
