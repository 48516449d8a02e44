//! Errors raised by the pure core.

use super::grid::Position;
use super::phase::Phase;
use thiserror::Error;

/// Invariant violations in the grid model.
///
/// A well-formed generator response never produces these; when they do
/// occur they indicate a defect upstream, not a user-recoverable state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Position {position} is outside a {height}x{width} grid")]
    OutOfBounds {
        position: Position,
        height: usize,
        width: usize,
    },

    #[error("Malformed grid: {reason}")]
    MalformedGrid { reason: String },
}

/// Errors from the phase transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Illegal phase transition from '{from}' to '{to}'")]
    Illegal { from: Phase, to: Phase },
}
