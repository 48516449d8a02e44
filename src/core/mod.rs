//! Core game model.
//!
//! This module contains the pure functional core of the game:
//! - The grid model and maze endpoints
//! - Movement validation over the grid
//! - Game phases, their legal transitions and history
//!
//! Nothing in this module performs I/O or touches a clock other than to
//! stamp history entries.

mod error;
mod grid;
mod history;
mod movement;
mod phase;
mod transition;

pub use error::{GridError, TransitionError};
pub use grid::{Cell, Grid, Maze, Position};
pub use history::{PhaseChange, PhaseHistory};
pub use movement::{is_legal_move, Direction};
pub use phase::Phase;
pub use transition::{can_transition, check_transition};
