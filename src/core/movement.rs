//! Movement validation.
//!
//! The validator is a pure predicate over the destination cell. Callers
//! are expected to only propose single-step offsets produced by
//! [`Position::step`](super::grid::Position::step).

use super::grid::{Grid, Position};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the four cardinal directions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(row, col)` unit offset.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Map a key name to a direction.
    ///
    /// Accepts the DOM-style arrow key names (`ArrowUp`, ...) and the bare
    /// direction words in any case. Anything else is not a direction.
    pub fn from_key(key: &str) -> Option<Self> {
        let name = key.strip_prefix("Arrow").unwrap_or(key);
        match name.to_ascii_lowercase().as_str() {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("unrecognized direction '{s}'"))
    }
}

/// True iff `position` is inside the grid and not a wall.
pub fn is_legal_move(grid: &Grid, position: Position) -> bool {
    grid.cell_type(position).is_ok_and(|cell| !cell.is_wall())
}
