//! Grid model: cells, positions and the maze they form.
//!
//! A [`Grid`] is validated once at construction and never mutated
//! afterwards. Cells are only reachable through [`Grid::cell_type`], so
//! the grid stays the single source of truth for what is a wall.

use super::error::GridError;
use super::movement::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Occupancy of a single grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Cell {
    Path,
    Wall,
}

impl Cell {
    /// Decode the wire representation (`0` = path, `1` = wall).
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Path),
            1 => Some(Self::Wall),
            _ => None,
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Zero-indexed `(row, col)` coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a direction's unit offset.
    ///
    /// Returns `None` when the step would go above row 0 or left of
    /// column 0. Steps past the far edges are left to the grid to reject.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// True iff `other` is exactly one row or one column away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular, non-empty grid of cells.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Grid {
    cells: Vec<Cell>,
    height: usize,
    width: usize,
}

impl Grid {
    /// Build a grid from rows, rejecting ragged or empty input.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::MalformedGrid {
                reason: "grid has no cells".to_string(),
            });
        }

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::MalformedGrid {
                reason: format!(
                    "row {index} has {} cells, expected {width}",
                    row.len()
                ),
            });
        }

        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
            height,
            width,
        })
    }

    /// Build a grid from its wire form, where `1` is a wall and `0` a path.
    pub fn from_wire(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let decoded = rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(|(col, &value)| {
                        Cell::from_wire(value).ok_or_else(|| GridError::MalformedGrid {
                            reason: format!("unknown cell value {value} at ({row}, {col})"),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(decoded)
    }

    /// `(height, width)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.height && position.col < self.width
    }

    pub fn cell_type(&self, position: Position) -> Result<Cell, GridError> {
        if !self.contains(position) {
            return Err(GridError::OutOfBounds {
                position,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.cells[position.row * self.width + position.col])
    }

    /// Iterate rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
}

/// A grid together with its designated start and end cells.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Maze {
    grid: Grid,
    start: Position,
    end: Position,
}

impl Maze {
    /// Both endpoints must lie inside the grid.
    pub fn new(grid: Grid, start: Position, end: Position) -> Result<Self, GridError> {
        for position in [start, end] {
            grid.cell_type(position)?;
        }
        Ok(Self { grid, start, end })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }
}
