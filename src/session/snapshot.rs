//! Read-only view of a session for the presentation layer.

use super::error::SaveStatus;
use crate::core::{Maze, Phase, Position};
use crate::gateway::ScoreRecord;
use crate::timer::format_elapsed;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub maze: Option<Arc<Maze>>,
    pub player: Position,
    pub moves: u32,
    pub elapsed: u64,
    pub last_score: Option<ScoreRecord>,
    /// Blocking error message, shown instead of the maze
    pub error: Option<String>,
    pub save: SaveStatus,
    /// A maze request is in flight
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed)
    }

    /// Whether a start request would currently be honoured.
    pub fn can_start(&self) -> bool {
        self.phase == Phase::Idle && self.maze.is_some() && !self.loading
    }
}
