//! Events consumed and effects produced by the session.

use crate::core::{Direction, Maze};
use crate::gateway::{GatewayError, ScoreRecord};
use uuid::Uuid;

/// Input delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Direction(Direction),
    /// Raw key name; anything that is not a direction is ignored.
    Key(String),
    Start,
    Reset,
}

/// Everything that can change session state, applied one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Input(Input),
    /// One accepted timer interval
    Tick,
    MazeGenerated {
        request: Uuid,
        result: Result<Maze, GatewayError>,
    },
    LastScoreFetched {
        request: Uuid,
        result: Result<Option<ScoreRecord>, GatewayError>,
    },
    ScoreSaved {
        request: Uuid,
        result: Result<(), GatewayError>,
    },
}

/// Side effect requested by the session, executed by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartTimer,
    StopTimer,
    GenerateMaze {
        request: Uuid,
        width: u32,
        height: u32,
    },
    FetchLastScore {
        request: Uuid,
    },
    SaveScore {
        request: Uuid,
        moves: u32,
        elapsed: u64,
    },
}
