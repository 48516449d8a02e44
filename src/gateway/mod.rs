//! Remote gateway: the three outbound calls a session makes.
//!
//! The gateway is the session's environment. It owns no game state; each
//! call is independent, fallible and never retried by the caller.
//!
//! - [`HttpGateway`] talks JSON-RPC to the maze backend
//! - [`MemoryGateway`] serves a fixed maze and keeps scores in process

mod error;
mod http;
mod memory;
pub mod wire;

pub use error::GatewayError;
pub use http::{HttpGateway, Routes};
pub use memory::MemoryGateway;

use crate::core::Maze;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Date format used by the backend for score timestamps.
pub const SCORE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A completed attempt as stored by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub moves: u32,
    /// Seconds
    pub time_elapsed: u64,
    pub date: NaiveDateTime,
}

/// Outbound calls made by a game session.
#[async_trait::async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Request a fresh maze of `width` x `height` logical cells.
    async fn generate_maze(&self, width: u32, height: u32) -> Result<Maze, GatewayError>;

    /// The player's most recent score, or `None` if there is none yet.
    async fn fetch_last_score(&self) -> Result<Option<ScoreRecord>, GatewayError>;

    async fn save_score(&self, moves: u32, time_elapsed: u64) -> Result<(), GatewayError>;
}
