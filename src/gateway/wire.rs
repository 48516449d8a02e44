//! JSON-RPC wire types for the maze backend.
//!
//! Requests are wrapped as `{"jsonrpc": "2.0", "method": "call", "params": ...}`
//! and replies arrive as `{"jsonrpc": "2.0", "result": ...}` or with an
//! `error` object instead of `result`.

use super::error::GatewayError;
use super::{ScoreRecord, SCORE_DATE_FORMAT};
use crate::core::{Grid, Maze, Position};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing JSON-RPC envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: P,
}

impl<P> RpcRequest<P> {
    pub fn call(params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: "call",
            params,
        }
    }
}

/// Error object carried by a failed JSON-RPC reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcErrorObject {
    #[serde(default)]
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcErrorObject {
    /// Prefer the backend's own message from `data.message` when present.
    fn describe(&self) -> String {
        match self
            .data
            .as_ref()
            .and_then(|d| d.get("message"))
            .and_then(|m| m.as_str())
        {
            Some(detail) => format!("{} ({})", self.message, detail),
            None => self.message.clone(),
        }
    }
}

/// Incoming JSON-RPC envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<R> {
    pub result: Option<R>,
    pub error: Option<RpcErrorObject>,
}

impl<R> RpcResponse<R> {
    pub fn into_result(self) -> Result<R, GatewayError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(GatewayError::Rpc(error.describe())),
            (Some(result), None) => Ok(result),
            (None, None) => Err(GatewayError::InvalidResponse(
                "reply has neither result nor error".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateParams {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maze: Option<Vec<Vec<u8>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateReply {
    /// Validate the payload into a [`Maze`].
    ///
    /// Grid invariant violations are reported as
    /// [`GatewayError::InvalidResponse`].
    pub fn into_maze(self) -> Result<Maze, GatewayError> {
        if !self.success {
            return Err(rejected(self.error));
        }

        let missing = |field: &str| GatewayError::InvalidResponse(format!("missing '{field}'"));
        let rows = self.maze.ok_or_else(|| missing("maze"))?;
        let [start_row, start_col] = self.start.ok_or_else(|| missing("start"))?;
        let [end_row, end_col] = self.end.ok_or_else(|| missing("end"))?;

        let invalid = |e: crate::core::GridError| GatewayError::InvalidResponse(e.to_string());
        let grid = Grid::from_wire(&rows).map_err(invalid)?;
        Maze::new(
            grid,
            Position::new(start_row, start_col),
            Position::new(end_row, end_col),
        )
        .map_err(invalid)
    }

    /// Successful reply for `maze`, echoing its dimensions.
    pub fn from_maze(maze: &Maze, width: u32, height: u32) -> Self {
        let rows = maze
            .grid()
            .rows()
            .map(|row| row.iter().map(|cell| u8::from(cell.is_wall())).collect())
            .collect();
        Self {
            success: true,
            maze: Some(rows),
            start: Some([maze.start().row, maze.start().col]),
            end: Some([maze.end().row, maze.end().col]),
            width: Some(width),
            height: Some(height),
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastScoreReply {
    pub success: bool,
    #[serde(default)]
    pub no_score: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LastScoreReply {
    /// `Ok(None)` means the backend has no score for this player yet.
    pub fn into_record(self) -> Result<Option<ScoreRecord>, GatewayError> {
        if !self.success {
            return Err(rejected(self.error));
        }
        if self.no_score {
            return Ok(None);
        }

        let (Some(moves), Some(time_elapsed), Some(date)) =
            (self.moves, self.time_elapsed, self.date)
        else {
            return Err(GatewayError::InvalidResponse(
                "score reply is missing moves, time_elapsed or date".to_string(),
            ));
        };
        let date = NaiveDateTime::parse_from_str(&date, SCORE_DATE_FORMAT)
            .map_err(|e| GatewayError::InvalidResponse(format!("bad score date '{date}': {e}")))?;

        Ok(Some(ScoreRecord {
            moves,
            time_elapsed,
            date,
        }))
    }

    pub fn from_record(record: Option<&ScoreRecord>) -> Self {
        match record {
            Some(record) => Self {
                success: true,
                moves: Some(record.moves),
                time_elapsed: Some(record.time_elapsed),
                date: Some(record.date.format(SCORE_DATE_FORMAT).to_string()),
                ..Self::default()
            },
            None => Self {
                success: true,
                no_score: true,
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveScoreParams {
    pub moves: u32,
    pub time_elapsed: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveScoreReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveScoreReply {
    pub fn into_ack(self) -> Result<(), GatewayError> {
        if self.success {
            Ok(())
        } else {
            Err(rejected(self.error))
        }
    }
}

fn rejected(error: Option<String>) -> GatewayError {
    GatewayError::Rejected(error.unwrap_or_else(|| "no reason given".to_string()))
}
