//! Gateway error types.

use thiserror::Error;

/// Errors surfaced by a [`RemoteGateway`](super::RemoteGateway) call.
///
/// Every variant is recoverable from the session's point of view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The JSON-RPC envelope carried an error object
    #[error("Remote call failed: {0}")]
    Rpc(String),

    /// The backend answered `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The payload could not be decoded or violates a grid invariant
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
