//! HTTP gateway speaking JSON-RPC to the maze backend.

use super::error::GatewayError;
use super::wire::{
    GenerateParams, GenerateReply, LastScoreReply, RpcRequest, RpcResponse, SaveScoreParams,
    SaveScoreReply,
};
use super::{RemoteGateway, ScoreRecord};
use crate::config::GameConfig;
use crate::core::Maze;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Backend route paths, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    pub generate: String,
    pub last_score: String,
    pub save_score: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            generate: "/maze_game/generate".to_string(),
            last_score: "/maze_game/get_last_score".to_string(),
            save_score: "/maze_game/save_score".to_string(),
        }
    }
}

/// [`RemoteGateway`] over HTTP.
///
/// Every call is a `POST` with a JSON-RPC body, bounded by the configured
/// timeout from send until the reply body is decoded.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    routes: Routes,
    timeout: Duration,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            routes: Routes::default(),
            timeout,
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, GatewayError> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    pub fn with_routes(mut self, routes: Routes) -> Self {
        self.routes = routes;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<P, R>(&self, route: &str, params: P) -> Result<R, GatewayError>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        let url = format!("{}{}", self.base_url, route);
        debug!(url = %url, "gateway call");

        let exchange = async {
            let response = self
                .client
                .post(&url)
                .json(&RpcRequest::call(params))
                .send()
                .await
                .map_err(|e| GatewayError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GatewayError::HttpStatus(status.as_u16()));
            }

            let envelope = response
                .json::<RpcResponse<R>>()
                .await
                .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
            Ok::<RpcResponse<R>, GatewayError>(envelope)
        };

        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| GatewayError::Timeout(timeout_ms))??
            .into_result()
    }
}

#[async_trait::async_trait]
impl RemoteGateway for HttpGateway {
    async fn generate_maze(&self, width: u32, height: u32) -> Result<Maze, GatewayError> {
        let reply: GenerateReply = self
            .call(&self.routes.generate, GenerateParams { width, height })
            .await?;
        reply.into_maze()
    }

    async fn fetch_last_score(&self) -> Result<Option<ScoreRecord>, GatewayError> {
        let reply: LastScoreReply = self
            .call(&self.routes.last_score, serde_json::json!({}))
            .await?;
        reply.into_record()
    }

    async fn save_score(&self, moves: u32, time_elapsed: u64) -> Result<(), GatewayError> {
        let reply: SaveScoreReply = self
            .call(
                &self.routes.save_score,
                SaveScoreParams {
                    moves,
                    time_elapsed,
                },
            )
            .await?;
        reply.into_ack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new("http://localhost:8069/", Duration::from_secs(1)).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8069");
    }

    #[test]
    fn default_routes_match_backend() {
        let routes = Routes::default();
        assert_eq!(routes.generate, "/maze_game/generate");
        assert_eq!(routes.last_score, "/maze_game/get_last_score");
        assert_eq!(routes.save_score, "/maze_game/save_score");
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // Port 9 (discard) on loopback is expected to refuse connections.
        let gateway = HttpGateway::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();
        let result = gateway.save_score(1, 1).await;
        assert!(matches!(
            result,
            Err(GatewayError::Transport(_)) | Err(GatewayError::Timeout(_))
        ));
    }
}
