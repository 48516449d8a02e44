//! In-process gateway.

use super::error::GatewayError;
use super::{RemoteGateway, ScoreRecord};
use crate::core::Maze;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    maze: Option<Maze>,
    scores: Vec<ScoreRecord>,
    generate_error: Option<GatewayError>,
    fetch_error: Option<GatewayError>,
    save_error: Option<GatewayError>,
    requested: Vec<(u32, u32)>,
    save_calls: usize,
}

/// [`RemoteGateway`] that serves a fixed maze and keeps scores in memory.
///
/// Each operation can be made to fail on demand, which makes this the
/// environment of choice for exercising a session without a backend.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    inner: Mutex<Inner>,
}

impl MemoryGateway {
    pub fn new(maze: Maze) -> Self {
        Self {
            inner: Mutex::new(Inner {
                maze: Some(maze),
                ..Inner::default()
            }),
        }
    }

    /// Seed the score store. Records are kept newest first.
    pub fn with_scores(self, mut scores: Vec<ScoreRecord>) -> Self {
        scores.sort_by(|a, b| b.date.cmp(&a.date));
        self.lock().scores = scores;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serve `maze` on the next generation request.
    pub fn set_maze(&self, maze: Maze) {
        self.lock().maze = Some(maze);
    }

    /// Make `generate_maze` fail with `error` until cleared with `None`.
    pub fn fail_generation(&self, error: Option<GatewayError>) {
        self.lock().generate_error = error;
    }

    pub fn fail_fetch(&self, error: Option<GatewayError>) {
        self.lock().fetch_error = error;
    }

    pub fn fail_save(&self, error: Option<GatewayError>) {
        self.lock().save_error = error;
    }

    /// Stored scores, newest first.
    pub fn scores(&self) -> Vec<ScoreRecord> {
        self.lock().scores.clone()
    }

    /// Dimensions of every generation request, in call order.
    pub fn requested_dimensions(&self) -> Vec<(u32, u32)> {
        self.lock().requested.clone()
    }

    /// Number of `save_score` calls, including failed ones.
    pub fn save_calls(&self) -> usize {
        self.lock().save_calls
    }
}

#[async_trait::async_trait]
impl RemoteGateway for MemoryGateway {
    async fn generate_maze(&self, width: u32, height: u32) -> Result<Maze, GatewayError> {
        let mut inner = self.lock();
        inner.requested.push((width, height));
        if let Some(error) = inner.generate_error.clone() {
            return Err(error);
        }
        inner
            .maze
            .clone()
            .ok_or_else(|| GatewayError::Rejected("no maze configured".to_string()))
    }

    async fn fetch_last_score(&self) -> Result<Option<ScoreRecord>, GatewayError> {
        let inner = self.lock();
        if let Some(error) = inner.fetch_error.clone() {
            return Err(error);
        }
        Ok(inner.scores.first().cloned())
    }

    async fn save_score(&self, moves: u32, time_elapsed: u64) -> Result<(), GatewayError> {
        let mut inner = self.lock();
        inner.save_calls += 1;
        if let Some(error) = inner.save_error.clone() {
            return Err(error);
        }
        debug!(moves, time_elapsed, "storing score");
        inner.scores.insert(
            0,
            ScoreRecord {
                moves,
                time_elapsed,
                date: Utc::now().naive_utc(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Grid, Position};

    fn maze() -> Maze {
        let grid = Grid::from_wire(&[vec![0, 1], vec![0, 0]]).unwrap();
        Maze::new(grid, Position::new(0, 0), Position::new(1, 1)).unwrap()
    }

    #[tokio::test]
    async fn serves_configured_maze_and_records_dimensions() {
        let gateway = MemoryGateway::new(maze());

        let served = gateway.generate_maze(15, 10).await.unwrap();

        assert_eq!(served, maze());
        assert_eq!(gateway.requested_dimensions(), vec![(15, 10)]);
    }

    #[tokio::test]
    async fn without_maze_generation_is_rejected() {
        let gateway = MemoryGateway::default();
        assert!(matches!(
            gateway.generate_maze(1, 1).await,
            Err(GatewayError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn saved_score_becomes_last_score() {
        let gateway = MemoryGateway::new(maze());
        assert_eq!(gateway.fetch_last_score().await, Ok(None));

        gateway.save_score(12, 30).await.unwrap();
        gateway.save_score(8, 20).await.unwrap();

        let last = gateway.fetch_last_score().await.unwrap().unwrap();
        assert_eq!((last.moves, last.time_elapsed), (8, 20));
        assert_eq!(gateway.scores().len(), 2);
        assert_eq!(gateway.save_calls(), 2);
    }

    #[tokio::test]
    async fn injected_failures_surface_and_clear() {
        let gateway = MemoryGateway::new(maze());
        let error = GatewayError::Transport("connection reset".to_string());

        gateway.fail_save(Some(error.clone()));
        assert_eq!(gateway.save_score(1, 1).await, Err(error.clone()));
        assert_eq!(gateway.save_calls(), 1);
        assert!(gateway.scores().is_empty());

        gateway.fail_save(None);
        assert!(gateway.save_score(1, 1).await.is_ok());

        gateway.fail_fetch(Some(error.clone()));
        assert_eq!(gateway.fetch_last_score().await, Err(error.clone()));

        gateway.fail_generation(Some(error.clone()));
        assert_eq!(gateway.generate_maze(1, 1).await, Err(error));
    }

    #[tokio::test]
    async fn seeded_scores_are_ordered_newest_first() {
        let older = ScoreRecord {
            moves: 50,
            time_elapsed: 90,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        };
        let newer = ScoreRecord {
            moves: 40,
            time_elapsed: 70,
            date: chrono::NaiveDate::from_ymd_opt(2024, 2, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        };
        let gateway = MemoryGateway::new(maze()).with_scores(vec![older, newer.clone()]);

        assert_eq!(gateway.fetch_last_score().await, Ok(Some(newer)));
    }
}
