//! The game session state machine.

use super::error::{SaveStatus, SessionError};
use super::event::{Effect, Event, Input};
use super::snapshot::SessionSnapshot;
use crate::config::GameConfig;
use crate::core::{
    check_transition, is_legal_move, Direction, Maze, Phase, PhaseChange, PhaseHistory, Position,
};
use crate::gateway::{GatewayError, ScoreRecord};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

/// State of one player's session.
///
/// All methods are synchronous and free of I/O. Anything that needs the
/// outside world is returned as an [`Effect`] for the runner to execute,
/// and its outcome comes back later as an [`Event`].
#[derive(Debug, Clone)]
pub struct GameSession {
    width: u32,
    height: u32,
    maze: Option<Arc<Maze>>,
    player: Position,
    phase: Phase,
    moves: u32,
    elapsed: u64,
    last_score: Option<ScoreRecord>,
    error: Option<SessionError>,
    save: SaveStatus,
    pending_maze: Option<Uuid>,
    pending_score: Option<Uuid>,
    pending_save: Option<Uuid>,
    history: PhaseHistory,
}

impl GameSession {
    /// Create an empty session. No maze is loaded until
    /// [`request_maze`](Self::request_maze) completes.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            width: config.maze_width,
            height: config.maze_height,
            maze: None,
            player: Position::new(0, 0),
            phase: Phase::Idle,
            moves: 0,
            elapsed: 0,
            last_score: None,
            error: None,
            save: SaveStatus::NotAttempted,
            pending_maze: None,
            pending_score: None,
            pending_save: None,
            history: PhaseHistory::new(),
        }
    }

    /// Create a session with `maze` already loaded and ready to start.
    pub fn with_maze(config: &GameConfig, maze: Maze) -> Self {
        let mut session = Self::new(config);
        session.install(maze);
        session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_deref()
    }

    pub fn last_score(&self) -> Option<&ScoreRecord> {
        self.last_score.as_ref()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn save_status(&self) -> &SaveStatus {
        &self.save
    }

    pub fn is_loading(&self) -> bool {
        self.pending_maze.is_some()
    }

    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    pub fn can_start(&self) -> bool {
        self.phase == Phase::Idle && self.maze.is_some() && !self.is_loading()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            maze: self.maze.clone(),
            player: self.player,
            moves: self.moves,
            elapsed: self.elapsed,
            last_score: self.last_score.clone(),
            error: self.error.as_ref().map(ToString::to_string),
            save: self.save.clone(),
            loading: self.is_loading(),
        }
    }

    /// Apply one event.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Input(input) => self.handle_input(input),
            Event::Tick => {
                self.tick();
                Vec::new()
            }
            Event::MazeGenerated { request, result } => self.apply_maze(request, result),
            Event::LastScoreFetched { request, result } => {
                self.apply_last_score(request, result);
                Vec::new()
            }
            Event::ScoreSaved { request, result } => {
                self.apply_save(request, result);
                Vec::new()
            }
        }
    }

    pub fn handle_input(&mut self, input: Input) -> Vec<Effect> {
        match input {
            Input::Direction(direction) => self.attempt_move(direction),
            Input::Key(key) => self.handle_key(&key),
            Input::Start => self.start_game(),
            Input::Reset => self.reset_game(),
        }
    }

    /// Ask for a fresh maze. Any running attempt is abandoned.
    ///
    /// Only the most recent request's response will be honoured.
    pub fn request_maze(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::StopTimer];
        if self.phase != Phase::Idle {
            self.transition(Phase::Idle);
        }

        let request = Uuid::new_v4();
        self.pending_maze = Some(request);
        self.pending_score = None;
        debug!(%request, width = self.width, height = self.height, "requesting maze");

        effects.push(Effect::GenerateMaze {
            request,
            width: self.width,
            height: self.height,
        });
        effects
    }

    pub fn reset_game(&mut self) -> Vec<Effect> {
        info!(phase = %self.phase, moves = self.moves, "reset requested");
        self.request_maze()
    }

    pub fn apply_maze(&mut self, request: Uuid, result: Result<Maze, GatewayError>) -> Vec<Effect> {
        if self.pending_maze != Some(request) {
            debug!(%request, "discarding stale maze response");
            return Vec::new();
        }
        self.pending_maze = None;

        match result {
            Ok(maze) => {
                let (height, width) = maze.grid().dimensions();
                info!(%request, height, width, start = %maze.start(), end = %maze.end(), "maze loaded");
                self.install(maze);

                let request = Uuid::new_v4();
                self.pending_score = Some(request);
                vec![Effect::FetchLastScore { request }]
            }
            Err(e) => {
                let failure = SessionError::GenerationFailed(e.to_string());
                warn!(%request, error = %failure, "maze generation failed");
                self.maze = None;
                self.player = Position::new(0, 0);
                self.moves = 0;
                self.elapsed = 0;
                self.save = SaveStatus::NotAttempted;
                self.pending_save = None;
                self.error = Some(failure);
                Vec::new()
            }
        }
    }

    pub fn apply_last_score(
        &mut self,
        request: Uuid,
        result: Result<Option<ScoreRecord>, GatewayError>,
    ) {
        if self.pending_score != Some(request) {
            debug!(%request, "discarding stale score response");
            return;
        }
        self.pending_score = None;

        self.last_score = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %SessionError::ScoreFetchFailed(e.to_string()), "showing no last score");
                None
            }
        };
    }

    /// Record the outcome of the save for the current attempt. Replies
    /// for any other attempt are dropped.
    pub fn apply_save(&mut self, request: Uuid, result: Result<(), GatewayError>) {
        if self.pending_save != Some(request) {
            debug!(%request, status = ?self.save, "ignoring save response for a previous attempt");
            return;
        }
        self.pending_save = None;

        self.save = match result {
            Ok(()) => {
                info!(moves = self.moves, elapsed = self.elapsed, "score saved");
                SaveStatus::Saved
            }
            Err(e) => {
                let failure = SessionError::ScoreSaveFailed(e.to_string());
                warn!(error = %failure, "score lost");
                SaveStatus::Failed(failure.to_string())
            }
        };
    }

    /// Idle -> Playing. No-op without a ready maze.
    pub fn start_game(&mut self) -> Vec<Effect> {
        if !self.can_start() {
            debug!(
                phase = %self.phase,
                loaded = self.maze.is_some(),
                loading = self.is_loading(),
                "start ignored"
            );
            return Vec::new();
        }
        let Some(maze) = self.maze.clone() else {
            return Vec::new();
        };

        self.player = maze.start();
        self.moves = 0;
        self.elapsed = 0;
        self.save = SaveStatus::NotAttempted;
        self.transition(Phase::Playing);

        let mut effects = vec![Effect::StartTimer];
        if self.player == maze.end() {
            effects.extend(self.complete());
        }
        effects
    }

    pub fn attempt_move(&mut self, direction: Direction) -> Vec<Effect> {
        if !self.phase.accepts_input() {
            trace!(phase = %self.phase, ?direction, "input ignored");
            return Vec::new();
        }
        let Some(maze) = self.maze.clone() else {
            error!("playing without a maze");
            return Vec::new();
        };

        let Some(candidate) = self.player.step(direction) else {
            trace!(?direction, "move off the grid rejected");
            return Vec::new();
        };
        if !is_legal_move(maze.grid(), candidate) {
            trace!(?direction, %candidate, "move rejected");
            return Vec::new();
        }

        self.player = candidate;
        self.moves = self.moves.saturating_add(1);
        trace!(?direction, position = %candidate, moves = self.moves, "moved");

        if candidate == maze.end() {
            self.complete()
        } else {
            Vec::new()
        }
    }

    /// Move to an explicit coordinate, which must neighbour the player.
    pub fn attempt_step_to(&mut self, target: Position) -> Vec<Effect> {
        let from = self.player;
        let direction = Direction::ALL
            .into_iter()
            .find(|d| from.step(*d) == Some(target));
        match direction {
            Some(direction) => self.attempt_move(direction),
            None => {
                debug!(from = %self.player, to = %target, "non-adjacent step rejected");
                Vec::new()
            }
        }
    }

    pub fn handle_key(&mut self, key: &str) -> Vec<Effect> {
        match Direction::from_key(key) {
            Some(direction) => self.attempt_move(direction),
            None => {
                trace!(key, "unrecognized key ignored");
                Vec::new()
            }
        }
    }

    /// One timer interval. Only counts while playing.
    pub fn tick(&mut self) {
        if self.phase == Phase::Playing {
            self.elapsed = self.elapsed.saturating_add(1);
        } else {
            trace!(phase = %self.phase, "tick ignored");
        }
    }

    /// Release the session's resources.
    pub fn teardown(&mut self) -> Vec<Effect> {
        self.pending_maze = None;
        self.pending_score = None;
        self.pending_save = None;
        vec![Effect::StopTimer]
    }

    fn complete(&mut self) -> Vec<Effect> {
        self.transition(Phase::Completed);
        self.save = SaveStatus::Pending;
        let request = Uuid::new_v4();
        self.pending_save = Some(request);
        info!(%request, moves = self.moves, elapsed = self.elapsed, "maze completed");
        vec![
            Effect::StopTimer,
            Effect::SaveScore {
                request,
                moves: self.moves,
                elapsed: self.elapsed,
            },
        ]
    }

    fn install(&mut self, maze: Maze) {
        if self.phase != Phase::Idle {
            self.transition(Phase::Idle);
        }
        self.player = maze.start();
        self.maze = Some(Arc::new(maze));
        self.moves = 0;
        self.elapsed = 0;
        self.error = None;
        self.save = SaveStatus::NotAttempted;
        self.pending_save = None;
        self.history = PhaseHistory::new();
    }

    fn transition(&mut self, to: Phase) -> bool {
        let from = self.phase;
        if let Err(e) = check_transition(from, to) {
            error!(error = %e, "phase change refused");
            return false;
        }
        if from != to {
            self.history = self.history.record(PhaseChange {
                from,
                to,
                timestamp: Utc::now(),
                moves: self.moves,
                elapsed: self.elapsed,
            });
            info!(%from, %to, "phase change");
        }
        self.phase = to;
        true
    }
}
