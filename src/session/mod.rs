//! Game session: the state machine and the loop that drives it.
//!
//! # Key Concepts
//!
//! - **GameSession**: pure state machine over phases, position and counters
//! - **Effects**: side effects the session asks for instead of performing
//! - **SessionRunner**: executes effects and applies their outcomes as events
//!
//! # Example
//!
//! ```rust
//! use mazerun::config::GameConfig;
//! use mazerun::core::{Direction, Grid, Maze, Phase, Position};
//! use mazerun::session::{Effect, GameSession};
//!
//! let grid = Grid::from_wire(&[vec![0, 1], vec![0, 0]]).unwrap();
//! let maze = Maze::new(grid, Position::new(0, 0), Position::new(1, 1)).unwrap();
//! let mut session = GameSession::with_maze(&GameConfig::default(), maze);
//!
//! assert_eq!(session.start_game(), vec![Effect::StartTimer]);
//! session.attempt_move(Direction::Down);
//! let effects = session.attempt_move(Direction::Right);
//!
//! assert_eq!(session.phase(), Phase::Completed);
//! assert!(matches!(
//!     effects.last(),
//!     Some(Effect::SaveScore { moves: 2, elapsed: 0, .. })
//! ));
//! ```

mod error;
mod event;
mod machine;
mod runner;
mod snapshot;

pub use error::{SaveStatus, SessionError};
pub use event::{Effect, Event, Input};
pub use machine::GameSession;
pub use runner::SessionRunner;
pub use snapshot::SessionSnapshot;
