//! Mazerun: session state machine for a single-player grid maze game.
//!
//! A maze is fetched from a remote generator, the player walks a token
//! from the start cell to the end cell with directional input, and the
//! move count and elapsed time of a finished attempt are saved remotely.
//!
//! The crate follows a "pure core, imperative shell" layout:
//!
//! - [`core`]: grid model, movement validation, phases and their history
//! - [`session`]: the [`GameSession`] state machine, which returns effects
//!   instead of performing them, and the [`SessionRunner`] that executes
//!   them on tokio
//! - [`timer`]: the owned tick source behind the elapsed-time counter
//! - [`gateway`]: the three outbound calls, over HTTP or in memory
//!
//! # Example
//!
//! ```rust,no_run
//! use mazerun::config::GameConfig;
//! use mazerun::gateway::HttpGateway;
//! use mazerun::session::{Input, SessionRunner};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GameConfig::from_env()?;
//! let gateway = Arc::new(HttpGateway::from_config(&config)?);
//! let runner = SessionRunner::new(&config, gateway);
//! let mut snapshots = runner.subscribe();
//!
//! let (inputs, rx) = tokio::sync::mpsc::channel(16);
//! let session = tokio::spawn(runner.run(rx));
//!
//! snapshots.wait_for(|s| s.can_start()).await?;
//! inputs.send(Input::Start).await?;
//! inputs.send(Input::Key("ArrowDown".to_string())).await?;
//!
//! drop(inputs);
//! let session = session.await?;
//! println!("{} moves in {}s", session.moves(), session.elapsed());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod gateway;
pub mod logging;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{Direction, Grid, Maze, Phase, Position};
pub use crate::gateway::{GatewayError, RemoteGateway, ScoreRecord};
pub use crate::session::{GameSession, SessionRunner, SessionSnapshot};
