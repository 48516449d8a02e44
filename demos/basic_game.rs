//! Basic Maze Game
//!
//! This example plays one full game against the in-memory gateway.
//!
//! Key concepts:
//! - Driving a `SessionRunner` through its input channel
//! - Watching progress through published snapshots
//! - Finding a route with `is_legal_move` alone
//! - Reading the saved score back from the gateway
//!
//! Run with: cargo run --example basic_game

use mazerun::config::GameConfig;
use mazerun::core::{is_legal_move, Direction, Grid, Maze, Phase, Position};
use mazerun::gateway::MemoryGateway;
use mazerun::logging::{init_logging, LogFormat};
use mazerun::session::{Input, SaveStatus, SessionRunner};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::mpsc;

const LAYOUT: [&str; 5] = [".#...", ".#.#.", "...#.", "##.#.", "....."];

fn demo_maze() -> Maze {
    let rows: Vec<Vec<u8>> = LAYOUT
        .iter()
        .map(|row| row.bytes().map(|b| u8::from(b == b'#')).collect())
        .collect();
    let grid = Grid::from_wire(&rows).unwrap();
    Maze::new(grid, Position::new(0, 0), Position::new(0, 4)).unwrap()
}

/// Breadth-first search from start to end, returned as directions.
fn solve(maze: &Maze) -> Vec<Direction> {
    let mut came_from: HashMap<Position, (Position, Direction)> = HashMap::new();
    let mut queue = VecDeque::from([maze.start()]);

    while let Some(current) = queue.pop_front() {
        if current == maze.end() {
            break;
        }
        for direction in Direction::ALL {
            let Some(next) = current.step(direction) else {
                continue;
            };
            if next != maze.start()
                && !came_from.contains_key(&next)
                && is_legal_move(maze.grid(), next)
            {
                came_from.insert(next, (current, direction));
                queue.push_back(next);
            }
        }
    }

    let mut route = Vec::new();
    let mut at = maze.end();
    while let Some(&(previous, direction)) = came_from.get(&at) {
        route.push(direction);
        at = previous;
    }
    route.reverse();
    route
}

#[tokio::main]
async fn main() {
    init_logging(LogFormat::Human, 0);
    println!("=== Basic Maze Game ===\n");

    let maze = demo_maze();
    for row in LAYOUT {
        println!("  {row}");
    }
    let route = solve(&maze);
    println!("\nRoute found: {} steps\n", route.len());

    let config = GameConfig {
        maze_width: 5,
        maze_height: 5,
        tick_interval_ms: 50,
        ..GameConfig::default()
    };
    let gateway = Arc::new(MemoryGateway::new(maze));
    let runner = SessionRunner::new(&config, gateway.clone());
    let mut snapshots = runner.subscribe();
    let (inputs, rx) = mpsc::channel(32);
    let session = tokio::spawn(runner.run(rx));

    snapshots.wait_for(|s| s.can_start()).await.unwrap();
    println!("Maze loaded, starting");
    inputs.send(Input::Start).await.unwrap();

    // Bump into the wall once; it costs nothing.
    inputs.send(Input::Key("ArrowRight".to_string())).await.unwrap();
    for direction in route {
        inputs.send(Input::Direction(direction)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let done = snapshots
        .wait_for(|s| s.phase == Phase::Completed && s.save != SaveStatus::Pending)
        .await
        .unwrap()
        .clone();
    println!(
        "Completed in {} moves, {} ({:?})",
        done.moves,
        done.elapsed_display(),
        done.save
    );

    drop(inputs);
    let session = session.await.unwrap();
    println!("\nPhase history:");
    for change in session.history().changes() {
        println!("  {} -> {} after {} moves", change.from, change.to, change.moves);
    }

    if let Some(score) = gateway.scores().first() {
        println!(
            "\nStored score: {} moves in {}s on {}",
            score.moves, score.time_elapsed, score.date
        );
    }

    println!("\n=== Example Complete ===");
}
