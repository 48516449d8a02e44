//! Property-based tests for the session state machine.
//!
//! These tests use proptest to drive sessions over randomly generated
//! mazes and input sequences.

use mazerun::config::GameConfig;
use mazerun::core::{can_transition, Cell, Direction, Grid, Maze, Phase, Position};
use mazerun::session::{Effect, GameSession};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_maze()(height in 1..8usize, width in 1..8usize)
        (
            rows in prop::collection::vec(prop::collection::vec(0..2u8, width), height),
            start in (0..height, 0..width),
            end in (0..height, 0..width),
        ) -> Maze {
        let grid = Grid::from_wire(&rows).unwrap();
        Maze::new(grid, Position::new(start.0, start.1), Position::new(end.0, end.1)).unwrap()
    }
}

fn arbitrary_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn started(maze: Maze) -> (GameSession, Vec<Effect>) {
    let mut session = GameSession::with_maze(&GameConfig::default(), maze);
    let effects = session.start_game();
    (session, effects)
}

fn save_effects(effects: &[Effect]) -> Vec<(u32, u64)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::SaveScore { moves, elapsed, .. } => Some((*moves, *elapsed)),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn moves_are_single_steps_onto_paths(
        maze in arbitrary_maze(),
        directions in prop::collection::vec(arbitrary_direction(), 0..40),
    ) {
        let grid = maze.grid().clone();
        let (mut session, _) = started(maze);

        for direction in directions {
            let before = (session.player(), session.moves(), session.phase());
            session.attempt_move(direction);
            let after = session.player();

            if after == before.0 {
                prop_assert_eq!(session.moves(), before.1);
            } else {
                prop_assert_eq!(before.2, Phase::Playing);
                prop_assert!(before.0.is_adjacent(after));
                prop_assert_eq!(before.0.step(direction), Some(after));
                prop_assert_eq!(grid.cell_type(after), Ok(Cell::Path));
                prop_assert_eq!(session.moves(), before.1 + 1);
            }
        }
    }

    #[test]
    fn completion_saves_exactly_once(
        maze in arbitrary_maze(),
        directions in prop::collection::vec(arbitrary_direction(), 0..40),
        ticks_between in 0..3u8,
    ) {
        let end = maze.end();
        let (mut session, mut effects) = started(maze);

        for direction in directions {
            for _ in 0..ticks_between {
                session.tick();
            }
            effects.extend(session.attempt_move(direction));
        }

        let saves = save_effects(&effects);
        if session.phase() == Phase::Completed {
            prop_assert_eq!(session.player(), end);
            prop_assert_eq!(saves, vec![(session.moves(), session.elapsed())]);
            let ends_with_save = matches!(effects.last(), Some(Effect::SaveScore { .. }));
            prop_assert!(ends_with_save);
            prop_assert!(effects.contains(&Effect::StopTimer));
        } else {
            prop_assert_eq!(session.phase(), Phase::Playing);
            prop_assert!(saves.is_empty());
            prop_assert!(!effects.contains(&Effect::StopTimer));
        }
    }

    #[test]
    fn reset_then_load_is_always_fresh(
        maze in arbitrary_maze(),
        next in arbitrary_maze(),
        directions in prop::collection::vec(arbitrary_direction(), 0..20),
        ticks in 0..10u8,
    ) {
        let (mut session, _) = started(maze);
        for _ in 0..ticks {
            session.tick();
        }
        for direction in directions {
            session.attempt_move(direction);
        }

        let effects = session.reset_game();
        prop_assert_eq!(&effects[0], &Effect::StopTimer);
        let request = effects.iter().find_map(|e| match e {
            Effect::GenerateMaze { request, .. } => Some(*request),
            _ => None,
        }).unwrap();

        let start = next.start();
        session.apply_maze(request, Ok(next));

        prop_assert_eq!(session.phase(), Phase::Idle);
        prop_assert_eq!(session.moves(), 0);
        prop_assert_eq!(session.elapsed(), 0);
        prop_assert_eq!(session.player(), start);
        prop_assert!(session.can_start());
    }

    #[test]
    fn recorded_phase_changes_are_legal(
        maze in arbitrary_maze(),
        steps in prop::collection::vec((arbitrary_direction(), 0..10u8), 0..40),
    ) {
        let mut session = GameSession::with_maze(&GameConfig::default(), maze.clone());

        for (direction, action) in steps {
            match action {
                0 => { session.start_game(); }
                1 => {
                    let effects = session.reset_game();
                    if let Some(Effect::GenerateMaze { request, .. }) = effects.last() {
                        session.apply_maze(*request, Ok(maze.clone()));
                    }
                }
                2 => session.tick(),
                _ => { session.attempt_move(direction); }
            }
        }

        for change in session.history().changes() {
            prop_assert!(can_transition(change.from, change.to));
            prop_assert_ne!(change.from, change.to);
        }
        let path = session.history().get_path();
        for pair in path.windows(2) {
            prop_assert!(can_transition(*pair[0], *pair[1]));
        }
    }

    #[test]
    fn input_outside_playing_never_changes_state(
        maze in arbitrary_maze(),
        directions in prop::collection::vec(arbitrary_direction(), 1..20),
    ) {
        let mut session = GameSession::with_maze(&GameConfig::default(), maze);
        let before = (session.player(), session.moves(), session.phase());

        for direction in directions {
            prop_assert!(session.attempt_move(direction).is_empty());
        }

        prop_assert_eq!((session.player(), session.moves(), session.phase()), before);
    }
}

#[test]
fn three_by_three_with_start_on_end_completes_without_moves() {
    let grid = Grid::from_wire(&[vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]).unwrap();
    let maze = Maze::new(grid, Position::new(1, 1), Position::new(1, 1)).unwrap();

    let (mut session, effects) = started(maze);

    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.moves(), 0);
    assert_eq!(save_effects(&effects), vec![(0, 0)]);
    for direction in Direction::ALL {
        assert!(session.attempt_move(direction).is_empty());
    }
}
