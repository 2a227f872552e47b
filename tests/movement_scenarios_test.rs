//! Scripted movement scenarios: mercy, late input, bonus delay.

use tui_snake::core::{Game, GameConfig, Grid};
use tui_snake::types::{Direction, GameEvent, GamePhase, Intent};

fn cell(x: u16, y: u16) -> usize {
    Grid::new(10, 10).to_cell(x, y)
}

/// Hook-shaped snake whose head at (4,2) has its own body directly below.
fn hook() -> Game {
    let body = [cell(4, 4), cell(4, 3), cell(3, 3), cell(3, 2), cell(4, 2)];
    Game::from_layout(
        GameConfig::default(),
        &body,
        Direction::Right,
        Some(cell(0, 9)),
    )
    .unwrap()
}

fn idle(game: &mut Game, frames: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        game.step_into(&[], &mut events);
    }
    events
}

#[test]
fn early_turn_into_body_is_deferred_one_cell() {
    let mut game = hook();
    // Timer counts 10, 9, ... so the ninth frame sees timer 2.
    idle(&mut game, 8);
    assert_eq!(game.timer(), 2);
    game.step(&[Intent::MoveDown]);
    idle(&mut game, 1);

    // Due frame: moving down would bite (4,3); mercy keeps the snake in place.
    let events = idle(&mut game, 1);
    assert!(events.is_empty());
    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.head(), cell(4, 2));
    assert_eq!(game.pending_turns(), 2);

    // The replayed turns: right first, then down.
    idle(&mut game, 1);
    assert_eq!(game.head(), cell(5, 2));
    idle(&mut game, 10);
    assert_eq!(game.head(), cell(5, 3));
    assert_eq!(game.heading(), Some(Direction::Down));
    assert_eq!(game.len(), 5);
}

#[test]
fn late_turn_into_body_crashes() {
    let mut game = hook();
    idle(&mut game, 3);
    assert_eq!(game.timer(), 7);
    game.step(&[Intent::MoveDown]);

    let events = idle(&mut game, 7);
    assert_eq!(game.phase(), GamePhase::Dead);
    assert!(events.contains(&GameEvent::GameOverNormal));
    assert_eq!(game.head(), cell(4, 2));
}

#[test]
fn wall_ahead_grants_bonus_frames() {
    // Heading right along the top row, one step from the wall.
    let body = [cell(6, 0), cell(7, 0), cell(8, 0)];
    let mut game =
        Game::from_layout(GameConfig::default(), &body, Direction::Right, Some(cell(0, 9)))
            .unwrap();

    idle(&mut game, 11);
    assert_eq!(game.head(), cell(9, 0));
    assert_eq!(game.bonus_delay(), 4);

    // Nine frames to the due tick, then four stalled frames.
    let events = idle(&mut game, 13);
    assert!(events.is_empty());
    assert_eq!(game.phase(), GamePhase::Running);

    let events = idle(&mut game, 1);
    assert_eq!(events, vec![GameEvent::GameOverNormal]);
    assert_eq!(game.phase(), GamePhase::Dead);
}

#[test]
fn turning_during_the_bonus_window_escapes() {
    let body = [cell(6, 0), cell(7, 0), cell(8, 0)];
    let mut game =
        Game::from_layout(GameConfig::default(), &body, Direction::Right, Some(cell(0, 9)))
            .unwrap();

    idle(&mut game, 11);
    assert_eq!(game.head(), cell(9, 0));

    // Past the regular due tick but inside the bonus delay.
    idle(&mut game, 12);
    assert_eq!(game.phase(), GamePhase::Running);
    game.step(&[Intent::MoveDown]);

    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.head(), cell(9, 1));
    assert_eq!(game.bonus_delay(), 0);
}

#[test]
fn reversal_is_ignored() {
    let body = [cell(2, 5), cell(3, 5), cell(4, 5)];
    let mut game =
        Game::from_layout(GameConfig::default(), &body, Direction::Right, Some(cell(0, 0)))
            .unwrap();

    // Buffered, then discarded when the move is evaluated.
    game.step(&[Intent::MoveLeft]);
    assert_eq!(game.pending_turns(), 1);
    idle(&mut game, 10);
    assert_eq!(game.head(), cell(5, 5));
    assert_eq!(game.heading(), Some(Direction::Right));
    assert_eq!(game.pending_turns(), 0);
}

#[test]
fn only_two_most_recent_turns_survive() {
    let body = [cell(2, 5), cell(3, 5), cell(4, 5)];
    let mut game =
        Game::from_layout(GameConfig::default(), &body, Direction::Right, Some(cell(0, 0)))
            .unwrap();

    // Up, Right, Down queued within one cell: the oldest is dropped.
    game.step(&[Intent::MoveUp, Intent::MoveRight, Intent::MoveDown]);
    assert_eq!(game.pending_turns(), 3);
    idle(&mut game, 10);
    assert_eq!(game.head(), cell(5, 5));
    assert_eq!(game.pending_turns(), 1);
    idle(&mut game, 10);
    assert_eq!(game.head(), cell(5, 6));
}
