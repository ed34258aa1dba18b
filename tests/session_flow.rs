use std::time::{Duration, Instant};

use energy_snake::board::Board;
use energy_snake::config::{DEFAULT_TICK_INTERVAL_MS, GameConfig, INTRO_TICKS};
use energy_snake::input::{Direction, InputEvent};
use energy_snake::session::{Session, SessionState};
use energy_snake::snake::{Position, Snake};

fn test_config(no_intro: bool) -> GameConfig {
    GameConfig {
        board: Board::new(30, 20),
        tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        food_capacity: 3,
        no_intro,
        seed: Some(7),
    }
}

/// Parks the session's snake one step short of the right wall so the next
/// tick loses the round.
fn doom_snake(session: &mut Session) {
    session.engine.snake = Snake::from_segments(
        vec![
            Position { x: 28, y: 10 },
            Position { x: 27, y: 10 },
            Position { x: 26, y: 10 },
        ],
        Direction::Right,
        20,
    );
}

#[test]
fn intro_finishes_on_its_own_and_play_begins() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(false), t0);
    assert_eq!(session.state(), SessionState::Intro);

    for _ in 0..INTRO_TICKS {
        assert_ne!(session.state(), SessionState::Playing);
        session.tick(t0);
    }

    assert_eq!(session.state(), SessionState::Playing);
}

#[test]
fn quit_during_the_intro_skips_it_instead_of_exiting() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(false), t0);

    session.handle_event(InputEvent::Quit, t0);

    assert_eq!(session.state(), SessionState::Playing);
    assert!(!session.should_quit());

    // A second quit, now in play, really quits.
    session.handle_event(InputEvent::Quit, t0);
    assert!(session.should_quit());
}

#[test]
fn losing_transitions_to_lost_and_freezes_the_round() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(true), t0);
    doom_snake(&mut session);

    session.tick(t0);
    assert_eq!(session.state(), SessionState::Lost);

    // Further ticks change nothing.
    let snapshot = session.snapshot(t0);
    session.tick(t0);
    assert_eq!(session.snapshot(t0).body, snapshot.body);
    assert_eq!(session.state(), SessionState::Lost);
}

#[test]
fn restart_after_losing_yields_a_fresh_round() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(true), t0);
    session.tick(t0);
    doom_snake(&mut session);
    session.tick(t0);
    assert_eq!(session.state(), SessionState::Lost);

    session.handle_event(InputEvent::Restart, t0 + Duration::from_secs(30));

    assert_eq!(session.state(), SessionState::Playing);
    let snapshot = session.snapshot(t0 + Duration::from_secs(30));
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.body.len(), 7);
    assert_eq!(snapshot.head, Position { x: 14, y: 10 });
    assert_eq!(snapshot.energy, snapshot.energy_cap);
    assert_eq!(snapshot.elapsed_play, Duration::ZERO);
}

#[test]
fn elapsed_play_time_excludes_the_paused_stretch() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(true), t0);

    session.handle_event(InputEvent::Pause, t0 + Duration::from_secs(3));
    assert_eq!(session.state(), SessionState::Paused);

    // Long pause, then resume.
    session.handle_event(InputEvent::Pause, t0 + Duration::from_secs(60));
    assert_eq!(session.state(), SessionState::Playing);

    let snapshot = session.snapshot(t0 + Duration::from_secs(64));
    assert_eq!(snapshot.elapsed_play, Duration::from_secs(7));
}

#[test]
fn settings_are_reachable_from_playing_and_paused() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(true), t0);

    session.handle_event(InputEvent::ToggleSettings, t0);
    assert_eq!(session.state(), SessionState::Settings);

    // Close (restarts the round), pause, then open from paused.
    session.handle_event(InputEvent::ToggleSettings, t0);
    assert_eq!(session.state(), SessionState::Playing);
    session.handle_event(InputEvent::Pause, t0);
    session.handle_event(InputEvent::ToggleSettings, t0);
    assert_eq!(session.state(), SessionState::Settings);
}

#[test]
fn closing_settings_applies_the_new_block_capacity_to_a_fresh_round() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(true), t0);

    // Play a little so the restart is observable.
    session.tick(t0);

    session.handle_event(InputEvent::ToggleSettings, t0);
    session.handle_event(InputEvent::SettingIncrease, t0);
    session.handle_event(InputEvent::SettingIncrease, t0);
    session.handle_event(InputEvent::ToggleSettings, t0);

    let snapshot = session.snapshot(t0);
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(snapshot.food_capacity, 5);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.head, Position { x: 14, y: 10 });
    // Blocks for the new round avoid the fresh body.
    for block in &snapshot.foods {
        assert!(!snapshot.body.contains(block));
    }
}

#[test]
fn direction_intents_are_ignored_while_paused() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(true), t0);

    session.handle_event(InputEvent::Pause, t0);
    session.handle_event(InputEvent::Move(Direction::Down), t0);
    session.handle_event(InputEvent::Pause, t0);
    session.tick(t0);

    // The snake kept its spawn heading.
    assert_eq!(session.snapshot(t0).head, Position { x: 15, y: 10 });
}

#[test]
fn snapshot_reflects_the_live_round() {
    let t0 = Instant::now();
    let mut session = Session::new(&test_config(true), t0);

    session.tick(t0);
    let snapshot = session.snapshot(t0);

    assert_eq!(snapshot.state, SessionState::Playing);
    assert_eq!(snapshot.body.len(), 7);
    assert_eq!(snapshot.head, snapshot.body[0]);
    assert_eq!(snapshot.tail, *snapshot.body.last().unwrap());
    assert!(snapshot.foods.len() <= snapshot.food_capacity);
    assert_eq!(snapshot.energy_cap, 30 + 20);
}
