use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::INPUT_QUEUE_CAPACITY;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Discrete intent values produced by the input thread and consumed once
/// per tick by the session. The input side never touches game state; this
/// vocabulary is the entire interface between the two contexts.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputEvent {
    Move(Direction),
    Pause,
    Restart,
    Quit,
    ToggleSettings,
    SpeedUp,
    SpeedDown,
    SettingNext,
    SettingPrev,
    SettingIncrease,
    SettingDecrease,
}

/// Maps a raw key event to the input vocabulary.
///
/// The mapping is stateless: the input thread must not know what session
/// state the game is in, so setting-edit keys are distinct from movement
/// keys rather than contextual.
#[must_use]
pub fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(InputEvent::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(InputEvent::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(InputEvent::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(InputEvent::Move(Direction::Right)),
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(InputEvent::Pause),
        KeyCode::Char('r') | KeyCode::Enter => Some(InputEvent::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('m') => Some(InputEvent::ToggleSettings),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(InputEvent::SpeedUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(InputEvent::SpeedDown),
        KeyCode::Tab => Some(InputEvent::SettingNext),
        KeyCode::BackTab => Some(InputEvent::SettingPrev),
        KeyCode::Char('>') | KeyCode::Char('.') => Some(InputEvent::SettingIncrease),
        KeyCode::Char('<') | KeyCode::Char(',') => Some(InputEvent::SettingDecrease),
        _ => None,
    }
}

/// Spawns the input thread and returns the receiving end of the hand-off.
///
/// The thread blocks only on the next raw terminal event. Translated
/// events go through a bounded channel with `try_send`: if the queue is
/// full the event is dropped, so the input side can never stall the tick
/// loop and the tick loop never waits on input. The thread is detached
/// and exits with the process (or when terminal input closes).
#[must_use]
pub fn spawn_input_source() -> Receiver<InputEvent> {
    let (tx, rx) = sync_channel(INPUT_QUEUE_CAPACITY);
    thread::spawn(move || read_loop(&tx));
    rx
}

fn read_loop(tx: &SyncSender<InputEvent>) {
    loop {
        let raw = match event::read() {
            Ok(raw) => raw,
            Err(_) => return,
        };

        let Event::Key(key) = raw else { continue };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        if let Some(input) = translate_key(key) {
            let _ = tx.try_send(input);
        }
    }
}
