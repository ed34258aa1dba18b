use std::collections::VecDeque;

use crate::config::INITIAL_SNAKE_BODY;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the neighboring cell one unit step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Mutable snake state: body, direction intent, and bounded energy.
///
/// The body is a deque with the head at the front. `direction` is the last
/// direction actually applied by a tick; `pending` is the latest valid
/// intent recorded between ticks and is what the next tick will apply.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending: Direction,
    energy: u16,
}

impl Snake {
    /// Creates the fixed seven-segment starting snake heading right.
    #[must_use]
    pub fn spawn(energy: u16) -> Self {
        let mut body = VecDeque::with_capacity(INITIAL_SNAKE_BODY.len());
        // The spawn table is ordered tail to head; pushing each segment to
        // the front leaves the head at the front of the deque.
        for segment in INITIAL_SNAKE_BODY {
            body.push_front(segment);
        }

        Self {
            body,
            direction: Direction::Right,
            pending: Direction::Right,
            energy,
        }
    }

    /// Creates a snake from explicit segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction, energy: u16) -> Self {
        Self {
            body: VecDeque::from(segments),
            direction,
            pending: direction,
            energy,
        }
    }

    /// Records a direction intent for the next tick.
    ///
    /// Rejected (no-op) when `direction` reverses the last applied
    /// direction: the snake cannot move backward into its own neck. Later
    /// valid intents within the same tick window overwrite earlier ones.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.pending = direction;
    }

    /// Promotes the pending intent to the applied direction. Called once
    /// per tick before the head position is computed.
    pub fn apply_pending_direction(&mut self) -> Direction {
        self.direction = self.pending;
        self.direction
    }

    /// Returns the cell the head would move into this tick.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Moves the head to `new_head`. The tail is retained when `grows` is
    /// true, so the body gains one segment; otherwise it is dropped and
    /// the body shifts.
    pub fn advance(&mut self, new_head: Position, grows: bool) {
        if !grows {
            let _ = self.body.pop_back();
        }
        self.body.push_front(new_head);
    }

    /// Adds energy, saturating at `cap`.
    pub fn gain_energy(&mut self, amount: u16, cap: u16) {
        self.energy = (self.energy + amount).min(cap);
    }

    /// Spends one unit of energy (floor at zero) and returns the rest.
    pub fn spend_energy(&mut self) -> u16 {
        self.energy = self.energy.saturating_sub(1);
        self.energy
    }

    #[must_use]
    pub fn energy(&self) -> u16 {
        self.energy
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the last applied movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Iterates over body cells by value, for occupancy rebuilds.
    pub fn body_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }
}
