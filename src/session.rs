use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::Board;
use crate::config::{
    FOOD_CAPACITY_LIMIT, GameConfig, INTRO_TICKS, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS,
};
use crate::engine::{DeathReason, Engine};
use crate::input::{Direction, InputEvent};
use crate::snake::Position;

/// Top-level session mode.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionState {
    Intro,
    Playing,
    Paused,
    Settings,
    Lost,
}

/// Read-only view of the settings overlay for rendering.
#[derive(Debug, Clone, Copy)]
pub struct SettingsView {
    pub cursor: usize,
    pub entries: usize,
    pub max_food_blocks: usize,
    pub limit: usize,
}

/// Immutable per-tick view of the whole simulation, produced once per
/// tick for the renderer. Body is ordered head to tail.
#[derive(Debug, Clone)]
pub struct SimulationSnapshot {
    pub board: Board,
    pub body: Vec<Position>,
    pub head: Position,
    pub tail: Position,
    pub foods: Vec<Position>,
    pub energy: u16,
    pub energy_cap: u16,
    pub score: u32,
    pub state: SessionState,
    pub elapsed_play: Duration,
    pub tick_interval: Duration,
    pub food_capacity: usize,
    pub death_reason: Option<DeathReason>,
    pub intro_ticks_left: u32,
    pub settings: SettingsView,
}

/// Editor model for the settings overlay: a cursor over the entries and
/// the single bounded value it exposes.
#[derive(Debug, Clone, Copy)]
struct SettingsMenu {
    cursor: usize,
    max_food_blocks: usize,
}

const SETTINGS_ENTRIES: usize = 1;

impl SettingsMenu {
    fn next(&mut self) {
        self.cursor = (self.cursor + 1) % SETTINGS_ENTRIES;
    }

    fn prev(&mut self) {
        self.cursor = (self.cursor + SETTINGS_ENTRIES - 1) % SETTINGS_ENTRIES;
    }

    fn increase(&mut self) {
        self.max_food_blocks = (self.max_food_blocks + 1).min(FOOD_CAPACITY_LIMIT);
    }

    fn decrease(&mut self) {
        self.max_food_blocks = self.max_food_blocks.saturating_sub(1).max(1);
    }
}

/// The session controller: owns the engine, drives the
/// Intro/Playing/Paused/Settings/Lost machine, and consumes input events.
///
/// All state here is owned by the tick loop; the input thread only ever
/// produces [`InputEvent`] values that arrive through `handle_events`.
#[derive(Debug)]
pub struct Session {
    pub engine: Engine,
    state: SessionState,
    board: Board,
    seed: Option<u64>,
    tick_interval_ms: u64,
    settings: SettingsMenu,
    intro_ticks_left: u32,
    play_accumulated: Duration,
    play_resumed_at: Option<Instant>,
    quit: bool,
}

impl Session {
    #[must_use]
    pub fn new(config: &GameConfig, now: Instant) -> Self {
        let engine = build_engine(config.board, config.food_capacity, config.seed);
        let state = if config.no_intro {
            SessionState::Playing
        } else {
            SessionState::Intro
        };

        Self {
            engine,
            state,
            board: config.board,
            seed: config.seed,
            tick_interval_ms: config.tick_interval_ms,
            settings: SettingsMenu {
                cursor: 0,
                max_food_blocks: config.food_capacity,
            },
            intro_ticks_left: INTRO_TICKS,
            play_accumulated: Duration::ZERO,
            play_resumed_at: (state == SessionState::Playing).then_some(now),
            quit: false,
        }
    }

    /// Applies a batch of input events drained from the channel. Direction
    /// events record intent on the snake (latest valid one wins); control
    /// events drive the state machine immediately.
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = InputEvent>, now: Instant) {
        for event in events {
            self.handle_event(event, now);
        }
    }

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Move(direction) => self.handle_move(direction),
            InputEvent::Pause => self.handle_pause(now),
            InputEvent::Restart => {
                if self.state == SessionState::Lost {
                    self.reinitialize(now);
                }
            }
            InputEvent::Quit => {
                if self.state == SessionState::Intro {
                    // Quitting the intro skips it, nothing more.
                    self.begin_playing(now);
                } else {
                    self.quit = true;
                }
            }
            InputEvent::ToggleSettings => self.handle_toggle_settings(now),
            InputEvent::SpeedUp => {
                self.tick_interval_ms = (self.tick_interval_ms * 9 / 10).max(MIN_TICK_INTERVAL_MS);
            }
            InputEvent::SpeedDown => {
                self.tick_interval_ms = (self.tick_interval_ms * 11 / 10).min(MAX_TICK_INTERVAL_MS);
            }
            InputEvent::SettingNext => {
                if self.state == SessionState::Settings {
                    self.settings.next();
                }
            }
            InputEvent::SettingPrev => {
                if self.state == SessionState::Settings {
                    self.settings.prev();
                }
            }
            InputEvent::SettingIncrease => {
                if self.state == SessionState::Settings {
                    self.settings.increase();
                }
            }
            InputEvent::SettingDecrease => {
                if self.state == SessionState::Settings {
                    self.settings.decrease();
                }
            }
        }
    }

    /// Advances the session by one tick.
    pub fn tick(&mut self, now: Instant) {
        match self.state {
            SessionState::Intro => {
                self.intro_ticks_left = self.intro_ticks_left.saturating_sub(1);
                if self.intro_ticks_left == 0 {
                    self.begin_playing(now);
                }
            }
            SessionState::Playing => {
                if self.engine.step().collided {
                    self.pause_clock(now);
                    self.state = SessionState::Lost;
                    debug!(
                        score = self.engine.score(),
                        reason = ?self.engine.death_reason(),
                        "round lost"
                    );
                }
            }
            SessionState::Paused | SessionState::Settings | SessionState::Lost => {}
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Current delay between simulation ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Play time so far, excluding paused stretches.
    #[must_use]
    pub fn elapsed_play(&self, now: Instant) -> Duration {
        match self.play_resumed_at {
            Some(resumed_at) => self.play_accumulated + now.duration_since(resumed_at),
            None => self.play_accumulated,
        }
    }

    /// Captures the per-tick view handed to the renderer.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> SimulationSnapshot {
        let snake = &self.engine.snake;
        SimulationSnapshot {
            board: self.board,
            body: snake.segments().copied().collect(),
            head: snake.head(),
            tail: snake.tail(),
            foods: self.engine.food.active_blocks().collect(),
            energy: snake.energy(),
            energy_cap: self.board.energy_cap(),
            score: self.engine.score(),
            state: self.state,
            elapsed_play: self.elapsed_play(now),
            tick_interval: self.tick_interval(),
            food_capacity: self.engine.food.capacity(),
            death_reason: self.engine.death_reason(),
            intro_ticks_left: self.intro_ticks_left,
            settings: SettingsView {
                cursor: self.settings.cursor,
                entries: SETTINGS_ENTRIES,
                max_food_blocks: self.settings.max_food_blocks,
                limit: FOOD_CAPACITY_LIMIT,
            },
        }
    }

    fn handle_move(&mut self, direction: Direction) {
        match self.state {
            SessionState::Playing => self.engine.snake.set_direction(direction),
            // Inside the overlay the direction keys double as value
            // adjustment, like any terminal menu.
            SessionState::Settings => match direction {
                Direction::Up | Direction::Right => self.settings.increase(),
                Direction::Down | Direction::Left => self.settings.decrease(),
            },
            _ => {}
        }
    }

    fn handle_pause(&mut self, now: Instant) {
        match self.state {
            SessionState::Playing => {
                self.pause_clock(now);
                self.state = SessionState::Paused;
            }
            SessionState::Paused => {
                self.resume_clock(now);
                self.state = SessionState::Playing;
            }
            _ => {}
        }
    }

    fn handle_toggle_settings(&mut self, now: Instant) {
        match self.state {
            SessionState::Playing => {
                self.pause_clock(now);
                self.state = SessionState::Settings;
            }
            SessionState::Paused => {
                self.state = SessionState::Settings;
            }
            // Leaving the overlay always starts a fresh round so the new
            // block count takes effect from a clean board.
            SessionState::Settings => self.reinitialize(now),
            _ => {}
        }
    }

    /// Fresh engine, fresh clock, straight into play.
    fn reinitialize(&mut self, now: Instant) {
        self.engine = build_engine(self.board, self.settings.max_food_blocks, self.seed);
        self.play_accumulated = Duration::ZERO;
        self.play_resumed_at = Some(now);
        self.state = SessionState::Playing;
        debug!(
            food_capacity = self.settings.max_food_blocks,
            "session reinitialized"
        );
    }

    fn begin_playing(&mut self, now: Instant) {
        self.state = SessionState::Playing;
        self.intro_ticks_left = 0;
        self.play_resumed_at = Some(now);
    }

    fn pause_clock(&mut self, now: Instant) {
        if let Some(resumed_at) = self.play_resumed_at.take() {
            self.play_accumulated += now.duration_since(resumed_at);
        }
    }

    fn resume_clock(&mut self, now: Instant) {
        if self.play_resumed_at.is_none() {
            self.play_resumed_at = Some(now);
        }
    }
}

fn build_engine(board: Board, food_capacity: usize, seed: Option<u64>) -> Engine {
    match seed {
        Some(seed) => Engine::new_with_seed(board, food_capacity, seed),
        None => Engine::new(board, food_capacity),
    }
}
