use ratatui::style::Color;
use thiserror::Error;

use crate::board::Board;
use crate::snake::Position;

/// Starting snake body, ordered tail to head.
///
/// The same L-shape every round: five cells heading right, then two down,
/// with the head at `(14, 10)` moving right.
pub const INITIAL_SNAKE_BODY: [Position; 7] = [
    Position { x: 10, y: 8 },
    Position { x: 11, y: 8 },
    Position { x: 12, y: 8 },
    Position { x: 13, y: 8 },
    Position { x: 14, y: 8 },
    Position { x: 14, y: 9 },
    Position { x: 14, y: 10 },
];

/// Smallest board whose interior contains the starting snake.
pub const MIN_BOARD_WIDTH: u16 = 17;
pub const MIN_BOARD_HEIGHT: u16 = 12;

/// Largest board the game will use, whatever the terminal size.
pub const MAX_BOARD_WIDTH: u16 = 90;
pub const MAX_BOARD_HEIGHT: u16 = 40;

/// Energy granted per consumed block. The energy ceiling is
/// [`Board::energy_cap`] (width + height).
pub const ENERGY_PER_FOOD: u16 = 10;

/// Candidate draws per inactive slot before a respawn gives up for the
/// tick and leaves the slot inactive.
pub const RESPAWN_RETRY_LIMIT: u32 = 64;

/// Default number of concurrent energy blocks.
pub const DEFAULT_FOOD_CAPACITY: usize = 5;

/// Upper bound for the energy-block setting.
pub const FOOD_CAPACITY_LIMIT: usize = 8;

/// Base delay between simulation ticks, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Fastest allowed tick delay.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Slowest allowed tick delay.
pub const MAX_TICK_INTERVAL_MS: u64 = 400;

/// Ticks the intro animation runs before play starts on its own.
pub const INTRO_TICKS: u32 = 24;

/// Bounded hand-off size between the input thread and the tick loop.
pub const INPUT_QUEUE_CAPACITY: usize = 64;

/// Render loop sleep between frames, in milliseconds.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Terminal rows reserved below the board for the HUD.
pub const HUD_HEIGHT: u16 = 2;

/// Startup configuration, validated before any tick runs.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub board: Board,
    pub tick_interval_ms: u64,
    pub food_capacity: usize,
    pub no_intro: bool,
    pub seed: Option<u64>,
}

/// Invalid startup configuration. Fatal, surfaced before entering raw
/// terminal mode.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "board {width}x{height} is too small, the game needs at least \
         {MIN_BOARD_WIDTH}x{MIN_BOARD_HEIGHT} cells"
    )]
    BoardTooSmall { width: u16, height: u16 },

    #[error("energy block count {requested} is outside 1..={FOOD_CAPACITY_LIMIT}")]
    FoodCapacityOutOfRange { requested: usize },

    #[error(
        "tick delay {requested_ms}ms is outside \
         {MIN_TICK_INTERVAL_MS}..={MAX_TICK_INTERVAL_MS}ms"
    )]
    TickDelayOutOfRange { requested_ms: u64 },
}

impl GameConfig {
    /// Checks every bound the simulation depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.board.width(), self.board.height());
        if width < MIN_BOARD_WIDTH || height < MIN_BOARD_HEIGHT {
            return Err(ConfigError::BoardTooSmall { width, height });
        }

        if self.food_capacity < 1 || self.food_capacity > FOOD_CAPACITY_LIMIT {
            return Err(ConfigError::FoodCapacityOutOfRange {
                requested: self.food_capacity,
            });
        }

        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS
            || self.tick_interval_ms > MAX_TICK_INTERVAL_MS
        {
            return Err(ConfigError::TickDelayOutOfRange {
                requested_ms: self.tick_interval_ms,
            });
        }

        Ok(())
    }
}

/// Derives the board from the terminal size, leaving room for the HUD and
/// clamping to the maximum playfield.
#[must_use]
pub fn board_for_terminal(cols: u16, rows: u16) -> Board {
    Board::new(
        cols.min(MAX_BOARD_WIDTH),
        rows.saturating_sub(HUD_HEIGHT).min(MAX_BOARD_HEIGHT),
    )
}

/// Glyphs used to draw the playfield entities.
#[derive(Debug, Clone, Copy)]
pub struct GlyphSet {
    pub snake_head: &'static str,
    pub snake_body: &'static str,
    pub snake_tail: &'static str,
    pub food: &'static str,
}

/// Default block-character glyphs.
pub const GLYPHS_UNICODE: GlyphSet = GlyphSet {
    snake_head: "█",
    snake_body: "▓",
    snake_tail: "░",
    food: "◆",
};

/// Plain ASCII glyphs for terminals without block characters.
pub const GLYPHS_ASCII: GlyphSet = GlyphSet {
    snake_head: "@",
    snake_body: "O",
    snake_tail: "o",
    food: "+",
};

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub border_fg: Color,
    pub energy_ok: Color,
    /// Gauge color once energy drops under a quarter of the cap.
    pub energy_low: Color,
    pub hud_text: Color,
    pub hud_muted: Color,
    pub overlay_title: Color,
    pub overlay_footer: Color,
}

/// Classic green-on-dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    border_fg: Color::White,
    energy_ok: Color::Cyan,
    energy_low: Color::Red,
    hud_text: Color::White,
    hud_muted: Color::DarkGray,
    overlay_title: Color::Green,
    overlay_footer: Color::DarkGray,
};

#[cfg(test)]
mod tests {
    use crate::board::Board;

    use super::{
        ConfigError, DEFAULT_TICK_INTERVAL_MS, GameConfig, INITIAL_SNAKE_BODY, MIN_BOARD_HEIGHT,
        MIN_BOARD_WIDTH, board_for_terminal,
    };

    fn config_with_board(board: Board) -> GameConfig {
        GameConfig {
            board,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            food_capacity: 3,
            no_intro: true,
            seed: None,
        }
    }

    #[test]
    fn minimum_board_contains_the_starting_snake() {
        let board = Board::new(MIN_BOARD_WIDTH, MIN_BOARD_HEIGHT);
        for segment in INITIAL_SNAKE_BODY {
            assert!(board.is_interior(segment), "{segment:?} not interior");
        }
        // The first move right must land on a playable cell too.
        assert!(board.is_interior(crate::snake::Position { x: 15, y: 10 }));
    }

    #[test]
    fn undersized_board_is_rejected() {
        let result = config_with_board(Board::new(16, 12)).validate();
        assert!(matches!(result, Err(ConfigError::BoardTooSmall { .. })));
    }

    #[test]
    fn food_capacity_bounds_are_enforced() {
        let mut config = config_with_board(Board::new(30, 20));
        config.food_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FoodCapacityOutOfRange { .. })
        ));

        config.food_capacity = super::FOOD_CAPACITY_LIMIT + 1;
        assert!(config.validate().is_err());

        config.food_capacity = super::FOOD_CAPACITY_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn tick_delay_bounds_are_enforced() {
        let mut config = config_with_board(Board::new(30, 20));
        config.tick_interval_ms = super::MIN_TICK_INTERVAL_MS - 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TickDelayOutOfRange { .. })
        ));

        config.tick_interval_ms = super::MAX_TICK_INTERVAL_MS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn board_for_terminal_clamps_to_the_maximum_playfield() {
        let board = board_for_terminal(200, 80);
        assert_eq!(board.width(), super::MAX_BOARD_WIDTH);
        assert_eq!(board.height(), super::MAX_BOARD_HEIGHT);

        let board = board_for_terminal(40, 22);
        assert_eq!(board.width(), 40);
        assert_eq!(board.height(), 22 - super::HUD_HEIGHT);
    }
}
