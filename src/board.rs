use rand::Rng;

use crate::snake::Position;

/// Fixed playing field with a one-cell fatal frame.
///
/// Playable cells are the interior `1..=width-2` × `1..=height-2`; the
/// outermost row and column on each side are border cells and entering one
/// ends the round. The board holds no mutable state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
}

impl Board {
    /// Creates a board. Dimension validity is checked by
    /// [`crate::config::GameConfig::validate`] before a session starts.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        debug_assert!(width >= 3 && height >= 3);
        Self { width, height }
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Returns true when the cell lies on the fatal frame.
    #[must_use]
    pub fn is_border(self, cell: Position) -> bool {
        cell.x == 0
            || cell.y == 0
            || cell.x == i32::from(self.width) - 1
            || cell.y == i32::from(self.height) - 1
    }

    /// Returns true when the cell lies inside the board, border included.
    #[must_use]
    pub fn is_in_bounds(self, cell: Position) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height)
    }

    /// Returns true for playable (non-border, in-bounds) cells.
    #[must_use]
    pub fn is_interior(self, cell: Position) -> bool {
        self.is_in_bounds(cell) && !self.is_border(cell)
    }

    /// Number of playable cells.
    #[must_use]
    pub fn interior_cell_count(self) -> usize {
        usize::from(self.width - 2) * usize::from(self.height - 2)
    }

    /// Draws a uniformly random interior cell.
    #[must_use]
    pub fn random_interior_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(1..=i32::from(self.width) - 2),
            y: rng.gen_range(1..=i32::from(self.height) - 2),
        }
    }

    /// Upper bound for the snake's energy on this board.
    #[must_use]
    pub fn energy_cap(self) -> u16 {
        self.width + self.height
    }
}
