use std::collections::HashSet;

use crate::snake::Position;

/// Authoritative set of cells covered by the snake body.
///
/// Collision tests and food placement go through this set instead of
/// inspecting any rendered representation, so the answer to "is cell C
/// part of the snake" is independent of what glyph happens to be drawn
/// there. Rebuilt from the body once per tick.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashSet<Position>,
}

impl Occupancy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// O(1) membership test.
    #[must_use]
    pub fn contains(&self, cell: Position) -> bool {
        self.cells.contains(&cell)
    }

    /// Replaces the occupancy set with the given body cells.
    pub fn rebuild(&mut self, body: impl IntoIterator<Item = Position>) {
        self.cells.clear();
        self.cells.extend(body);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
