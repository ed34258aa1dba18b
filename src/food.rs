use rand::Rng;
use tracing::warn;

use crate::board::Board;
use crate::config::RESPAWN_RETRY_LIMIT;
use crate::occupancy::Occupancy;
use crate::snake::Position;

/// Fixed-capacity pool of energy blocks.
///
/// Each slot is either inactive or holds the cell of one active block. A
/// block is placed outside the snake's occupied set at the moment of
/// placement; the snake reaching that cell later is a normal consume
/// event.
#[derive(Debug, Clone)]
pub struct FoodField {
    slots: Vec<Option<Position>>,
}

impl FoodField {
    /// Creates a field of `capacity` inactive slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Creates a field with the given blocks pre-activated, remaining
    /// slots inactive. Used to pin block positions in tests.
    #[must_use]
    pub fn with_blocks(capacity: usize, blocks: &[Position]) -> Self {
        debug_assert!(blocks.len() <= capacity);
        let mut slots = vec![None; capacity];
        for (slot, block) in slots.iter_mut().zip(blocks) {
            *slot = Some(*block);
        }
        Self { slots }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Iterates over the cells of all active blocks.
    pub fn active_blocks(&self) -> impl Iterator<Item = Position> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Returns the slot index of an active block at `cell`, if any.
    #[must_use]
    pub fn find_at(&self, cell: Position) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(cell))
    }

    /// Marks a slot inactive. Called on consumption.
    pub fn deactivate(&mut self, index: usize) {
        self.slots[index] = None;
    }

    /// Activates every inactive slot at a random free interior cell.
    ///
    /// Each slot draws at most [`RESPAWN_RETRY_LIMIT`] candidates; a slot
    /// whose draws all land on occupied cells stays inactive until the
    /// next respawn opportunity. Returns the number of slots left
    /// inactive.
    pub fn respawn_all_inactive<R: Rng + ?Sized>(
        &mut self,
        board: Board,
        occupancy: &Occupancy,
        rng: &mut R,
    ) -> usize {
        let mut skipped = 0;

        for index in 0..self.slots.len() {
            if self.slots[index].is_some() {
                continue;
            }

            match self.draw_free_cell(board, occupancy, rng) {
                Some(cell) => self.slots[index] = Some(cell),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(
                skipped,
                retry_limit = RESPAWN_RETRY_LIMIT,
                "no free cell found for energy block, leaving slot inactive"
            );
        }

        skipped
    }

    fn draw_free_cell<R: Rng + ?Sized>(
        &self,
        board: Board,
        occupancy: &Occupancy,
        rng: &mut R,
    ) -> Option<Position> {
        for _ in 0..RESPAWN_RETRY_LIMIT {
            let cell = board.random_interior_cell(rng);
            if !occupancy.contains(cell) && self.find_at(cell).is_none() {
                return Some(cell);
            }
        }
        None
    }
}
