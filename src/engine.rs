use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::Board;
use crate::config::ENERGY_PER_FOOD;
use crate::food::FoodField;
use crate::occupancy::Occupancy;
use crate::snake::Snake;

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    EnergyDepleted,
}

/// Outcome of a single simulation tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct StepResult {
    pub collided: bool,
    pub consumed: bool,
}

/// One round of the simulation: snake, energy blocks, and score.
///
/// The engine owns all mutable round state and is driven by exactly one
/// caller per tick. `snake` and `food` are public so tests can pin exact
/// positions before stepping.
#[derive(Debug)]
pub struct Engine {
    board: Board,
    pub snake: Snake,
    pub food: FoodField,
    occupancy: Occupancy,
    rng: StdRng,
    score: u32,
    collided: bool,
    death_reason: Option<DeathReason>,
}

impl Engine {
    /// Creates a fresh round with entropy-seeded block placement.
    #[must_use]
    pub fn new(board: Board, food_capacity: usize) -> Self {
        Self::with_rng(board, food_capacity, StdRng::from_entropy())
    }

    /// Creates a deterministic round for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(board: Board, food_capacity: usize, seed: u64) -> Self {
        Self::with_rng(board, food_capacity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: Board, food_capacity: usize, mut rng: StdRng) -> Self {
        let snake = Snake::spawn(board.energy_cap());
        let mut occupancy = Occupancy::new();
        occupancy.rebuild(snake.body_cells());

        let mut food = FoodField::new(food_capacity);
        food.respawn_all_inactive(board, &occupancy, &mut rng);

        Self {
            board,
            snake,
            food,
            occupancy,
            rng,
            score: 0,
            collided: false,
            death_reason: None,
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Consumption and fatality are both evaluated against the same
    /// prospective head cell, and consumption is resolved first: a tick
    /// that lands on a block and still dies awards the point and the
    /// energy, but the move does not complete. The energy check is the
    /// final authority. On a fatal tick the body does not advance; only
    /// the energy decrement is irreversible.
    pub fn step(&mut self) -> StepResult {
        if self.collided {
            return StepResult {
                collided: true,
                consumed: false,
            };
        }

        self.snake.apply_pending_direction();
        let new_head = self.snake.next_head_position();

        // Collision is tested against the body as it stands before this
        // tick's movement.
        self.occupancy.rebuild(self.snake.body_cells());

        let consumed = match self.food.find_at(new_head) {
            Some(index) => {
                self.food.deactivate(index);
                self.snake.gain_energy(ENERGY_PER_FOOD, self.board.energy_cap());
                self.score += 1;
                true
            }
            None => false,
        };

        // The cell the tail vacates this tick is fair game, unless the
        // snake grows and the tail stays put.
        let tail = self.snake.tail();
        let hits_wall = self.board.is_border(new_head);
        let hits_body = self.occupancy.contains(new_head) && (consumed || new_head != tail);
        let out_of_energy = self.snake.spend_energy() == 0;

        if hits_wall || hits_body || out_of_energy {
            self.collided = true;
            self.death_reason = Some(if hits_wall {
                DeathReason::WallCollision
            } else if hits_body {
                DeathReason::SelfCollision
            } else {
                DeathReason::EnergyDepleted
            });
            return StepResult {
                collided: true,
                consumed,
            };
        }

        self.snake.advance(new_head, consumed);
        self.occupancy.rebuild(self.snake.body_cells());
        if consumed {
            self.food
                .respawn_all_inactive(self.board, &self.occupancy, &mut self.rng);
        }

        StepResult {
            collided: false,
            consumed,
        }
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn collided(&self) -> bool {
        self.collided
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// The occupancy set as of the last rebuild.
    #[must_use]
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::food::FoodField;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{DeathReason, Engine};

    fn quiet_engine(board: Board) -> Engine {
        // No active blocks, so ticks are pure movement.
        let mut engine = Engine::new_with_seed(board, 1, 1);
        engine.food = FoodField::new(1);
        engine
    }

    #[test]
    fn step_moves_the_spawned_snake_one_cell_right() {
        let mut engine = quiet_engine(Board::new(20, 14));

        let result = engine.step();

        assert!(!result.collided);
        assert!(!result.consumed);
        assert_eq!(engine.snake.head(), Position { x: 15, y: 10 });
        assert_eq!(engine.snake.tail(), Position { x: 11, y: 8 });
        assert_eq!(engine.snake.len(), 7);
        assert_eq!(engine.snake.energy(), 20 + 14 - 1);
    }

    #[test]
    fn consuming_a_block_grows_and_scores() {
        let mut engine = quiet_engine(Board::new(20, 14));
        engine.food = FoodField::with_blocks(1, &[Position { x: 15, y: 10 }]);

        let result = engine.step();

        assert!(result.consumed);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.snake.len(), 8);
        // Tail retained on a growth tick.
        assert_eq!(engine.snake.tail(), Position { x: 10, y: 8 });
    }

    #[test]
    fn respawn_after_consumption_avoids_the_new_body() {
        let mut engine = quiet_engine(Board::new(20, 14));
        engine.food = FoodField::with_blocks(2, &[Position { x: 15, y: 10 }]);

        engine.step();

        assert_eq!(engine.food.active_count(), 2);
        for block in engine.food.active_blocks() {
            assert!(!engine.occupancy().contains(block));
        }
    }

    #[test]
    fn moving_into_the_vacating_tail_cell_is_legal() {
        let mut engine = quiet_engine(Board::new(10, 10));
        // 2x2 loop: the head re-enters the cell the tail leaves.
        engine.snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 5, y: 6 },
                Position { x: 6, y: 6 },
                Position { x: 6, y: 5 },
            ],
            Direction::Right,
            20,
        );

        let result = engine.step();

        assert!(!result.collided);
        assert_eq!(engine.snake.head(), Position { x: 6, y: 5 });
    }

    #[test]
    fn moving_into_a_body_cell_is_fatal_and_leaves_the_body() {
        let mut engine = quiet_engine(Board::new(10, 10));
        engine.snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 4, y: 6 },
                Position { x: 5, y: 6 },
                Position { x: 6, y: 6 },
                Position { x: 6, y: 5 },
            ],
            Direction::Down,
            20,
        );

        let result = engine.step();

        assert!(result.collided);
        assert_eq!(engine.death_reason(), Some(DeathReason::SelfCollision));
        assert_eq!(engine.snake.head(), Position { x: 5, y: 5 });
        assert_eq!(engine.snake.len(), 6);
    }

    #[test]
    fn a_collided_engine_refuses_further_steps() {
        let mut engine = quiet_engine(Board::new(10, 10));
        engine.snake = Snake::from_segments(
            vec![Position { x: 8, y: 5 }],
            Direction::Right,
            20,
        );

        assert!(engine.step().collided);
        let length = engine.snake.len();
        let energy = engine.snake.energy();

        let repeat = engine.step();

        assert!(repeat.collided);
        assert!(!repeat.consumed);
        assert_eq!(engine.snake.len(), length);
        assert_eq!(engine.snake.energy(), energy);
    }
}
