//! Snake & collision engine - one decision per due movement tick
//!
//! On every due tick the engine drains one turn from the input buffer and
//! then either
//!
//! - **forgives** an imminent self-collision when the turn was entered early
//!   and moving one more cell first would avoid it (mercy: the buffer is
//!   re-seeded with "keep going, then turn"),
//! - **crashes** when the way is blocked and the bonus delay is spent,
//! - **stalls** when the way is blocked but grace frames remain,
//! - or **advances** one cell, growing when the food is eaten.
//!
//! After a straight advance the cell ahead is checked; if it is already
//! blocked the scheduler grants a bonus delay so the player has a few extra
//! frames to turn before the next tick's crash check.

use tracing::{debug, trace};

use crate::food::FoodSpawner;
use crate::grid::{Cell, Grid};
use crate::input_buffer::{BufferedTurn, InputBuffer};
use crate::scheduler::MovementScheduler;
use crate::snake::Snake;
use crate::types::{Direction, MERCY_REPLAY_INPUT_TIME};

/// Result of evaluating one due movement tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The head moved one cell; `ate` when it landed on the food
    Advanced { ate: bool },
    /// Self-collision forgiven; turns were replayed into the buffer
    Mercy,
    /// Blocked, but the bonus delay has not run out
    Stalled,
    /// Hit a wall or the body
    Crashed,
    /// The final food filled the grid
    Perfect,
}

#[derive(Debug, Clone)]
pub struct SnakeEngine {
    grid: Grid,
    snake: Snake,
    food: Option<Cell>,
    heading: Option<Direction>,
    prev_heading: Option<Direction>,
    /// Timer value recorded with the last accepted turn
    input_time: i32,
    /// Scratch space for free-cell queries
    free: Vec<Cell>,
}

impl SnakeEngine {
    /// Fresh one-cell snake near the centre, food placed by `spawner`.
    pub fn new(grid: Grid, spawner: &mut FoodSpawner) -> Self {
        let snake = Snake::new(&grid, Self::start_cell(&grid));
        let mut free = Vec::with_capacity(grid.capacity());
        snake.free_cells_into(&grid, &mut free);
        let food = spawner.spawn(&free);

        Self {
            grid,
            snake,
            food,
            heading: None,
            prev_heading: None,
            input_time: 0,
            free,
        }
    }

    /// Engine with a prepared body (tail first), heading and food.
    pub fn with_layout(
        grid: Grid,
        body: &[Cell],
        heading: Option<Direction>,
        food: Option<Cell>,
    ) -> Self {
        let snake = Snake::from_cells(&grid, body);
        debug_assert!(food.map_or(true, |f| !snake.occupies(f)));
        Self {
            grid,
            snake,
            food,
            heading,
            prev_heading: heading,
            input_time: 0,
            free: Vec::with_capacity(grid.capacity()),
        }
    }

    /// Starting cell: one left of and one above the centre.
    pub fn start_cell(grid: &Grid) -> Cell {
        grid.to_cell(
            (grid.cols() / 2).saturating_sub(1),
            (grid.rows() / 2).saturating_sub(1),
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn prev_heading(&self) -> Option<Direction> {
        self.prev_heading
    }

    pub fn input_time(&self) -> i32 {
        self.input_time
    }

    /// Take the first buffered turn as the initial heading without consuming it.
    pub fn adopt_first_heading(&mut self, turn: BufferedTurn) {
        self.heading = Some(turn.direction);
        self.prev_heading = Some(turn.direction);
        self.input_time = turn.input_time;
    }

    /// Evaluate one due movement tick.
    pub fn on_due_tick(
        &mut self,
        buffer: &mut InputBuffer,
        scheduler: &mut MovementScheduler,
        spawner: &mut FoodSpawner,
    ) -> TickOutcome {
        let Some(mut d) = self.heading else {
            debug_assert!(false, "movement tick before the first heading");
            return TickOutcome::Stalled;
        };
        let prev = self.prev_heading.unwrap_or(d);

        if let Some(turn) = buffer.drain_one(d) {
            d = turn.direction;
            self.input_time = turn.input_time;
        }
        self.heading = Some(d);

        let outcome = self.resolve(d, prev, buffer, scheduler, spawner);
        self.prev_heading = Some(d);
        outcome
    }

    fn resolve(
        &mut self,
        d: Direction,
        prev: Direction,
        buffer: &mut InputBuffer,
        scheduler: &mut MovementScheduler,
        spawner: &mut FoodSpawner,
    ) -> TickOutcome {
        let head = self.snake.head();
        let next = self.grid.step(head, d);
        let hits_body = next.is_some_and(|c| self.snake.hits_body(c));

        if hits_body && prev != d && scheduler.is_early(self.input_time) {
            let detour = self.grid.step_path(head, &[prev, d]);
            if !self.snake.is_blocked(detour) {
                buffer.reseed(&[
                    BufferedTurn::new(prev, MERCY_REPLAY_INPUT_TIME),
                    BufferedTurn::new(d, MERCY_REPLAY_INPUT_TIME),
                ]);
                scheduler.clear_bonus();
                debug!(
                    "Mercy at cell {}: replaying {} then {}",
                    head,
                    prev.as_str(),
                    d.as_str()
                );
                return TickOutcome::Mercy;
            }
        }

        let Some(next) = next.filter(|_| !hits_body) else {
            if self.snake.len() >= self.grid.capacity() {
                return TickOutcome::Perfect;
            }
            if scheduler.due_with_bonus() {
                return TickOutcome::Crashed;
            }
            return TickOutcome::Stalled;
        };

        self.snake.push_head(next);
        scheduler.reset();
        scheduler.clear_bonus();

        let ate = self.food == Some(next);
        if ate {
            self.snake.free_cells_into(&self.grid, &mut self.free);
            if self.free.is_empty() {
                self.food = None;
                return TickOutcome::Perfect;
            }
            self.food = spawner.spawn(&self.free);
        } else {
            self.snake.pop_tail();
        }
        trace!("Head -> {} (len {}, ate {})", next, self.snake.len(), ate);

        if prev == d && self.snake.is_blocked(self.grid.step(next, d)) {
            scheduler.grant_bonus();
            debug!(
                "Way ahead of {} blocked, bonus delay {}",
                next,
                scheduler.bonus_delay()
            );
        }

        TickOutcome::Advanced { ate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Speed;
    use Direction::*;

    struct Rig {
        engine: SnakeEngine,
        buffer: InputBuffer,
        scheduler: MovementScheduler,
        spawner: FoodSpawner,
    }

    impl Rig {
        fn new(grid: Grid, body: &[(u16, u16)], heading: Direction, food: (u16, u16)) -> Self {
            Self::with_food(grid, body, heading, Some(grid.to_cell(food.0, food.1)))
        }

        fn with_food(
            grid: Grid,
            body: &[(u16, u16)],
            heading: Direction,
            food: Option<Cell>,
        ) -> Self {
            let cells: Vec<Cell> = body.iter().map(|&(x, y)| grid.to_cell(x, y)).collect();
            Self {
                engine: SnakeEngine::with_layout(grid, &cells, Some(heading), food),
                buffer: InputBuffer::new(),
                scheduler: MovementScheduler::new(Speed::Normal),
                spawner: FoodSpawner::new(5),
            }
        }

        fn press(&mut self, d: Direction, input_time: i32) {
            self.buffer.enqueue(d, self.engine.heading(), input_time);
        }

        fn run_down_timer(&mut self) {
            while !self.scheduler.due() {
                self.scheduler.tick(false);
            }
        }

        fn due_tick(&mut self) -> TickOutcome {
            self.engine
                .on_due_tick(&mut self.buffer, &mut self.scheduler, &mut self.spawner)
        }

        fn head(&self) -> (u16, u16) {
            let e = &self.engine;
            e.grid().to_coord(e.snake().head())
        }
    }

    /// Heading right at (4,2) with the body curled underneath: (4,3) is body,
    /// (5,2) and (5,3) are free.
    fn curled() -> Vec<(u16, u16)> {
        vec![(4, 4), (4, 3), (3, 3), (3, 2), (4, 2)]
    }

    #[test]
    fn start_cell_is_left_of_and_above_centre() {
        assert_eq!(SnakeEngine::start_cell(&Grid::new(10, 10)), 44);
        assert_eq!(SnakeEngine::start_cell(&Grid::new(2, 1)), 0);
    }

    #[test]
    fn new_engine_places_food_off_the_snake() {
        let grid = Grid::new(10, 10);
        let mut spawner = FoodSpawner::new(1);
        let engine = SnakeEngine::new(grid, &mut spawner);
        let food = engine.food().unwrap();
        assert!(!engine.snake().occupies(food));
        assert_eq!(engine.heading(), None);
    }

    #[test]
    fn advance_moves_without_growing() {
        let mut rig = Rig::new(Grid::new(10, 10), &[(1, 1), (2, 1)], Right, (9, 9));
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Advanced { ate: false });
        assert_eq!(rig.head(), (3, 1));
        assert_eq!(rig.engine.snake().len(), 2);
        assert_eq!(rig.scheduler.timer(), 10);
    }

    #[test]
    fn eating_grows_by_one_and_respawns_food() {
        let mut rig = Rig::new(Grid::new(10, 10), &[(1, 1), (2, 1)], Right, (3, 1));
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Advanced { ate: true });
        assert_eq!(rig.engine.snake().len(), 3);
        let food = rig.engine.food().unwrap();
        assert!(!rig.engine.snake().occupies(food));
    }

    #[test]
    fn buffered_turn_is_applied_on_due_tick() {
        let mut rig = Rig::new(Grid::new(10, 10), &[(1, 1), (2, 1)], Right, (9, 9));
        rig.press(Down, 6);
        rig.run_down_timer();
        rig.due_tick();
        assert_eq!(rig.head(), (2, 2));
        assert_eq!(rig.engine.heading(), Some(Down));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut rig = Rig::new(Grid::new(10, 10), &[(1, 1), (2, 1)], Right, (9, 9));
        rig.press(Left, 3);
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Advanced { ate: false });
        assert_eq!(rig.engine.heading(), Some(Right));
        assert_eq!(rig.head(), (3, 1));
    }

    #[test]
    fn moving_into_the_tail_cell_is_allowed() {
        let grid = Grid::new(2, 2);
        // Ring: tail (0,0), head (0,1) facing up into the tail.
        let mut rig = Rig::with_food(grid, &[(0, 0), (1, 0), (1, 1), (0, 1)], Up, None);
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Advanced { ate: false });
        assert_eq!(rig.head(), (0, 0));
    }

    #[test]
    fn early_turn_into_body_earns_mercy() {
        let mut rig = Rig::new(Grid::new(10, 10), &curled(), Right, (9, 9));
        rig.press(Down, 2);
        rig.run_down_timer();

        assert_eq!(rig.due_tick(), TickOutcome::Mercy);
        assert_eq!(rig.head(), (4, 2), "mercy does not move the snake");
        let replay: Vec<_> = rig.buffer.iter().copied().collect();
        assert_eq!(
            replay,
            vec![
                BufferedTurn::new(Right, MERCY_REPLAY_INPUT_TIME),
                BufferedTurn::new(Down, MERCY_REPLAY_INPUT_TIME),
            ]
        );
        assert_eq!(rig.scheduler.bonus_delay(), 0);
        assert_eq!(rig.engine.input_time(), 2);
        assert_eq!(rig.engine.prev_heading(), Some(Down));

        // Still due: the replayed straight move happens on the next frame.
        rig.scheduler.tick(false);
        assert_eq!(rig.due_tick(), TickOutcome::Advanced { ate: false });
        assert_eq!(rig.head(), (5, 2));
        assert_eq!(rig.engine.input_time(), MERCY_REPLAY_INPUT_TIME);
        assert_eq!(rig.engine.prev_heading(), Some(Right));

        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Advanced { ate: false });
        assert_eq!(rig.head(), (5, 3));
        assert_eq!(rig.engine.heading(), Some(Down));
    }

    #[test]
    fn late_turn_into_body_crashes() {
        let mut rig = Rig::new(Grid::new(10, 10), &curled(), Right, (9, 9));
        rig.press(Down, 7);
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Crashed);
        assert_eq!(rig.head(), (4, 2));
    }

    #[test]
    fn no_mercy_when_detour_is_blocked() {
        // Same curl, but (5,3) is also body.
        let body = [(5, 4), (5, 3), (4, 3), (3, 3), (3, 2), (4, 2)];
        let mut rig = Rig::new(Grid::new(10, 10), &body, Right, (9, 9));
        rig.press(Down, 1);
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Crashed);
    }

    #[test]
    fn no_mercy_when_detour_leaves_grid() {
        // Head against the right wall: right-then-down leaves the grid.
        let body = [(9, 4), (9, 3), (8, 3), (8, 2), (9, 2)];
        let mut rig = Rig::new(Grid::new(10, 10), &body, Right, (0, 0));
        rig.press(Down, 1);
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Crashed);
    }

    #[test]
    fn wall_ahead_grants_bonus_then_stalls_then_crashes() {
        let mut rig = Rig::new(Grid::new(10, 10), &[(7, 0), (8, 0)], Right, (0, 9));
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Advanced { ate: false });
        assert_eq!(rig.head(), (9, 0));
        assert_eq!(rig.scheduler.bonus_delay(), 4);

        rig.run_down_timer();
        for _ in 0..4 {
            assert_eq!(rig.due_tick(), TickOutcome::Stalled);
            rig.scheduler.tick(false);
        }
        assert_eq!(rig.due_tick(), TickOutcome::Crashed);
    }

    #[test]
    fn turning_during_bonus_window_escapes() {
        let mut rig = Rig::new(Grid::new(10, 10), &[(7, 0), (8, 0)], Right, (0, 9));
        rig.run_down_timer();
        rig.due_tick();

        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Stalled);
        rig.scheduler.tick(false);
        rig.press(Down, rig.scheduler.timer());
        assert_eq!(rig.due_tick(), TickOutcome::Advanced { ate: false });
        assert_eq!(rig.head(), (9, 1));
        assert_eq!(rig.scheduler.bonus_delay(), 0);
    }

    #[test]
    fn no_bonus_after_a_turn() {
        let mut rig = Rig::new(Grid::new(10, 10), &[(8, 2), (8, 1)], Up, (0, 9));
        rig.press(Right, 6);
        rig.run_down_timer();
        rig.due_tick();
        // Now at (9,1) facing the right wall, but this tick was a turn.
        assert_eq!(rig.head(), (9, 1));
        assert_eq!(rig.scheduler.bonus_delay(), 0);
    }

    #[test]
    fn final_food_is_a_perfect_score() {
        let mut rig = Rig::new(Grid::new(2, 1), &[(0, 0)], Right, (1, 0));
        rig.run_down_timer();
        assert_eq!(rig.due_tick(), TickOutcome::Perfect);
        assert_eq!(rig.engine.snake().len(), 2);
        assert_eq!(rig.engine.food(), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "before the first heading")]
    fn tick_without_heading_is_a_contract_violation() {
        let grid = Grid::new(4, 4);
        let mut engine = SnakeEngine::with_layout(grid, &[5], None, Some(0));
        engine.on_due_tick(
            &mut InputBuffer::new(),
            &mut MovementScheduler::new(Speed::Normal),
            &mut FoodSpawner::new(1),
        );
    }
}
