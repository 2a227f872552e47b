//! Read-only view of a game for renderers, HUDs and observers.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid};
use crate::types::{Direction, GamePhase, Speed};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub cols: u16,
    pub rows: u16,
    pub speed: Speed,
    /// Tail first, head last
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub heading: Option<Direction>,
    pub episode_id: u32,
    pub frame: u64,
    pub timer: i32,
    pub bonus_delay: i32,
}

impl GameSnapshot {
    pub fn grid(&self) -> Grid {
        Grid::new(self.cols, self.rows)
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.last().copied()
    }

    pub fn coord(&self, cell: Cell) -> (u16, u16) {
        self.grid().to_coord(cell)
    }

    /// Progress caption, e.g. `Snake – (3/100)`
    pub fn caption(&self) -> String {
        format!("Snake – ({}/{})", self.len(), self.capacity())
    }

    /// Directions from segment `index` towards its neighbours in the body.
    ///
    /// The tail-side neighbour comes first. Renderers use this to draw joints.
    pub fn connections(&self, index: usize) -> ArrayVec<Direction, 2> {
        let mut out = ArrayVec::new();
        let Some(&cell) = self.snake.get(index) else {
            return out;
        };
        let grid = self.grid();
        if index > 0 {
            if let Some(d) = grid.direction_between(cell, self.snake[index - 1]) {
                out.push(d);
            }
        }
        if let Some(&next) = self.snake.get(index + 1) {
            if let Some(d) = grid.direction_between(cell, next) {
                out.push(d);
            }
        }
        out
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::WaitingForFirstInput,
            cols: 0,
            rows: 0,
            speed: Speed::Normal,
            snake: Vec::new(),
            food: None,
            heading: None,
            episode_id: 0,
            frame: 0,
            timer: 0,
            bonus_delay: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn bent() -> GameSnapshot {
        // (0,0) -> (1,0) -> (1,1) on a 3x3 grid
        GameSnapshot {
            cols: 3,
            rows: 3,
            snake: vec![0, 1, 4],
            food: Some(8),
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn caption_reports_progress() {
        assert_eq!(bent().caption(), "Snake – (3/9)");
    }

    #[test]
    fn connections_follow_the_body() {
        let s = bent();
        assert_eq!(s.connections(0).as_slice(), &[Right]);
        assert_eq!(s.connections(1).as_slice(), &[Left, Down]);
        assert_eq!(s.connections(2).as_slice(), &[Up]);
        assert!(s.connections(3).is_empty());
    }

    #[test]
    fn lone_head_has_no_connections() {
        let s = GameSnapshot {
            cols: 3,
            rows: 3,
            snake: vec![4],
            ..GameSnapshot::default()
        };
        assert!(s.connections(0).is_empty());
        assert_eq!(s.head(), Some(4));
        assert_eq!(s.coord(4), (1, 1));
    }
}
