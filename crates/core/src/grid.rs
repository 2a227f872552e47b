//! Grid module - cell indexing and bounds-checked stepping
//!
//! Cells are linear indices in `[0, cols * rows)`, row-major
//! (`index = x + y * cols`). Stepping off the grid yields `None` rather than
//! wrapping or failing, which is how walls are detected.

use serde::{Deserialize, Serialize};

use crate::types::Direction;

/// Linear cell index
pub type Cell = usize;

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cols: u16,
    rows: u16,
}

impl Grid {
    /// Dimensions are validated by [`crate::GameConfig::validate`]; an empty grid has no cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Total number of cells
    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell < self.capacity()
    }

    /// Cell at `(x, y)`. Only meaningful for in-bounds coordinates.
    #[inline(always)]
    pub fn to_cell(&self, x: u16, y: u16) -> Cell {
        debug_assert!(x < self.cols && y < self.rows, "({x}, {y}) is off the grid");
        x as usize + y as usize * self.cols as usize
    }

    /// Coordinates `(x, y)` of a cell
    #[inline(always)]
    pub fn to_coord(&self, cell: Cell) -> (u16, u16) {
        debug_assert!(self.contains(cell), "cell {cell} is off the grid");
        let cols = self.cols as usize;
        ((cell % cols) as u16, (cell / cols) as u16)
    }

    /// Neighbour of `cell` in `direction`, or `None` past the edge
    pub fn step(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        if !self.contains(cell) {
            return None;
        }
        let (x, y) = self.to_coord(cell);
        let (dx, dy) = direction.delta();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if nx < 0 || nx >= self.cols as i32 || ny < 0 || ny >= self.rows as i32 {
            return None;
        }
        Some(self.to_cell(nx as u16, ny as u16))
    }

    /// Follow several steps in order, stopping at the first one that leaves the grid.
    ///
    /// ```
    /// use tui_snake_core::Grid;
    /// use tui_snake_core::types::Direction;
    ///
    /// let grid = Grid::new(3, 3);
    /// let centre = grid.to_cell(1, 1);
    /// assert_eq!(grid.step_path(centre, &[Direction::Right, Direction::Down]), Some(8));
    /// assert_eq!(grid.step_path(centre, &[Direction::Up, Direction::Up, Direction::Down]), None);
    /// ```
    pub fn step_path(&self, cell: Cell, directions: &[Direction]) -> Option<Cell> {
        directions
            .iter()
            .try_fold(cell, |current, &d| self.step(current, d))
    }

    /// Direction leading from `from` to an adjacent `to`
    pub fn direction_between(&self, from: Cell, to: Cell) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.step(from, d) == Some(to))
    }

    /// Every cell index, in order
    pub fn cells(&self) -> std::ops::Range<Cell> {
        0..self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_and_coord_are_inverse() {
        let grid = Grid::new(7, 4);
        for cell in grid.cells() {
            let (x, y) = grid.to_coord(cell);
            assert!(x < 7 && y < 4);
            assert_eq!(grid.to_cell(x, y), cell);
        }
        assert_eq!(grid.to_cell(3, 2), 3 + 2 * 7);
    }

    #[test]
    fn step_stops_at_walls() {
        let grid = Grid::new(10, 10);
        let corner = grid.to_cell(0, 0);
        assert_eq!(grid.step(corner, Direction::Up), None);
        assert_eq!(grid.step(corner, Direction::Left), None);
        assert_eq!(grid.step(corner, Direction::Right), Some(1));
        assert_eq!(grid.step(corner, Direction::Down), Some(10));

        let far = grid.to_cell(9, 9);
        assert_eq!(grid.step(far, Direction::Right), None);
        assert_eq!(grid.step(far, Direction::Down), None);
    }

    #[test]
    fn step_never_wraps_rows() {
        let grid = Grid::new(4, 3);
        // Right edge of row 0 must not spill into row 1.
        assert_eq!(grid.step(grid.to_cell(3, 0), Direction::Right), None);
        assert_eq!(grid.step(grid.to_cell(0, 1), Direction::Left), None);
    }

    #[test]
    fn step_path_short_circuits() {
        let grid = Grid::new(3, 3);
        let top_left = grid.to_cell(0, 0);
        // Leaving and re-entering is still a miss.
        assert_eq!(
            grid.step_path(top_left, &[Direction::Left, Direction::Right]),
            None
        );
        assert_eq!(grid.step_path(top_left, &[]), Some(top_left));
        assert_eq!(
            grid.step_path(top_left, &[Direction::Right, Direction::Right, Direction::Down]),
            Some(grid.to_cell(2, 1))
        );
    }

    #[test]
    fn step_from_off_grid_cell_is_none() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.step(4, Direction::Up), None);
    }

    #[test]
    fn direction_between_neighbours() {
        let grid = Grid::new(5, 5);
        let c = grid.to_cell(2, 2);
        for d in Direction::ALL {
            let n = grid.step(c, d).unwrap();
            assert_eq!(grid.direction_between(c, n), Some(d));
            assert_eq!(grid.direction_between(n, c), Some(d.opposite()));
        }
        assert_eq!(grid.direction_between(c, grid.to_cell(4, 4)), None);
    }
}
