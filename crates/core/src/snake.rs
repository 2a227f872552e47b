//! Snake body - ordered cells, tail first and head last
//!
//! Alongside the ordered body an occupancy map is kept so that "is this cell
//! part of the body behind the tail" is a constant-time lookup.

use std::collections::VecDeque;

use crate::grid::{Cell, Grid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Tail at the front, head at the back
    body: VecDeque<Cell>,
    occupied: Vec<bool>,
}

impl Snake {
    /// A one-cell snake at `start`
    pub fn new(grid: &Grid, start: Cell) -> Self {
        Self::from_cells(grid, &[start])
    }

    /// Build from tail-first cells. The cells must be distinct and on the grid.
    pub fn from_cells(grid: &Grid, cells: &[Cell]) -> Self {
        debug_assert!(!cells.is_empty(), "snake needs at least one cell");
        let mut occupied = vec![false; grid.capacity()];
        let mut body = VecDeque::with_capacity(grid.capacity());
        for &c in cells {
            debug_assert!(grid.contains(c), "cell {c} is off the grid");
            debug_assert!(!occupied[c], "cell {c} appears twice");
            occupied[c] = true;
            body.push_back(c);
        }
        Self { body, occupied }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Cell {
        self.body[0]
    }

    /// Tail-first cells
    pub fn cells(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Whether `cell` is anywhere in the body
    pub fn occupies(&self, cell: Cell) -> bool {
        self.occupied.get(cell).copied().unwrap_or(false)
    }

    /// Whether moving into `cell` hits the body.
    ///
    /// The tail cell is excluded: it moves out of the way on the same tick.
    pub fn hits_body(&self, cell: Cell) -> bool {
        self.occupies(cell) && cell != self.tail()
    }

    /// Whether `cell` is a wall (`None`) or a body collision
    pub fn is_blocked(&self, cell: Option<Cell>) -> bool {
        match cell {
            Some(c) => self.hits_body(c),
            None => true,
        }
    }

    pub fn push_head(&mut self, cell: Cell) {
        debug_assert!(!self.occupied[cell] || cell == self.tail());
        self.occupied[cell] = true;
        self.body.push_back(cell);
    }

    pub fn pop_tail(&mut self) -> Option<Cell> {
        let tail = self.body.pop_front()?;
        // The old tail may already hold the new head.
        if self.body.back() != Some(&tail) {
            self.occupied[tail] = false;
        }
        Some(tail)
    }

    /// Every cell of `grid` not covered by the body
    pub fn free_cells(&self, grid: &Grid) -> Vec<Cell> {
        grid.cells().filter(|&c| !self.occupies(c)).collect()
    }

    /// Refill `out` with the free cells (reuses the allocation).
    pub fn free_cells_into(&self, grid: &Grid, out: &mut Vec<Cell>) {
        out.clear();
        out.extend(grid.cells().filter(|&c| !self.occupies(c)));
    }
}
