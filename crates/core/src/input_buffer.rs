//! Input buffer - pending turns between movement ticks
//!
//! Turns are stored oldest first together with the movement timer value at
//! the moment they were entered. The timer value is what later decides whether
//! a turn was "early" enough to earn mercy.

use arrayvec::ArrayVec;

use crate::types::{Direction, INPUT_BUFFER_CAPACITY, INPUT_BUFFER_DEPTH};

/// A buffered direction plus the movement timer at enqueue time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferedTurn {
    pub direction: Direction,
    pub input_time: i32,
}

impl BufferedTurn {
    pub fn new(direction: Direction, input_time: i32) -> Self {
        Self {
            direction,
            input_time,
        }
    }
}

/// Bounded FIFO of pending turns (zero allocation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    entries: ArrayVec<BufferedTurn, INPUT_BUFFER_CAPACITY>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BufferedTurn> {
        self.entries.iter()
    }

    /// Oldest pending turn, without removing it
    pub fn first(&self) -> Option<BufferedTurn> {
        self.entries.first().copied()
    }

    /// Direction the snake will face once everything pending is applied
    pub fn effective_next(&self, current: Option<Direction>) -> Option<Direction> {
        self.entries.last().map(|t| t.direction).or(current)
    }

    /// Append a turn unless it repeats the effective next direction.
    ///
    /// Returns whether the turn was stored.
    pub fn enqueue(&mut self, direction: Direction, current: Option<Direction>, timer: i32) -> bool {
        if self.effective_next(current) == Some(direction) {
            return false;
        }
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(BufferedTurn::new(direction, timer));
        true
    }

    /// Keep only the most recent [`INPUT_BUFFER_DEPTH`] turns.
    pub fn truncate_to_recent(&mut self) {
        let len = self.entries.len();
        if len > INPUT_BUFFER_DEPTH {
            self.entries.drain(..len - INPUT_BUFFER_DEPTH);
        }
    }

    /// Pop turns until one is not a reversal of `current`.
    ///
    /// Reversals are discarded. Returns the accepted turn, or `None` when the
    /// buffer held nothing usable (the caller keeps its direction).
    pub fn drain_one(&mut self, current: Direction) -> Option<BufferedTurn> {
        self.truncate_to_recent();
        while !self.entries.is_empty() {
            let turn = self.entries.remove(0);
            if !turn.direction.is_opposite(current) {
                return Some(turn);
            }
        }
        None
    }

    /// Replace the contents with exactly `turns`.
    pub fn reseed(&mut self, turns: &[BufferedTurn]) {
        self.entries.clear();
        for &turn in turns.iter().take(INPUT_BUFFER_CAPACITY) {
            self.entries.push(turn);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
