//! Movement scheduler - fixed-cadence countdown gating movement ticks
//!
//! The timer starts at `FPC` (frames per cell) and counts down once per
//! unpaused frame. A movement tick is due once it reaches zero; a crash is only
//! final once the timer plus the bonus delay reaches zero.

use crate::types::Speed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementScheduler {
    speed: Speed,
    timer: i32,
    bonus_delay: i32,
}

impl MovementScheduler {
    pub fn new(speed: Speed) -> Self {
        Self {
            speed,
            timer: speed.fpc(),
            bonus_delay: 0,
        }
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn fpc(&self) -> i32 {
        self.speed.fpc()
    }

    pub fn timer(&self) -> i32 {
        self.timer
    }

    pub fn bonus_delay(&self) -> i32 {
        self.bonus_delay
    }

    /// Count down one frame (frozen while paused).
    pub fn tick(&mut self, paused: bool) {
        if !paused {
            self.timer = self.timer.saturating_sub(1);
        }
    }

    /// A movement tick should be evaluated
    pub fn due(&self) -> bool {
        self.timer <= 0
    }

    /// The grace period has also run out
    pub fn due_with_bonus(&self) -> bool {
        self.timer.saturating_add(self.bonus_delay) <= 0
    }

    /// Restart the countdown after a committed move
    pub fn reset(&mut self) {
        self.timer = self.fpc();
    }

    pub fn grant_bonus(&mut self) {
        self.bonus_delay = self.speed.bonus_delay();
    }

    pub fn clear_bonus(&mut self) {
        self.bonus_delay = 0;
    }

    /// Whether a turn entered at `input_time` qualifies for mercy (timer below half a cell)
    pub fn is_early(&self, input_time: i32) -> bool {
        input_time < self.speed.mercy_threshold()
    }
}
