//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (simulation core, terminal rendering, input mapping).
//!
//! # Grid
//!
//! The default playfield is a 10x10 grid of cells. Cells are addressed either
//! by a linear index `x + y * cols` or by a coordinate pair, with `x` growing
//! to the right and `y` growing downward.
//!
//! # Timing
//!
//! All timing is counted in frames, never wall-clock time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_FPS` | 60 | Frames simulated per second by the runner |
//! | `NORMAL_FPC` | 10 | Frames per cell at normal speed |
//! | `FAST_FPC` | 6 | Frames per cell at super speed |
//!
//! The bonus delay granted before an unavoidable crash is `FPC / 2.5` frames
//! (rounded down), and a turn counts as "early" for mercy purposes when it was
//! buffered while the movement timer was still below `FPC / 2`.
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, Intent, Speed};
//!
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! assert_eq!(Direction::from_ordinal(3), Some(Direction::Right));
//!
//! assert_eq!(Speed::Normal.fpc(), 10);
//! assert_eq!(Speed::Fast.bonus_delay(), 2);
//!
//! assert_eq!(Intent::MoveLeft.direction(), Some(Direction::Left));
//! assert_eq!(Intent::TogglePause.direction(), None);
//! ```

use serde::{Deserialize, Serialize};

/// Default grid width in cells
pub const DEFAULT_COLS: u16 = 10;

/// Default grid height in cells
pub const DEFAULT_ROWS: u16 = 10;

/// Frames simulated per second
pub const TARGET_FPS: u32 = 60;

/// Length of one frame in microseconds
pub const FRAME_US: u64 = 1_000_000 / TARGET_FPS as u64;

/// Frames per cell at normal speed
pub const NORMAL_FPC: i32 = 10;

/// Frames per cell at super speed
pub const FAST_FPC: i32 = 6;

/// Pending turns kept when the buffer is drained (older ones are dropped)
pub const INPUT_BUFFER_DEPTH: usize = 2;

/// Hard cap on pending turns between two drains.
pub const INPUT_BUFFER_CAPACITY: usize = 8;

/// Timer value recorded for the turns replayed by a mercy re-seed
pub const MERCY_REPLAY_INPUT_TIME: i32 = 1;


/// The four movement directions, numbered counter-clockwise from up.
///
/// The ordinal matters: the opposite of `d` is `(d + 2) mod 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up = 0,
    Left = 1,
    Down = 2,
    Right = 3,
}

impl Direction {
    /// All directions in ordinal order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Direction for an ordinal in `0..4`
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// The reverse direction
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// assert_eq!(Direction::Down.opposite(), Direction::Up);
    /// ```
    pub fn opposite(self) -> Self {
        Self::ALL[((self.ordinal() + 2) % 4) as usize]
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit vector `(dx, dy)` in grid space (y grows downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "left" | "l" => Some(Direction::Left),
            "down" | "d" => Some(Direction::Down),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        }
    }
}

/// Speed profile selected before a game starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    #[default]
    Normal,
    Fast,
}

impl Speed {
    /// Frames per cell
    pub fn fpc(self) -> i32 {
        match self {
            Speed::Normal => NORMAL_FPC,
            Speed::Fast => FAST_FPC,
        }
    }

    /// Grace frames granted when the way ahead is blocked (`FPC / 2.5`, rounded down)
    pub fn bonus_delay(self) -> i32 {
        self.fpc() * 2 / 5
    }

    /// Turns buffered with a timer value below this count as early
    pub fn mercy_threshold(self) -> i32 {
        self.fpc() / 2
    }

    /// The other profile (menu toggling)
    pub fn toggled(self) -> Self {
        match self {
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Normal,
        }
    }

    /// Parse speed from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Speed;
    ///
    /// assert_eq!(Speed::from_str("FAST"), Some(Speed::Fast));
    /// assert_eq!(Speed::from_str("super"), Some(Speed::Fast));
    /// assert_eq!(Speed::from_str("slow"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Speed::Normal),
            "fast" | "super" => Some(Speed::Fast),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Speed::Normal => "normal",
            Speed::Fast => "fast",
        }
    }
}

/// Abstracted input intents forwarded by the event loop.
///
/// The core never sees raw keys; the runner maps keys to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveUp,
    MoveLeft,
    MoveDown,
    MoveRight,
    /// Toggle pause (running games only)
    TogglePause,
    /// Toggle audio mute; forwarded untouched
    ToggleMute,
    /// Start a fresh game from any phase
    Restart,
    /// Confirm key: restarts after a crash, toggles pause while playing
    Confirm,
    /// Leave to the menu; forwarded untouched
    Escape,
    /// Terminate; handled by the event loop
    Quit,
}

impl Intent {
    /// Direction carried by a move intent
    pub fn direction(self) -> Option<Direction> {
        match self {
            Intent::MoveUp => Some(Direction::Up),
            Intent::MoveLeft => Some(Direction::Left),
            Intent::MoveDown => Some(Direction::Down),
            Intent::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Up => Intent::MoveUp,
            Direction::Left => Intent::MoveLeft,
            Direction::Down => Intent::MoveDown,
            Direction::Right => Intent::MoveRight,
        }
    }
}

/// Named phases of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    WaitingForFirstInput,
    Running,
    Paused,
    Dead,
    PerfectScore,
}

impl GamePhase {
    /// True once the game has ended (crash or full grid)
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Dead | GamePhase::PerfectScore)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::WaitingForFirstInput => "waiting",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::Dead => "dead",
            GamePhase::PerfectScore => "perfect",
        }
    }
}

/// Discrete per-frame events for sound and caption collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh game began at the given speed
    GameStarted(Speed),
    /// The head landed on the food cell
    FoodEaten,
    /// The snake crashed into a wall or itself
    GameOverNormal,
    /// The snake filled every cell
    GameOverPerfect,
    Paused,
    Resumed,
    /// Forwarded mute toggle
    MuteToggled,
    /// Forwarded escape-to-menu request
    MenuRequested,
}

impl GameEvent {
    /// Events that deserve a sound cue. Forwarded events are handled by the
    /// runner instead.
    pub fn is_audible(self) -> bool {
        !matches!(self, GameEvent::MuteToggled | GameEvent::MenuRequested)
    }
}
