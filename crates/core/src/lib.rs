//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the snake rules, state management, and simulation logic.
//! It has **no dependencies** on rendering, audio, terminals, or I/O, making it:
//!
//! - **Deterministic**: Same seed and same intents produce identical games
//! - **Testable**: Every rule is exercised by unit tests next to its module
//! - **Portable**: Can run behind any front-end (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: cell indices, coordinates, and bounds-checked stepping
//! - [`input_buffer`]: pending turns with reversal prevention
//! - [`scheduler`]: frames-per-cell countdown and bonus delay
//! - [`snake`]: the ordered body with constant-time occupancy
//! - [`engine`]: advance / mercy / crash / growth decisions per movement tick
//! - [`food`]: seeded uniform food placement
//! - [`game_state`]: phases and the per-frame [`Game::step`]
//! - [`snapshot`]: read-only view for renderers
//! - [`config`]: grid size, speed and seed
//!
//! # Game Rules
//!
//! - The snake moves one cell every `FPC` frames (10 normal, 6 fast)
//! - At most the two most recent buffered turns survive until the next move;
//!   turning straight back is ignored
//! - Turning into your own body early in a cell is forgiven by moving one more
//!   cell first ("mercy")
//! - With a wall or body straight ahead, a few bonus frames are granted before
//!   the crash is final
//! - Filling every cell is a perfect score
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{Game, GameConfig};
//! use tui_snake_core::types::{GameEvent, GamePhase, Intent, Speed};
//!
//! let mut game = Game::new(GameConfig::default().with_seed(7)).unwrap();
//!
//! // The first frame announces the game; the first direction starts it.
//! let events = game.step(&[Intent::MoveRight]);
//! assert_eq!(events, vec![GameEvent::GameStarted(Speed::Normal)]);
//! assert_eq!(game.phase(), GamePhase::Running);
//!
//! let start = game.head();
//! for _ in 0..10 {
//!     game.step(&[]);
//! }
//! assert_eq!(game.head(), start + 1);
//! ```
//!
//! # Timing
//!
//! Call [`Game::step`] once per rendered frame (60 FPS in the terminal
//! runner) with the intents collected since the previous frame.

pub mod config;
pub mod engine;
pub mod food;
pub mod game_state;
pub mod grid;
pub mod input_buffer;
pub mod scheduler;
pub mod snake;
pub mod snapshot;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig, MAX_GRID_CELLS};
pub use engine::{SnakeEngine, TickOutcome};
pub use food::FoodSpawner;
pub use game_state::{buffer_turn, forwarded_event, pause_transition, Game};
pub use grid::{Cell, Grid};
pub use input_buffer::{BufferedTurn, InputBuffer};
pub use scheduler::MovementScheduler;
pub use snake::Snake;
pub use snapshot::GameSnapshot;
