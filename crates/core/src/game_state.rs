//! Game state module - the per-frame simulation step
//!
//! [`Game`] owns every piece of mutable simulation state (snake, input buffer,
//! movement timer, bonus delay, food, phase) and mutates it only inside
//! [`Game::step`]. Intents are handled by small independent functions
//! ([`pause_transition`], [`forwarded_event`], [`buffer_turn`]) composed by the
//! step, followed by the movement evaluation and the timer countdown.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};
use crate::engine::{SnakeEngine, TickOutcome};
use crate::food::FoodSpawner;
use crate::grid::{Cell, Grid};
use crate::input_buffer::InputBuffer;
use crate::scheduler::MovementScheduler;
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, GameEvent, GamePhase, Intent, Speed};

/// Pause toggling: `Running` <-> `Paused`. Other phases ignore it.
pub fn pause_transition(phase: GamePhase) -> Option<(GamePhase, GameEvent)> {
    match phase {
        GamePhase::Running => Some((GamePhase::Paused, GameEvent::Paused)),
        GamePhase::Paused => Some((GamePhase::Running, GameEvent::Resumed)),
        _ => None,
    }
}

/// Intents the core does not interpret, passed on to collaborators.
pub fn forwarded_event(intent: Intent) -> Option<GameEvent> {
    match intent {
        Intent::ToggleMute => Some(GameEvent::MuteToggled),
        Intent::Escape => Some(GameEvent::MenuRequested),
        _ => None,
    }
}

/// Directional buffering for the current phase.
///
/// While paused, directions are discarded and the buffer is emptied.
/// Returns whether the turn was stored.
pub fn buffer_turn(
    phase: GamePhase,
    buffer: &mut InputBuffer,
    heading: Option<Direction>,
    timer: i32,
    direction: Direction,
) -> bool {
    match phase {
        GamePhase::WaitingForFirstInput | GamePhase::Running => {
            buffer.enqueue(direction, heading, timer)
        }
        GamePhase::Paused => {
            buffer.clear();
            false
        }
        GamePhase::Dead | GamePhase::PerfectScore => false,
    }
}

/// Whether an intent ended the frame early
enum Flow {
    Continue,
    Restarted,
}

/// Complete simulation state of one game session
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    phase: GamePhase,
    engine: SnakeEngine,
    buffer: InputBuffer,
    scheduler: MovementScheduler,
    spawner: FoodSpawner,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Frames stepped in the current episode
    frame: u64,
    /// `GameStarted` not yet reported
    announce_start: bool,
}

impl Game {
    /// Create a game waiting for its first direction.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut spawner = FoodSpawner::new(config.seed);
        let engine = SnakeEngine::new(config.grid(), &mut spawner);
        info!(
            "New {}x{} game at {} speed (seed {})",
            config.cols,
            config.rows,
            config.speed.as_str(),
            config.seed
        );

        Ok(Self {
            config,
            phase: GamePhase::WaitingForFirstInput,
            engine,
            buffer: InputBuffer::new(),
            scheduler: MovementScheduler::new(config.speed),
            spawner,
            episode_id: 0,
            frame: 0,
            announce_start: true,
        })
    }

    /// Create a running game from a prepared layout.
    ///
    /// `body` is tail first; every cell must be on the grid and distinct, and
    /// `food` must be off the body. Useful for puzzles and scenario tests.
    pub fn from_layout(
        config: GameConfig,
        body: &[Cell],
        heading: Direction,
        food: Option<Cell>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = SnakeEngine::with_layout(config.grid(), body, Some(heading), food);

        Ok(Self {
            config,
            phase: GamePhase::Running,
            engine,
            buffer: InputBuffer::new(),
            scheduler: MovementScheduler::new(config.speed),
            spawner: FoodSpawner::new(config.seed),
            episode_id: 0,
            frame: 0,
            announce_start: true,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn speed(&self) -> Speed {
        self.config.speed
    }

    /// Snake cells, tail first and head last
    pub fn snake(&self) -> &VecDeque<Cell> {
        self.engine.snake().cells()
    }

    pub fn head(&self) -> Cell {
        self.engine.snake().head()
    }

    /// Food cell; `None` only after a perfect score
    pub fn food(&self) -> Option<Cell> {
        self.engine.food()
    }

    pub fn len(&self) -> usize {
        self.engine.snake().len()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.snake().is_empty()
    }

    /// Number of cells on the grid
    pub fn capacity(&self) -> usize {
        self.grid().capacity()
    }

    pub fn heading(&self) -> Option<Direction> {
        self.engine.heading()
    }

    pub fn timer(&self) -> i32 {
        self.scheduler.timer()
    }

    pub fn bonus_delay(&self) -> i32 {
        self.scheduler.bonus_delay()
    }

    /// Turns waiting in the input buffer
    pub fn pending_turns(&self) -> usize {
        self.buffer.len()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.cols = self.config.cols;
        out.rows = self.config.rows;
        out.speed = self.config.speed;
        out.snake.clear();
        out.snake.extend(self.snake().iter().copied());
        out.food = self.food();
        out.heading = self.heading();
        out.episode_id = self.episode_id;
        out.frame = self.frame;
        out.timer = self.scheduler.timer();
        out.bonus_delay = self.scheduler.bonus_delay();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Run one frame and collect its events.
    pub fn step(&mut self, intents: &[Intent]) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.step_into(intents, &mut events);
        events
    }

    /// Run one frame, appending its events to `events`.
    ///
    /// Intents are applied in order. A restart ends the frame immediately:
    /// the remaining intents are dropped and no movement is evaluated.
    pub fn step_into(&mut self, intents: &[Intent], events: &mut Vec<GameEvent>) {
        if self.announce_start {
            self.announce_start = false;
            events.push(GameEvent::GameStarted(self.config.speed));
        }

        let waiting = self.phase == GamePhase::WaitingForFirstInput;
        for &intent in intents {
            if let Flow::Restarted = self.apply_intent(intent, events) {
                return;
            }
        }

        // A game started this frame makes its first move on a later one.
        if !waiting {
            self.evaluate_movement(events);
        }
        self.scheduler.tick(self.phase == GamePhase::Paused);
        self.frame += 1;
    }

    fn apply_intent(&mut self, intent: Intent, events: &mut Vec<GameEvent>) -> Flow {
        match intent {
            Intent::Restart => {
                self.restart(events);
                return Flow::Restarted;
            }
            Intent::Confirm if self.phase == GamePhase::Dead => {
                self.restart(events);
                return Flow::Restarted;
            }
            Intent::Confirm | Intent::TogglePause => {
                if let Some((phase, event)) = pause_transition(self.phase) {
                    if phase == GamePhase::Paused {
                        self.buffer.clear();
                    }
                    debug!("{} -> {}", self.phase.as_str(), phase.as_str());
                    self.phase = phase;
                    events.push(event);
                }
            }
            Intent::ToggleMute | Intent::Escape => events.extend(forwarded_event(intent)),
            Intent::Quit => {}
            Intent::MoveUp | Intent::MoveLeft | Intent::MoveDown | Intent::MoveRight => {
                let Some(direction) = intent.direction() else {
                    return Flow::Continue;
                };
                let stored = buffer_turn(
                    self.phase,
                    &mut self.buffer,
                    self.engine.heading(),
                    self.scheduler.timer(),
                    direction,
                );
                if stored && self.phase == GamePhase::WaitingForFirstInput {
                    self.start_running();
                }
            }
        }
        Flow::Continue
    }

    /// The first stored direction becomes the heading; later intents of the
    /// same frame already see a running game.
    fn start_running(&mut self) {
        if let Some(first) = self.buffer.first() {
            self.engine.adopt_first_heading(first);
            self.phase = GamePhase::Running;
            debug!("First heading {}", first.direction.as_str());
        }
    }

    fn evaluate_movement(&mut self, events: &mut Vec<GameEvent>) {
        match self.phase {
            GamePhase::Running if self.scheduler.due() => {
                let outcome = self.engine.on_due_tick(
                    &mut self.buffer,
                    &mut self.scheduler,
                    &mut self.spawner,
                );
                match outcome {
                    TickOutcome::Advanced { ate: true } => events.push(GameEvent::FoodEaten),
                    TickOutcome::Advanced { ate: false }
                    | TickOutcome::Mercy
                    | TickOutcome::Stalled => {}
                    TickOutcome::Crashed => {
                        self.phase = GamePhase::Dead;
                        events.push(GameEvent::GameOverNormal);
                        info!(
                            "Game over at length {}/{} after {} frames",
                            self.len(),
                            self.capacity(),
                            self.frame
                        );
                    }
                    TickOutcome::Perfect => {
                        self.phase = GamePhase::PerfectScore;
                        events.push(GameEvent::FoodEaten);
                        events.push(GameEvent::GameOverPerfect);
                        info!(
                            "Perfect score: {} cells after {} frames",
                            self.capacity(),
                            self.frame
                        );
                    }
                }
            }
            _ => {}
        }
    }

    /// Replace this game with a fresh one; the food stream continues.
    fn restart(&mut self, events: &mut Vec<GameEvent>) {
        self.engine = SnakeEngine::new(self.config.grid(), &mut self.spawner);
        self.buffer.clear();
        self.scheduler = MovementScheduler::new(self.config.speed);
        self.phase = GamePhase::WaitingForFirstInput;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.frame = 0;
        self.announce_start = false;
        events.push(GameEvent::GameStarted(self.config.speed));
        info!(
            "Restarted (episode {}, food seed {})",
            self.episode_id,
            self.spawner.seed()
        );
    }
}
