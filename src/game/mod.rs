//! Core game logic module for Ethereum Snake
//!
//! This module contains all the game rules without any I/O or rendering dependencies.
//! The engine is driven by external timers and input, and reports through an observer.

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod observer;
pub mod outcome;
pub mod state;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameConfig, MAX_GRID_SIZE};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome, NO_LAST_L2};
pub use food::{Food, FoodKind};
pub use observer::{GameEvent, GameObserver, Hud, RecordingObserver};
pub use outcome::{EndReason, RunOutcome, SecurityStatus};
pub use state::{GameState, Position, Snake};
