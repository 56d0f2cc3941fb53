//! Ethereum Snake - an arcade snake where the food is Ethereum L2s
//!
//! This library provides:
//! - Core game rules driven by external timers (game module)
//! - A primitive drawing surface, icon fallback and TUI renderer (render module)
//! - Keyboard mapping (input module)
//! - Session counters (metrics module)
//! - The interactive terminal host (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
