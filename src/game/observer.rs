//! Notifications emitted by the engine
//!
//! The engine reports every change the presentation layer cares about
//! through a `GameObserver`. All methods default to no-ops.

use super::outcome::{EndReason, SecurityStatus};

pub trait GameObserver {
    fn on_score(&mut self, _score: u32) {}
    fn on_time(&mut self, _seconds_remaining: u32) {}
    fn on_security(&mut self, _status: SecurityStatus, _danger_count: usize) {}
    fn on_last_l2(&mut self, _identity: &str) {}
    fn on_game_over(&mut self, _reason: EndReason, _final_score: u32) {}
    fn on_win(&mut self, _final_score: u32) {}
}

/// One observer callback, as data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Score(u32),
    Time(u32),
    Security {
        status: SecurityStatus,
        danger_count: usize,
    },
    LastL2(String),
    GameOver {
        reason: EndReason,
        final_score: u32,
    },
    Win {
        final_score: u32,
    },
}

/// Keeps the exact sequence of callbacks
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<GameEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded events
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameObserver for RecordingObserver {
    fn on_score(&mut self, score: u32) {
        self.events.push(GameEvent::Score(score));
    }

    fn on_time(&mut self, seconds_remaining: u32) {
        self.events.push(GameEvent::Time(seconds_remaining));
    }

    fn on_security(&mut self, status: SecurityStatus, danger_count: usize) {
        self.events.push(GameEvent::Security {
            status,
            danger_count,
        });
    }

    fn on_last_l2(&mut self, identity: &str) {
        self.events.push(GameEvent::LastL2(identity.to_string()));
    }

    fn on_game_over(&mut self, reason: EndReason, final_score: u32) {
        self.events.push(GameEvent::GameOver {
            reason,
            final_score,
        });
    }

    fn on_win(&mut self, final_score: u32) {
        self.events.push(GameEvent::Win { final_score });
    }
}

/// Latest value of every callback, read by the TUI header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub time_remaining: u32,
    pub security: SecurityStatus,
    pub danger_count: usize,
    pub last_l2: String,
    /// Reason and final score once the run is over
    pub finished: Option<(EndReason, u32)>,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            score: 0,
            time_remaining: 0,
            security: SecurityStatus::Stable,
            danger_count: 0,
            last_l2: "—".to_string(),
            finished: None,
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObserver for Hud {
    fn on_score(&mut self, score: u32) {
        self.score = score;
    }

    fn on_time(&mut self, seconds_remaining: u32) {
        self.time_remaining = seconds_remaining;
    }

    fn on_security(&mut self, status: SecurityStatus, danger_count: usize) {
        self.security = status;
        self.danger_count = danger_count;
    }

    fn on_last_l2(&mut self, identity: &str) {
        self.last_l2 = identity.to_string();
    }

    fn on_game_over(&mut self, reason: EndReason, final_score: u32) {
        self.finished = Some((reason, final_score));
    }

    fn on_win(&mut self, final_score: u32) {
        self.finished = Some((EndReason::TargetReached, final_score));
    }
}
