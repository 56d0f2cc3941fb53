use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game::{EndReason, RunOutcome};

/// Tallies for one interactive session, across restarts
pub struct GameMetrics {
    run_started: Instant,
    /// Wall time of the current run; frozen once the run ends
    pub run_time: Duration,
    running: bool,
    pub high_score: u32,
    pub games_played: u32,
    pub wins: u32,
    /// Shortest run that reached the target score
    pub fastest_win: Option<Duration>,
    endings: HashMap<EndReason, u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            run_time: Duration::ZERO,
            running: false,
            high_score: 0,
            games_played: 0,
            wins: 0,
            fastest_win: None,
            endings: HashMap::new(),
        }
    }

    pub fn on_run_start(&mut self) {
        self.run_started = Instant::now();
        self.run_time = Duration::ZERO;
        self.running = true;
    }

    /// Refresh the run clock; called once per frame
    pub fn update(&mut self) {
        if self.running {
            self.run_time = self.run_started.elapsed();
        }
    }

    pub fn on_run_over(&mut self, outcome: RunOutcome) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(outcome.final_score);
        *self.endings.entry(outcome.reason).or_default() += 1;

        if outcome.reason.is_win() {
            self.wins += 1;
            let best = self.fastest_win.map_or(self.run_time, |best| best.min(self.run_time));
            self.fastest_win = Some(best);
        }
    }

    /// Runs that ended for `reason`
    pub fn endings(&self, reason: EndReason) -> u32 {
        self.endings.get(&reason).copied().unwrap_or(0)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `mm:ss` for the HUD
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
