use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid side accepted from a file or the command line
pub const MAX_GRID_SIZE: usize = 256;

/// Configuration for a run
///
/// Every rule constant of the game lives here so that alternative balance
/// settings can be loaded from a JSON file. Missing fields fall back to the
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the square grid, in cells
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Food items spawned by `start`
    pub initial_food: usize,
    /// Maximum number of food items on the grid at once
    pub max_food: usize,

    /// Score that wins the run
    pub target_score: u32,
    /// Seconds on the countdown at the start of a run
    pub time_limit_secs: u32,

    /// Movement interval below the first speed threshold
    pub base_interval_ms: u64,
    /// Score at which movement speeds up to `medium_interval_ms`
    pub medium_speed_score: u32,
    pub medium_interval_ms: u64,
    /// Score at which movement speeds up to `fast_interval_ms`
    pub fast_speed_score: u32,
    pub fast_interval_ms: u64,

    /// Trailing window for counting powered food, in milliseconds
    pub powered_window_ms: u64,
    /// Powered items inside the window that collapse the run
    pub powered_collapse_count: usize,
    /// Powered items inside the window reported as "Shaky"
    pub powered_shaky_count: usize,

    /// How long a shield freezes movement
    pub stun_ms: u64,
    /// How long a jam reverses input
    pub reverse_ms: u64,
    /// Tail cells removed by a drain
    pub drain_cells: usize,
    /// Length the snake never shrinks below
    pub min_snake_length: usize,

    /// Rejection sampling attempts before a spawn is skipped
    pub spawn_attempts: usize,
    /// Probability of allowing powered kinds at score 0
    pub powered_chance_base: f64,
    /// Added probability per point of score
    pub powered_chance_per_point: f64,
    /// Upper bound of the powered probability
    pub powered_chance_max: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            initial_food: 4,
            max_food: 5,
            target_score: 100,
            time_limit_secs: 90,
            base_interval_ms: 140,
            medium_speed_score: 40,
            medium_interval_ms: 110,
            fast_speed_score: 70,
            fast_interval_ms: 90,
            powered_window_ms: 15_000,
            powered_collapse_count: 3,
            powered_shaky_count: 2,
            stun_ms: 2_000,
            reverse_ms: 3_000,
            drain_cells: 3,
            min_snake_length: 2,
            spawn_attempts: 200,
            powered_chance_base: 0.2,
            powered_chance_per_point: 1.0 / 200.0,
            powered_chance_max: 0.6,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Read a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size >= 4, "grid_size must be at least 4");
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid_size must be at most {}",
            MAX_GRID_SIZE
        );
        ensure!(
            self.initial_snake_length >= self.min_snake_length,
            "initial_snake_length must be at least min_snake_length"
        );
        ensure!(
            self.initial_snake_length <= self.grid_size / 2,
            "initial_snake_length must fit behind the spawn point"
        );
        ensure!(self.min_snake_length >= 1, "min_snake_length must be positive");
        ensure!(
            self.initial_food <= self.max_food,
            "initial_food cannot exceed max_food"
        );
        ensure!(self.time_limit_secs > 0, "time_limit_secs must be positive");
        ensure!(
            self.base_interval_ms > 0 && self.medium_interval_ms > 0 && self.fast_interval_ms > 0,
            "movement intervals must be positive"
        );
        ensure!(
            self.medium_speed_score <= self.fast_speed_score,
            "speed thresholds must be ascending"
        );
        ensure!(
            self.powered_collapse_count > 0,
            "powered_collapse_count must be positive"
        );
        ensure!(
            (0.0..=1.0).contains(&self.powered_chance_base)
                && (0.0..=1.0).contains(&self.powered_chance_max),
            "powered chances must be probabilities"
        );
        Ok(())
    }

    /// Movement interval for a given score
    pub fn interval_for_score(&self, score: u32) -> u64 {
        if score >= self.fast_speed_score {
            self.fast_interval_ms
        } else if score >= self.medium_speed_score {
            self.medium_interval_ms
        } else {
            self.base_interval_ms
        }
    }

    /// Probability that a spawn may pick a powered kind
    pub fn powered_chance(&self, score: u32) -> f64 {
        (self.powered_chance_base + score as f64 * self.powered_chance_per_point)
            .min(self.powered_chance_max)
            .clamp(0.0, 1.0)
    }
}
