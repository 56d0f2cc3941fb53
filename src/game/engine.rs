use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use super::{
    clock::{Clock, SystemClock},
    config::GameConfig,
    direction::Direction,
    food::{Food, FoodKind},
    observer::GameObserver,
    outcome::{EndReason, RunOutcome, SecurityStatus},
    state::{grid_side, GameState, Position, Snake},
};

/// Label reported as the last eaten L2 before anything is eaten
pub const NO_LAST_L2: &str = "—";

/// What a timer tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened: no run, paused, stunned, ended or destroyed
    Idle,
    /// The run continues
    Advanced,
    /// This tick ended the run
    Ended(EndReason),
}

/// The game engine that owns a run and applies every rule to it
///
/// The engine is driven from outside: the host calls `tick_movement` every
/// `movement_interval()` and `tick_clock` once per second, and forwards
/// directional input to `set_direction`. Every change of interest is
/// reported to the observer.
pub struct GameEngine<O: GameObserver, C: Clock = SystemClock> {
    config: GameConfig,
    rng: StdRng,
    clock: C,
    observer: O,
    state: Option<GameState>,
    destroyed: bool,
}

impl<O: GameObserver> GameEngine<O, SystemClock> {
    /// Create an engine on the wall clock
    pub fn new(config: GameConfig, observer: O) -> Self {
        Self::with_clock(config, observer, SystemClock::new())
    }
}

impl<O: GameObserver, C: Clock> GameEngine<O, C> {
    /// Create an engine on a custom clock
    pub fn with_clock(config: GameConfig, observer: O, clock: C) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
            clock,
            observer,
            state: None,
            destroyed: false,
        }
    }

    /// Make food placement reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current run, if one was started
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Mutable access to the run, for scenario setup and replays
    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.state.as_ref().and_then(|state| state.outcome)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether the host should keep delivering timer ticks
    pub fn timers_armed(&self) -> bool {
        !self.destroyed && self.state.as_ref().is_some_and(|state| !state.is_ended())
    }

    /// Period of the movement timer for the running game
    pub fn movement_interval(&self) -> Option<Duration> {
        if !self.timers_armed() {
            return None;
        }
        self.state
            .as_ref()
            .map(|state| Duration::from_millis(state.movement_interval_ms))
    }

    /// Reset everything and begin a new run
    pub fn start(&mut self) {
        if self.destroyed {
            warn!("start() called on a destroyed engine; ignoring");
            return;
        }
        if let Err(error) = self.config.validate() {
            warn!(%error, "start() with an invalid config; ignoring");
            return;
        }

        let center = grid_side(self.config.grid_size) / 2;
        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );
        let mut state = GameState::new(
            snake,
            self.config.grid_size,
            self.config.time_limit_secs,
            self.config.interval_for_score(0),
        );

        for _ in 0..self.config.initial_food {
            spawn_food(&mut state, &self.config, &mut self.rng);
        }

        info!(
            grid = self.config.grid_size,
            foods = state.foods.len(),
            "run started"
        );

        self.state = Some(state);
        self.observer.on_score(0);
        self.observer.on_time(self.config.time_limit_secs);
        self.observer.on_security(SecurityStatus::Stable, 0);
        self.observer.on_last_l2(NO_LAST_L2);
    }

    pub fn pause(&mut self) {
        if let Some(state) = self.live_state() {
            state.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if let Some(state) = self.live_state() {
            state.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if let Some(state) = self.live_state() {
            state.paused = !state.paused;
            debug!(paused = state.paused, "pause toggled");
        }
    }

    /// Queue a direction for the next movement tick
    ///
    /// While a jam is active the input is negated first. A direction that
    /// would reverse straight into the neck is dropped.
    pub fn set_direction(&mut self, direction: Direction) {
        let now = self.clock.now_ms();
        let Some(state) = self.live_state() else {
            return;
        };

        let direction = if now < state.reversed_until {
            direction.negated()
        } else {
            direction
        };

        if direction.is_opposite(state.snake.direction) {
            trace!(?direction, "reverse input ignored");
            return;
        }

        state.pending_direction = direction;
    }

    /// Advance the snake one cell
    pub fn tick_movement(&mut self) -> TickOutcome {
        let now = self.clock.now_ms();
        if self.destroyed {
            return TickOutcome::Idle;
        }
        let Some(state) = self.state.as_mut().filter(|state| !state.is_ended()) else {
            return TickOutcome::Idle;
        };
        if state.paused || now < state.stunned_until {
            return TickOutcome::Idle;
        }

        state.snake.direction = state.pending_direction;
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.steps += 1;
        trace!(x = new_head.x, y = new_head.y, "movement tick");

        if !state.is_in_bounds(new_head) {
            return self.finish(EndReason::Wall);
        }

        // The tail cell still counts: moving into it is fatal
        if state.is_occupied_by_snake(new_head) {
            return self.finish(EndReason::SelfCollision);
        }

        state.snake.push_head(new_head);

        match state.food_index_at(new_head) {
            Some(index) => {
                let food = state.foods.remove(index);
                if let Some(reason) =
                    resolve_food(state, &self.config, &mut self.observer, &food, now)
                {
                    return self.finish(reason);
                }
                spawn_food(state, &self.config, &mut self.rng);
            }
            None => state.snake.drop_tail(),
        }

        verify_adjacent_fraud(state);

        TickOutcome::Advanced
    }

    /// Count down one second
    pub fn tick_clock(&mut self) -> TickOutcome {
        let now = self.clock.now_ms();
        let window = self.config.powered_window_ms;
        let shaky = self.config.powered_shaky_count;
        let Some(state) = self.live_state() else {
            return TickOutcome::Idle;
        };
        if state.paused {
            return TickOutcome::Idle;
        }

        state.time_remaining = state.time_remaining.saturating_sub(1);

        let before = state.danger_count();
        state.prune_powered(now, window);
        let after = state.danger_count();
        let time_remaining = state.time_remaining;

        if after != before {
            self.observer.on_security(security_status(after, shaky), after);
        }

        if time_remaining == 0 {
            return self.finish(EndReason::TimeUp);
        }

        self.observer.on_time(time_remaining);
        TickOutcome::Advanced
    }

    /// Stop the run and disarm the timers; safe to call repeatedly
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.state = None;
        info!("engine destroyed");
    }

    /// The run, if it exists and has not ended
    fn live_state(&mut self) -> Option<&mut GameState> {
        if self.destroyed {
            return None;
        }
        self.state.as_mut().filter(|state| !state.is_ended())
    }

    fn finish(&mut self, reason: EndReason) -> TickOutcome {
        let Some(state) = self.live_state() else {
            return TickOutcome::Idle;
        };
        let final_score = state.score;
        state.outcome = Some(RunOutcome {
            reason,
            final_score,
        });

        info!(score = final_score, %reason, "run ended");

        if reason.is_win() {
            self.observer.on_win(final_score);
        } else {
            self.observer.on_game_over(reason, final_score);
        }
        TickOutcome::Ended(reason)
    }
}

fn security_status(danger_count: usize, shaky_count: usize) -> SecurityStatus {
    if danger_count >= shaky_count {
        SecurityStatus::Shaky
    } else {
        SecurityStatus::Stable
    }
}

/// Apply the effects of eating `food`; returns the reason if the run ends
fn resolve_food<O: GameObserver>(
    state: &mut GameState,
    config: &GameConfig,
    observer: &mut O,
    food: &Food,
    now: u64,
) -> Option<EndReason> {
    if food.is_lethal() {
        return Some(EndReason::UnverifiedFraud);
    }

    state.score += food.kind.points();
    debug!(kind = food.kind.label(), identity = %food.identity, score = state.score, "food eaten");
    observer.on_score(state.score);
    observer.on_last_l2(&food.identity);

    if food.kind.is_powered() {
        state.powered_eats.push_back(now);
        state.prune_powered(now, config.powered_window_ms);
        let danger = state.danger_count();
        observer.on_security(security_status(danger, config.powered_shaky_count), danger);
        if danger >= config.powered_collapse_count {
            return Some(EndReason::SecurityCollapse);
        }
    }

    match food.kind {
        FoodKind::Shield => state.stunned_until = now + config.stun_ms,
        FoodKind::Jam => state.reversed_until = now + config.reverse_ms,
        FoodKind::Drain => {
            let removed = state
                .snake
                .shrink(config.drain_cells, config.min_snake_length);
            debug!(removed, length = state.snake.len(), "drained");
        }
        FoodKind::Normal | FoodKind::Fraud => {}
    }

    if state.score >= config.target_score {
        return Some(EndReason::TargetReached);
    }

    let interval = config.interval_for_score(state.score);
    if interval != state.movement_interval_ms {
        debug!(interval_ms = interval, "movement speed changed");
        state.movement_interval_ms = interval;
    }

    None
}

/// Mark fraud items next to the head as verified
fn verify_adjacent_fraud(state: &mut GameState) {
    let head = state.snake.head();
    for food in state
        .foods
        .iter_mut()
        .filter(|food| food.kind == FoodKind::Fraud && !food.verified)
    {
        if food.position.manhattan_distance(head) == 1 {
            food.verified = true;
            debug!(identity = %food.identity, "fraud proof verified");
        }
    }
}

/// Pick the kind for a new item, scaled by the current score
fn choose_kind<R: Rng + ?Sized>(config: &GameConfig, score: u32, rng: &mut R) -> FoodKind {
    if rng.gen_bool(config.powered_chance(score)) {
        FoodKind::ALL[rng.gen_range(0..FoodKind::ALL.len())]
    } else {
        FoodKind::Normal
    }
}

/// Place a food item on a random free cell
///
/// Gives up quietly when the cap is reached or no free cell is found
/// within the attempt budget.
fn spawn_food<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> Option<Position> {
    if state.foods.len() >= config.max_food {
        return None;
    }

    let side = state.side();
    for _ in 0..config.spawn_attempts {
        let pos = Position::new(rng.gen_range(0..side), rng.gen_range(0..side));
        if !state.is_free(pos) {
            continue;
        }

        let kind = choose_kind(config, state.score, rng);
        let food = Food::random_identity(pos, kind, rng);
        debug!(x = pos.x, y = pos.y, kind = kind.label(), "food spawned");
        state.foods.push(food);
        return Some(pos);
    }

    trace!("no free cell found for food");
    None
}
