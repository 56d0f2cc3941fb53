use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::game::{GameConfig, GameEngine, Hud, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{draw_scene, CellCanvas, FrameView, IconIndex, Renderer};

type Tui = Terminal<CrosstermBackend<Stderr>>;

/// Interactive play in the terminal
///
/// Owns the engine and the terminal, and drives the engine from three
/// timers: movement, the one-second countdown and rendering.
pub struct HumanMode {
    engine: GameEngine<Hud>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    icons: IconIndex,
    canvas: CellCanvas,
    terminal: Option<Tui>,
    should_quit: bool,
    timers_dirty: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, icons: IconIndex, seed: Option<u64>) -> Self {
        let canvas = CellCanvas::new(config.grid_size);
        let engine = GameEngine::new(config, Hud::new());
        let engine = match seed {
            Some(seed) => engine.with_seed(seed),
            None => engine,
        };

        let mut mode = Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            icons,
            canvas,
            terminal: None,
            should_quit: false,
            timers_dirty: false,
        };
        mode.start_run();
        mode
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        self.terminal = Some(terminal);

        let result = self.run_game_loop().await;

        self.destroy();

        result
    }

    async fn run_game_loop(&mut self) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut movement_period = self.movement_period();
        let mut movement_timer = movement_interval_timer(movement_period);
        let mut clock_timer = delayed_interval(Duration::from_secs(1));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = movement_timer.tick() => {
                    if self.engine.timers_armed() {
                        let outcome = self.engine.tick_movement();
                        self.record_outcome(outcome);
                    }
                }

                _ = clock_timer.tick() => {
                    if self.engine.timers_armed() {
                        let outcome = self.engine.tick_clock();
                        self.record_outcome(outcome);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.draw()?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.timers_dirty {
                self.timers_dirty = false;
                movement_period = self.movement_period();
                movement_timer = movement_interval_timer(movement_period);
                clock_timer = delayed_interval(Duration::from_secs(1));
            } else if let Some(period) = self.movement_period_change(movement_period) {
                movement_period = period;
                movement_timer = movement_interval_timer(period);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn movement_period(&self) -> Duration {
        self.engine
            .movement_interval()
            .unwrap_or_else(|| Duration::from_millis(self.engine.config().base_interval_ms))
    }

    /// The new period if the running game changed speed since `current`
    fn movement_period_change(&self, current: Duration) -> Option<Duration> {
        self.engine
            .movement_interval()
            .filter(|period| *period != current)
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        match self.input_handler.handle_key_event(key) {
            KeyAction::Move(direction) => self.engine.set_direction(direction),
            KeyAction::TogglePause => self.engine.toggle_pause(),
            KeyAction::Restart => self.start_run(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn record_outcome(&mut self, outcome: TickOutcome) {
        if !matches!(outcome, TickOutcome::Ended(_)) {
            return;
        }
        let Some(run) = self.engine.outcome() else {
            return;
        };
        self.metrics.on_run_over(run);
        info!(
            score = run.final_score,
            high_score = self.metrics.high_score,
            wins = self.metrics.wins,
            "{}",
            run.reason
        );
    }

    fn start_run(&mut self) {
        *self.engine.observer_mut() = Hud::new();
        self.engine.start();
        self.metrics.on_run_start();
        self.timers_dirty = true;
    }

    fn draw(&mut self) -> Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Ok(());
        };

        if let Some(state) = self.engine.state() {
            draw_scene(state, &mut self.canvas, &self.icons);
        }

        let view = FrameView {
            canvas: &self.canvas,
            hud: self.engine.observer(),
            metrics: &self.metrics,
            paused: self.engine.state().is_some_and(|state| state.paused),
        };
        terminal
            .draw(|frame| self.renderer.render(frame, &view))
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// Stop the engine and hand the terminal back; safe to call repeatedly
    pub fn destroy(&mut self) {
        self.engine.destroy();

        let Some(mut terminal) = self.terminal.take() else {
            return;
        };
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal.show_cursor() {
            warn!("Failed to show cursor: {}", e);
        }
    }
}

impl Drop for HumanMode {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Interval whose first tick is one period away
fn delayed_interval(period: Duration) -> Interval {
    interval_at(Instant::now() + period, period)
}

/// Movement timer; ticks missed during a stall are delayed, not replayed
fn movement_interval_timer(period: Duration) -> Interval {
    let mut timer = delayed_interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
