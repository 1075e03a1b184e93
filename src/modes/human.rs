use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

use crate::game::{GameConfig, LoopState};
use crate::handle::GameHandle;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, TerminalSurface};

type Screen = TerminalSurface<CrosstermBackend<Stderr>>;

/// Score notifications forwarded from the game callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FruitCollected(u32),
    GameOver(u32),
}

/// Play in the terminal with the keyboard
pub struct HumanMode {
    config: GameConfig,
    metrics: GameMetrics,
    input_handler: InputHandler,
    events_tx: UnboundedSender<GameEvent>,
    events_rx: UnboundedReceiver<GameEvent>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            config,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            events_tx,
            events_rx,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;

        let result = self.play().await;

        // Cleanup terminal
        restore_terminal()?;

        if let Err(err) = &result {
            error!("terminal session failed: {:#}", err);
        }
        result
    }

    async fn play(&mut self) -> Result<()> {
        let backend = CrosstermBackend::new(stderr());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.clear().context("Failed to clear terminal")?;

        let mut handle = GameHandle::init(TerminalSurface::new(terminal))
            .context("Terminal cannot be drawn on")?;
        self.start_game(&mut handle)?;

        self.run_game_loop(&mut handle).await
    }

    async fn run_game_loop(&mut self, handle: &mut GameHandle<Screen>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Redraw at ~60 FPS, independent of the logic tick rate
        let mut render_timer = interval(Duration::from_millis(16));
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let deadline = handle.next_tick_at();

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(handle, event)?;
                    }
                }

                // Game logic tick
                _ = wait_for(deadline) => {
                    handle.tick_if_due(Instant::now());
                }

                // Score notifications from the callbacks
                Some(event) = self.events_rx.recv() => {
                    self.on_game_event(event);
                }

                // Render frame
                _ = render_timer.tick() => {
                    if handle.request_frame() {
                        self.refresh_hud(handle);
                        handle.present().context("Failed to draw frame")?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            "leaving after {} games, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );
        Ok(())
    }

    fn handle_event(&mut self, handle: &mut GameHandle<Screen>, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    handle.steer(direction);
                }
                KeyAction::SetDifficulty(difficulty) => {
                    handle.set_difficulty(difficulty.interval_ms())?;
                    self.config.interval_ms = difficulty.interval_ms();
                    info!("difficulty set to {:?}", difficulty);
                }
                KeyAction::Toggle => match handle.state() {
                    LoopState::Running => handle.stop()?,
                    LoopState::Idle => self.start_game(handle)?,
                },
                KeyAction::Restart => {
                    self.drain_events();
                    handle.restart_retained()?;
                    self.metrics.on_game_start();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn start_game(&mut self, handle: &mut GameHandle<Screen>) -> Result<()> {
        self.drain_events();

        let fruit_tx = self.events_tx.clone();
        let over_tx = self.events_tx.clone();
        handle.restart(
            self.config.clone(),
            move |score| {
                let _ = fruit_tx.send(GameEvent::FruitCollected(score));
            },
            move |score| {
                let _ = over_tx.send(GameEvent::GameOver(score));
            },
        )?;

        self.metrics.on_game_start();
        Ok(())
    }

    /// Apply notifications still queued from the previous game
    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.on_game_event(event);
        }
    }

    fn on_game_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::FruitCollected(score) => self.metrics.on_fruit(score),
            GameEvent::GameOver(score) => self.metrics.on_game_over(score),
        }
    }

    fn refresh_hud(&mut self, handle: &mut GameHandle<Screen>) {
        let running = handle.state() == LoopState::Running;
        if running {
            self.metrics.update();
        }

        let hud = self.hud(running, handle.game().config().interval_ms);
        handle.surface_mut().set_hud(hud);
    }

    fn hud(&self, running: bool, interval_ms: f64) -> Hud {
        Hud {
            score: self.metrics.score,
            high_score: self.metrics.high_score,
            games_played: self.metrics.games_played,
            elapsed: self.metrics.format_time(),
            interval_ms,
            running,
            last_score: self.metrics.last_score,
        }
    }
}

/// Sleep until the next logic tick, or forever while the game is idle
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    let mut stderr = stderr();
    execute!(stderr, LeaveAlternateScreen, cursor::Show)
        .context("Failed to leave alternate screen")?;
    Ok(())
}
