use log::{debug, info, warn};
use tokio::time::Instant;

use super::{
    action::Direction,
    config::{self, GameConfig},
    engine::{GameSession, TickOutcome},
    fruit::FruitPlacer,
};
use crate::error::GameError;

/// Callback receiving a score
pub type ScoreCallback = Box<dyn FnMut(u32) + Send>;

struct Callbacks {
    on_fruit: ScoreCallback,
    on_game_over: ScoreCallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Drives a session tick by tick.
///
/// The loop does no waiting itself: it keeps the deadline of the next tick
/// and the host sleeps until [`GameLoop::next_tick_at`] before calling
/// [`GameLoop::tick_if_due`].
pub struct GameLoop {
    session: Option<GameSession>,
    config: GameConfig,
    callbacks: Option<Callbacks>,
    placer: FruitPlacer,
    next_tick: Option<Instant>,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::with_placer(FruitPlacer::new())
    }

    pub fn with_placer(placer: FruitPlacer) -> Self {
        Self {
            session: None,
            config: GameConfig::default(),
            callbacks: None,
            placer,
            next_tick: None,
        }
    }

    pub fn state(&self) -> LoopState {
        if self.session.is_some() {
            LoopState::Running
        } else {
            LoopState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Config of the current or most recent session
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn next_tick_at(&self) -> Option<Instant> {
        self.next_tick
    }

    pub fn start<F, G>(
        &mut self,
        config: GameConfig,
        on_fruit: F,
        on_game_over: G,
    ) -> Result<(), GameError>
    where
        F: FnMut(u32) + Send + 'static,
        G: FnMut(u32) + Send + 'static,
    {
        if self.is_running() {
            return Err(GameError::InvalidState("game is already running"));
        }
        config.validate()?;

        self.config = config;
        self.callbacks = Some(Callbacks {
            on_fruit: Box::new(on_fruit),
            on_game_over: Box::new(on_game_over),
        });
        self.launch()
    }

    /// Stop if running, then start with a new config and callbacks.
    ///
    /// The config is checked before the running session is stopped.
    pub fn restart<F, G>(
        &mut self,
        config: GameConfig,
        on_fruit: F,
        on_game_over: G,
    ) -> Result<(), GameError>
    where
        F: FnMut(u32) + Send + 'static,
        G: FnMut(u32) + Send + 'static,
    {
        config.validate()?;
        if self.is_running() {
            self.stop()?;
        }
        self.start(config, on_fruit, on_game_over)
    }

    /// Restart with the config and callbacks of the last start
    pub fn restart_retained(&mut self) -> Result<(), GameError> {
        if self.callbacks.is_none() {
            return Err(GameError::InvalidState("no previous game to restart"));
        }
        self.config.validate()?;
        if self.is_running() {
            self.stop()?;
        }
        self.launch()
    }

    pub fn stop(&mut self) -> Result<(), GameError> {
        let Some(session) = self.session.take() else {
            return Err(GameError::InvalidState("game is not running"));
        };
        self.next_tick = None;
        info!("game stopped with score {}", session.score());
        Ok(())
    }

    /// Change the tick interval. The pending tick keeps its deadline; the new
    /// interval applies from the tick after it.
    pub fn set_difficulty(&mut self, interval_ms: f64) -> Result<(), GameError> {
        config::validate_interval(interval_ms)?;
        self.config.interval_ms = interval_ms;
        debug!("tick interval set to {:.2}ms", interval_ms);
        Ok(())
    }

    /// Apply a direction key. Ignored while idle or when it would reverse.
    pub fn steer(&mut self, direction: Direction) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let accepted = session.steer(direction);
        if !accepted {
            debug!("ignored {:?} while moving {:?}", direction, session.velocity());
        }
        accepted
    }

    /// Run the pending tick if its deadline has passed
    pub fn tick_if_due(&mut self, now: Instant) -> Option<TickOutcome> {
        match self.next_tick {
            Some(deadline) if deadline <= now => self.tick().ok(),
            _ => None,
        }
    }

    /// Run one tick right away and schedule the next one.
    pub(crate) fn tick(&mut self) -> Result<TickOutcome, GameError> {
        let Some(session) = self.session.as_mut() else {
            return Err(GameError::InvalidState("game is not running"));
        };

        let outcome = session.step(&mut self.placer);

        match outcome {
            TickOutcome::Moved => {}
            TickOutcome::FruitEaten { score } => {
                debug!("fruit collected, score {}", score);
                self.notify_fruit(score);
            }
            TickOutcome::BoardFull { score } => {
                self.notify_fruit(score);
                warn!("no free cell left for fruit, ending game");
                self.finish(score);
            }
            TickOutcome::SelfCollision { score } => {
                self.finish(score);
            }
        }

        if self.is_running() {
            self.next_tick = Some(Instant::now() + self.config.tick_interval());
        }

        Ok(outcome)
    }

    fn launch(&mut self) -> Result<(), GameError> {
        let session = GameSession::new(&self.config, &mut self.placer)?;
        info!(
            "game started: grid {}, snake {}, interval {:.2}ms",
            self.config.grid_size, self.config.snake_size, self.config.interval_ms
        );
        self.session = Some(session);
        self.next_tick = Some(Instant::now() + self.config.tick_interval());
        Ok(())
    }

    fn finish(&mut self, score: u32) {
        self.session = None;
        self.next_tick = None;
        info!("game over with score {}", score);
        if let Some(callbacks) = self.callbacks.as_mut() {
            (callbacks.on_game_over)(score);
        }
    }

    fn notify_fruit(&mut self, score: u32) {
        if let Some(callbacks) = self.callbacks.as_mut() {
            (callbacks.on_fruit)(score);
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Position, Snake};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Log = Arc<Mutex<Vec<u32>>>;

    fn recorder() -> (Log, impl FnMut(u32) + Send + 'static) {
        let log: Log = Arc::default();
        let sink = Arc::clone(&log);
        (log, move |score| sink.lock().unwrap().push(score))
    }

    fn started_loop() -> (GameLoop, Log, Log) {
        let mut game = GameLoop::with_placer(FruitPlacer::seeded(11));
        let (fruits, on_fruit) = recorder();
        let (overs, on_over) = recorder();
        game.start(GameConfig::default(), on_fruit, on_over).unwrap();
        (game, fruits, overs)
    }

    fn install(game: &mut GameLoop, session: GameSession) {
        game.session = Some(session);
    }

    #[test]
    fn test_start_runs_session() {
        let (game, _, _) = started_loop();
        assert_eq!(game.state(), LoopState::Running);
        assert!(game.next_tick_at().is_some());

        let session = game.session().unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().len(), 9);
    }

    #[test]
    fn test_start_while_running_fails() {
        let (mut game, _, _) = started_loop();
        let before = game.session().cloned();

        let result = game.start(GameConfig::default(), |_| {}, |_| {});
        assert!(matches!(result, Err(GameError::InvalidState(_))));
        assert_eq!(game.session().cloned(), before);
    }

    #[test]
    fn test_start_with_oversized_snake_fails() {
        let mut game = GameLoop::with_placer(FruitPlacer::seeded(1));
        let result = game.start(GameConfig::new(10, 10, 125.0), |_| {}, |_| {});
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
        assert_eq!(game.state(), LoopState::Idle);
    }

    #[test]
    fn test_stop_while_idle_fails() {
        let mut game = GameLoop::new();
        assert!(matches!(game.stop(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_stop_cancels_tick() {
        let (mut game, _, overs) = started_loop();
        game.stop().unwrap();

        assert_eq!(game.state(), LoopState::Idle);
        assert_eq!(game.next_tick_at(), None);
        assert!(matches!(game.tick(), Err(GameError::InvalidState(_))));
        assert!(overs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_restart_resets_score() {
        let (mut game, fruits, _) = started_loop();
        let snake = Snake::initial(21, 9);
        install(&mut game, GameSession::from_parts(21, snake, Position::new(15, 10)));
        game.tick().unwrap();
        assert_eq!(game.session().unwrap().score(), 1);

        game.restart_retained().unwrap();
        assert_eq!(game.session().unwrap().score(), 0);
        assert_eq!(*fruits.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_restart_with_new_config() {
        let (mut game, _, _) = started_loop();
        game.restart(GameConfig::new(11, 3, 50.0), |_| {}, |_| {}).unwrap();

        assert_eq!(game.session().unwrap().grid_size(), 11);
        assert_eq!(game.session().unwrap().snake().len(), 3);
    }

    #[test]
    fn test_restart_with_bad_config_keeps_session() {
        let (mut game, _, _) = started_loop();
        let result = game.restart(GameConfig::new(5, 8, 50.0), |_| {}, |_| {});

        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
        assert!(game.is_running());
    }

    #[test]
    fn test_restart_retained_needs_previous_start() {
        let mut game = GameLoop::new();
        assert!(matches!(
            game.restart_retained(),
            Err(GameError::InvalidState(_))
        ));
    }

    #[test]
    fn test_fruit_callback_gets_new_score() {
        let (mut game, fruits, overs) = started_loop();
        let snake = Snake::initial(21, 9);
        install(&mut game, GameSession::from_parts(21, snake, Position::new(15, 10)));

        assert_eq!(game.tick().unwrap(), TickOutcome::FruitEaten { score: 1 });
        assert_eq!(*fruits.lock().unwrap(), vec![1]);
        assert!(overs.lock().unwrap().is_empty());
        assert!(game.is_running());
    }

    #[test]
    fn test_self_collision_ends_game_once() {
        let (mut game, _, overs) = started_loop();
        let trail = vec![
            Position::new(2, 2),
            Position::new(1, 2),
            Position::new(1, 3),
            Position::new(2, 3),
            Position::new(3, 3),
        ];
        install(
            &mut game,
            GameSession::from_parts(10, Snake::from_trail(trail), Position::new(8, 8)),
        );

        assert!(game.steer(Direction::Down));
        assert_eq!(game.tick().unwrap(), TickOutcome::SelfCollision { score: 0 });

        assert_eq!(game.state(), LoopState::Idle);
        assert_eq!(game.next_tick_at(), None);
        assert!(game.tick().is_err());
        assert_eq!(*overs.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_steer_ignores_reverse_and_idle() {
        let (mut game, _, _) = started_loop();
        assert!(!game.steer(Direction::Left));
        assert!(game.steer(Direction::Up));

        game.stop().unwrap();
        assert!(!game.steer(Direction::Right));
    }

    #[test]
    fn test_set_difficulty() {
        let mut game = GameLoop::new();
        game.set_difficulty(1000.0 / 15.0).unwrap();
        assert_eq!(game.config().interval_ms, 1000.0 / 15.0);

        assert!(matches!(
            game.set_difficulty(0.0),
            Err(GameError::InvalidConfig(_))
        ));
        assert_eq!(game.config().interval_ms, 1000.0 / 15.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_waits_for_deadline() {
        let (mut game, _, _) = started_loop();
        let head = game.session().unwrap().snake().head();

        assert_eq!(game.tick_if_due(Instant::now()), None);
        assert_eq!(game.session().unwrap().snake().head(), head);

        tokio::time::advance(Duration::from_millis(125)).await;
        assert!(game.tick_if_due(Instant::now()).is_some());
        assert_ne!(game.session().unwrap().snake().head(), head);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_interval_applies_after_pending_tick() {
        let (mut game, _, _) = started_loop();
        let first = game.next_tick_at().unwrap();

        game.set_difficulty(1000.0 / 30.0).unwrap();
        assert_eq!(game.next_tick_at(), Some(first));

        tokio::time::advance(Duration::from_millis(125)).await;
        game.tick_if_due(Instant::now());

        let gap = game.next_tick_at().unwrap() - Instant::now();
        assert_eq!(gap, game.config().tick_interval());
        assert!(gap < Duration::from_millis(34));
    }
}
