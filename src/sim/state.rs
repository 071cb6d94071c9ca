//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; the phase changes only
//! through the transition methods at the bottom of this file.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, bounding_square};
use super::rng::SimRng;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Session ended, waiting for restart or quit
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Ball came down on the floor
    HitGround,
    /// Ball's bounding square touched an obstacle
    HitObstacle,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::HitGround => "hit the ground",
            GameOverReason::HitObstacle => "hit an obstacle",
        }
    }
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { vx: f32, vy: f32 },
    Scored { score: u32 },
    ObstacleSpawned(Rect),
    BasketMoved { x: i32, y: i32 },
    GameOver(GameOverReason),
    Restarted,
}

/// The player's ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(spawn: Vec2, radius: f32) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Back to spawn, at rest
    pub fn reset(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
    }

    /// Square used for obstacle tests
    pub fn bounding_square(&self) -> Rect {
        bounding_square(self.pos, self.radius)
    }
}

/// The circular scoring target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub x: i32,
    pub y: i32,
    pub radius: f32,
}

impl Basket {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// A rectangular hazard, integer placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

/// Per-session counters, reset together on restart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub phase: GamePhase,
    /// Ticks since the basket last moved on its timer
    pub basket_timer: u32,
    /// Ticks left before the basket can be scored again
    pub score_cooldown: u32,
    /// Simulation ticks played this session
    pub ticks: u64,
}

impl SessionState {
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub rng: SimRng,
    pub ball: Ball,
    pub basket: Basket,
    /// Grows by one per score, cleared on restart
    pub obstacles: Vec<Obstacle>,
    pub session: SessionState,
    /// Sessions started since this state was created (including the first)
    pub sessions_started: u32,
}

impl GameState {
    /// New game; seeds from `config.seed` or from entropy
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SimRng::new(seed),
            None => SimRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// New game with an explicit seed (ignores `config.seed`)
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, SimRng::new(seed))
    }

    fn with_rng(config: GameConfig, mut rng: SimRng) -> Self {
        let ball = Ball::new(config.spawn_point(), config.ball_radius);
        let basket = random_basket(&config, &mut rng);
        Self {
            config,
            rng,
            ball,
            basket,
            obstacles: Vec::new(),
            session: SessionState::default(),
            sessions_started: 1,
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.session.score
    }

    /// Move the basket to a fresh random spot
    pub fn reposition_basket(&mut self) -> GameEvent {
        self.basket = random_basket(&self.config, &mut self.rng);
        log::debug!("Basket moved to ({}, {})", self.basket.x, self.basket.y);
        GameEvent::BasketMoved {
            x: self.basket.x,
            y: self.basket.y,
        }
    }

    /// Append one randomly sized obstacle that fits inside the playfield
    pub fn spawn_obstacle(&mut self) -> GameEvent {
        let cfg = &self.config;
        let width = self
            .rng
            .range_inclusive(cfg.obstacle_min_size, cfg.obstacle_max_size);
        let height = self
            .rng
            .range_inclusive(cfg.obstacle_min_size, cfg.obstacle_max_size);
        let x = self.rng.range_inclusive(0, cfg.width as i32 - width);
        let y = self.rng.range_inclusive(0, cfg.height as i32 - height);

        let obstacle = Obstacle {
            x,
            y,
            width,
            height,
        };
        self.obstacles.push(obstacle);
        log::debug!(
            "Obstacle #{} at ({}, {}) size {}x{}",
            self.obstacles.len(),
            x,
            y,
            width,
            height
        );
        GameEvent::ObstacleSpawned(obstacle.rect())
    }

    /// Scoring: +1 score, one new obstacle, basket moves
    pub fn award_score(&mut self, events: &mut Vec<GameEvent>) {
        self.session.score += 1;
        self.session.score_cooldown = self.config.score_cooldown_ticks;
        log::debug!("Scored! score = {}", self.session.score);
        events.push(GameEvent::Scored {
            score: self.session.score,
        });
        events.push(self.spawn_obstacle());
        events.push(self.reposition_basket());
    }

    /// Playing -> GameOver. No-op (returns `None`) if already over.
    pub fn end_session(&mut self, reason: GameOverReason) -> Option<GameEvent> {
        if self.session.is_game_over() {
            return None;
        }
        self.session.phase = GamePhase::GameOver;
        log::info!(
            "Game over: ball {} (score {}, {} ticks)",
            reason.as_str(),
            self.session.score,
            self.session.ticks
        );
        Some(GameEvent::GameOver(reason))
    }

    /// GameOver -> Playing with a fresh session. No-op while playing.
    ///
    /// The basket keeps its last position unless the config asks otherwise.
    pub fn restart(&mut self) -> Option<GameEvent> {
        if !self.session.is_game_over() {
            return None;
        }
        self.session = SessionState::default();
        self.ball.reset(self.config.spawn_point());
        self.obstacles.clear();
        if self.config.reposition_basket_on_restart {
            self.reposition_basket();
        }
        self.sessions_started += 1;
        log::info!("Restarted (session {})", self.sessions_started);
        Some(GameEvent::Restarted)
    }
}

/// Random basket placement within the configured margins
fn random_basket(config: &GameConfig, rng: &mut SimRng) -> Basket {
    let x = rng.range_inclusive(
        config.basket_margin_x,
        config.width as i32 - config.basket_margin_x,
    );
    let y = rng.range_inclusive(config.basket_min_y, config.basket_max_y);
    Basket {
        x,
        y,
        radius: config.basket_radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state() {
        let state = GameState::with_seed(GameConfig::classic(), 1);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.score(), 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(400.0, 550.0));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.basket.y, 100);
        assert!((100..=700).contains(&state.basket.x));
    }

    #[test]
    fn test_config_seed_is_used() {
        let config = GameConfig {
            seed: Some(77),
            ..GameConfig::timed()
        };
        let a = GameState::new(config.clone());
        let b = GameState::with_seed(config, 77);
        assert_eq!(a.basket, b.basket);
        assert_eq!(a.rng.seed, 77);
    }

    #[test]
    fn test_award_score() {
        let mut state = GameState::with_seed(GameConfig::timed(), 3);
        let mut events = Vec::new();
        state.award_score(&mut events);

        assert_eq!(state.score(), 1);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], GameEvent::Scored { score: 1 });
        assert!(matches!(events[1], GameEvent::ObstacleSpawned(_)));
        assert_eq!(
            events[2],
            GameEvent::BasketMoved {
                x: state.basket.x,
                y: state.basket.y
            }
        );
        assert!((100..=700).contains(&state.basket.x));
        assert!((100..=400).contains(&state.basket.y));
    }

    #[test]
    fn test_end_session_once() {
        let mut state = GameState::with_seed(GameConfig::classic(), 5);
        assert_eq!(
            state.end_session(GameOverReason::HitGround),
            Some(GameEvent::GameOver(GameOverReason::HitGround))
        );
        assert_eq!(state.end_session(GameOverReason::HitGround), None);
        assert_eq!(state.end_session(GameOverReason::HitObstacle), None);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::with_seed(GameConfig::timed(), 9);
        let mut events = Vec::new();
        state.award_score(&mut events);
        state.award_score(&mut events);
        state.ball.pos = Vec2::new(123.0, 45.0);
        state.ball.vel = Vec2::new(2.0, -3.0);
        state.session.basket_timer = 42;
        let basket = state.basket.clone();

        // Restart is ignored while playing
        assert_eq!(state.restart(), None);
        assert_eq!(state.score(), 2);

        state.end_session(GameOverReason::HitObstacle);
        assert_eq!(state.restart(), Some(GameEvent::Restarted));

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.score(), 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(400.0, 550.0));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.session.basket_timer, 0);
        assert_eq!(state.basket, basket);
        assert_eq!(state.sessions_started, 2);
    }

    #[test]
    fn test_restart_can_reposition_basket() {
        let config = GameConfig {
            reposition_basket_on_restart: true,
            ..GameConfig::timed()
        };
        let mut state = GameState::with_seed(config.clone(), 11);
        let mut reference = GameState::with_seed(config, 11);

        state.end_session(GameOverReason::HitGround);
        state.restart();
        // Same draw the reference makes when asked to move
        reference.reposition_basket();
        assert_eq!(state.basket, reference.basket);
    }

    #[test]
    fn test_state_snapshot_json() {
        let mut state = GameState::with_seed(GameConfig::classic(), 21);
        let mut events = Vec::new();
        state.award_score(&mut events);

        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.obstacles, state.obstacles);
        assert_eq!(restored.session, state.session);

        // RNG stream continues identically
        assert_eq!(restored.spawn_obstacle(), state.spawn_obstacle());
    }

    proptest! {
        #[test]
        fn prop_obstacles_fit_playfield(seed in any::<u64>(), count in 1usize..20) {
            let mut state = GameState::with_seed(GameConfig::classic(), seed);
            for _ in 0..count {
                state.spawn_obstacle();
            }
            let size = state.config.size();
            for obstacle in &state.obstacles {
                let rect = obstacle.rect();
                prop_assert!(rect.x >= 0.0 && rect.y >= 0.0);
                prop_assert!(rect.right() <= size.x && rect.bottom() <= size.y);
                prop_assert!((20..=50).contains(&obstacle.width));
                prop_assert!((20..=50).contains(&obstacle.height));
            }
        }

        #[test]
        fn prop_basket_in_range(seed in any::<u64>()) {
            let mut state = GameState::with_seed(GameConfig::timed(), seed);
            for _ in 0..10 {
                state.reposition_basket();
                prop_assert!((100..=700).contains(&state.basket.x));
                prop_assert!((100..=400).contains(&state.basket.y));
            }
        }
    }
}
