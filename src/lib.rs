//! Ball Chaser - steer the ball into the basket, dodge the obstacles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: Playfield tuning and variant selection
//! - `driver`: Fixed-rate frame loop and the renderer/input seams
//! - `platform`: Native pacing, headless renderer and demo input

pub mod config;
pub mod driver;
pub mod platform;
pub mod sim;

pub use config::{BasketMotionPolicy, ConfigError, GameConfig, MovementMode};
pub use driver::{FrameDriver, InputSource, Pacer, PolledInput, Renderer, RunSummary};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Simulation rate
    pub const TICK_RATE: u32 = 60;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Distance moved per tick per held direction key
    pub const BALL_SPEED: f32 = 5.0;
    /// Spawn sits this far above the floor edge of the playfield
    pub const BALL_SPAWN_LIFT: f32 = 50.0;

    /// Gravity added to upward velocity each tick
    pub const GRAVITY: f32 = 0.5;
    /// Launch impulse: vx drawn from this inclusive range, vy fixed
    pub const LAUNCH_VX_MIN: i32 = -5;
    pub const LAUNCH_VX_MAX: i32 = 5;
    pub const LAUNCH_VY: f32 = -10.0;

    /// Basket defaults
    pub const BASKET_RADIUS: f32 = 40.0;
    /// Horizontal keep-out from the side walls for basket placement
    pub const BASKET_MARGIN_X: i32 = 100;
    /// Basket row used by the classic variant
    pub const BASKET_ROW_Y: i32 = 100;
    /// Ticks between basket moves in the timed variant
    pub const BASKET_MOVE_INTERVAL: u32 = 100;

    /// Obstacle side length range (inclusive)
    pub const OBSTACLE_MIN_SIZE: i32 = 20;
    pub const OBSTACLE_MAX_SIZE: i32 = 50;
}

/// Clamp a point so a circle of `radius` stays inside a `size` playfield
#[inline]
pub fn clamp_to_playfield(pos: Vec2, radius: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.max(radius).min(size.x - radius),
        pos.y.max(radius).min(size.y - radius),
    )
}
