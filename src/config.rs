//! Game configuration and variant presets
//!
//! Everything tunable about a session lives in [`GameConfig`]. Two presets
//! match the two ways the game is played: `classic` (launch + gravity, basket
//! moves when scored) and `timed` (steering only, basket hops on a timer).

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the ball responds to input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementMode {
    /// Arrow keys nudge the position directly; velocity is never integrated
    Direct,
    /// Arrow keys plus a launch impulse, with gravity and wall bounces
    #[default]
    Ballistic,
}

impl MovementMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementMode::Direct => "direct",
            MovementMode::Ballistic => "ballistic",
        }
    }
}

/// When the basket picks a new spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BasketMotionPolicy {
    /// Only after the ball scores
    #[default]
    OnScore,
    /// After every score and every `interval_ticks` playing ticks
    Timed { interval_ticks: u32 },
}

/// Configuration errors, reported before a session starts
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed into a config
    Parse(serde_json::Error),
    /// Values parsed but describe an unplayable field
    Invalid(String),
    /// An environment variable held an unusable value
    Env { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
            ConfigError::Env { var, value } => {
                write!(f, "unsupported value {:?} for {}", value, var)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Target simulation ticks per second
    pub tick_rate: u32,

    // === Ball ===
    pub ball_radius: f32,
    /// Per-tick displacement for each held direction
    pub ball_speed: f32,
    /// Added to vy each tick while the ball is rising
    pub gravity: f32,
    /// Inclusive range for the launch vx
    pub launch_vx_range: (i32, i32),
    pub launch_vy: f32,

    // === Basket ===
    pub basket_radius: f32,
    /// Basket x is drawn from `[margin, width - margin]`
    pub basket_margin_x: i32,
    /// Basket y is drawn from `[basket_min_y, basket_max_y]`
    pub basket_min_y: i32,
    pub basket_max_y: i32,
    pub basket_motion: BasketMotionPolicy,
    /// Pick a fresh basket spot on restart instead of keeping the last one
    pub reposition_basket_on_restart: bool,

    // === Obstacles ===
    /// Inclusive side length range
    pub obstacle_min_size: i32,
    pub obstacle_max_size: i32,

    // === Rules ===
    pub movement: MovementMode,
    /// Ticks after a score during which the basket can't be scored again (0 = off)
    pub score_cooldown_ticks: u32,
    /// RNG seed, `None` draws one from entropy at startup
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// Launch + gravity, basket row fixed, basket moves on score only
    pub fn classic() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            tick_rate: TICK_RATE,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            gravity: GRAVITY,
            launch_vx_range: (LAUNCH_VX_MIN, LAUNCH_VX_MAX),
            launch_vy: LAUNCH_VY,

            basket_radius: BASKET_RADIUS,
            basket_margin_x: BASKET_MARGIN_X,
            basket_min_y: BASKET_ROW_Y,
            basket_max_y: BASKET_ROW_Y,
            basket_motion: BasketMotionPolicy::OnScore,
            reposition_basket_on_restart: false,

            obstacle_min_size: OBSTACLE_MIN_SIZE,
            obstacle_max_size: OBSTACLE_MAX_SIZE,

            movement: MovementMode::Ballistic,
            score_cooldown_ticks: 0,
            seed: None,
        }
    }

    /// Steering only, basket anywhere in the upper field, hops on a timer
    pub fn timed() -> Self {
        Self {
            basket_min_y: BASKET_ROW_Y,
            basket_max_y: HEIGHT as i32 - 200,
            basket_motion: BasketMotionPolicy::Timed {
                interval_ticks: BASKET_MOVE_INTERVAL,
            },
            movement: MovementMode::Direct,
            ..Self::classic()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "timed" => Some(Self::timed()),
            _ => None,
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields take classic defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a (possibly partial) JSON object on top of `self`
    ///
    /// Top-level keys present in `json` replace the matching fields; all
    /// others keep their current values.
    pub fn with_json_overrides(&self, json: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(ConfigError::Invalid("config overrides must be a JSON object".into()));
        };

        let mut merged = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `BALL_CHASER_VARIANT`, `BALL_CHASER_CONFIG` and `BALL_CHASER_SEED`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("BALL_CHASER_VARIANT") {
            Ok(name) => Self::preset(&name).ok_or(ConfigError::Env {
                var: "BALL_CHASER_VARIANT",
                value: name,
            })?,
            Err(_) => Self::default(),
        };

        if let Ok(json) = std::env::var("BALL_CHASER_CONFIG") {
            config = config.with_json_overrides(&json)?;
            log::info!(
                "Applied BALL_CHASER_CONFIG over the {} preset ({} variant now)",
                std::env::var("BALL_CHASER_VARIANT").unwrap_or_else(|_| "classic".into()),
                config.variant_name()
            );
        }

        if let Ok(seed) = std::env::var("BALL_CHASER_SEED") {
            let parsed = seed.trim().parse::<u64>().map_err(|_| ConfigError::Env {
                var: "BALL_CHASER_SEED",
                value: seed.clone(),
            })?;
            config.seed = Some(parsed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configs whose random ranges or clamps would be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.width > 0.0 && self.height > 0.0) {
            return invalid(format!("playfield {}x{} must be positive", self.width, self.height));
        }
        if self.tick_rate == 0 {
            return invalid("tick_rate must be non-zero".into());
        }
        if !(self.ball_radius > 0.0)
            || 2.0 * self.ball_radius > self.width
            || 2.0 * self.ball_radius > self.height
        {
            return invalid(format!("ball radius {} does not fit the playfield", self.ball_radius));
        }
        if !(self.basket_radius > 0.0) {
            return invalid(format!("basket radius {} must be positive", self.basket_radius));
        }
        if self.launch_vx_range.0 > self.launch_vx_range.1 {
            return invalid(format!("launch vx range {:?} is inverted", self.launch_vx_range));
        }
        // The whole basket must stay on the field wherever it lands
        if (self.basket_margin_x as f32) < self.basket_radius
            || 2 * self.basket_margin_x > self.width as i32
        {
            return invalid(format!(
                "basket margin {} does not fit a radius {} basket on the playfield",
                self.basket_margin_x, self.basket_radius
            ));
        }
        if (self.basket_min_y as f32) < self.basket_radius
            || self.basket_min_y > self.basket_max_y
            || self.basket_max_y as f32 > self.height - self.basket_radius
        {
            return invalid(format!(
                "basket y range [{}, {}] does not fit the playfield",
                self.basket_min_y, self.basket_max_y
            ));
        }
        if self.obstacle_min_size <= 0 || self.obstacle_min_size > self.obstacle_max_size {
            return invalid(format!(
                "obstacle size range [{}, {}] is empty",
                self.obstacle_min_size, self.obstacle_max_size
            ));
        }
        if self.obstacle_max_size > self.width as i32 || self.obstacle_max_size > self.height as i32 {
            return invalid(format!("obstacle size {} exceeds the playfield", self.obstacle_max_size));
        }
        if let BasketMotionPolicy::Timed { interval_ticks: 0 } = self.basket_motion {
            return invalid("timed basket interval must be non-zero".into());
        }
        Ok(())
    }

    /// Playfield size as a vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Ball spawn point: centered horizontally, just above the floor
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(
            (self.width as i32 / 2) as f32,
            (self.height as i32 - BALL_SPAWN_LIFT as i32) as f32,
        )
    }

    /// Short label for logs
    pub fn variant_name(&self) -> &'static str {
        match (self.movement, self.basket_motion) {
            (MovementMode::Ballistic, BasketMotionPolicy::OnScore) => "classic",
            (MovementMode::Direct, BasketMotionPolicy::Timed { .. }) => "timed",
            _ => "custom",
        }
    }
}
