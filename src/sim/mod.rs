//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call = one tick)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, bounding_square, circle_distance, circle_intersects_rect, circles_overlap};
pub use physics::Contacts;
pub use rng::SimRng;
pub use state::{
    Ball, Basket, GameEvent, GameOverReason, GamePhase, GameState, Obstacle, SessionState,
};
pub use tick::{TickInput, tick};
