//! Fixed timestep simulation tick
//!
//! Advances the game by exactly one tick and reports what happened.

use glam::Vec2;

use super::collision::{circles_overlap, rects_overlap};
use super::physics;
use super::state::{GameEvent, GameOverReason, GameState};
use crate::config::{BasketMotionPolicy, MovementMode};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Direction keys, held state
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Launch (edge-triggered; set only on the tick the key went down)
    pub launch: bool,
}

impl TickInput {
    /// Held directions as a unit-step vector (y grows downward)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one tick
///
/// Does nothing once the session is over; only [`GameState::restart`] leaves
/// that phase.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.session.is_game_over() {
        return events;
    }

    state.session.ticks += 1;
    state.session.score_cooldown = state.session.score_cooldown.saturating_sub(1);

    let size = state.config.size();
    let ballistic = state.config.movement == MovementMode::Ballistic;

    if ballistic && input.launch {
        let vel = physics::launch(&mut state.ball, &state.config, &mut state.rng);
        log::debug!("Launched with velocity ({}, {})", vel.x, vel.y);
        events.push(GameEvent::Launched { vx: vel.x, vy: vel.y });
    }

    physics::steer(&mut state.ball, input.direction(), state.config.ball_speed);
    physics::clamp(&mut state.ball, size);

    if ballistic {
        let contacts = physics::integrate(&mut state.ball, &state.config);
        if contacts.floor {
            events.extend(state.end_session(GameOverReason::HitGround));
        }
        physics::clamp(&mut state.ball, size);
    }

    if let BasketMotionPolicy::Timed { interval_ticks } = state.config.basket_motion {
        state.session.basket_timer += 1;
        if state.session.basket_timer >= interval_ticks {
            events.push(state.reposition_basket());
            state.session.basket_timer = 0;
        }
    }

    if !state.session.is_game_over()
        && state.session.score_cooldown == 0
        && circles_overlap(
            state.ball.pos,
            state.ball.radius,
            state.basket.center(),
            state.basket.radius,
        )
    {
        state.award_score(&mut events);
    }

    let ball_square = state.ball.bounding_square();
    if !state.session.is_game_over()
        && state
            .obstacles
            .iter()
            .any(|o| rects_overlap(&ball_square, &o.rect()))
    {
        events.extend(state.end_session(GameOverReason::HitObstacle));
    }

    events
}
