//! Native platform pieces
//!
//! - Wall-clock frame pacing
//! - A headless renderer that logs draw commands
//! - Demo input that plays the game on its own

use std::convert::Infallible;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::driver::{Color, InputSource, Pacer, PolledInput, Renderer};
use crate::sim::{GameState, Rect, TickInput, circle_intersects_rect};

/// Sleeps to hold a fixed tick rate; late frames don't accumulate debt
pub struct FixedRatePacer {
    frame: Duration,
    next: Instant,
}

impl FixedRatePacer {
    pub fn new(tick_rate: u32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64);
        Self {
            frame,
            next: Instant::now() + frame,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl Pacer for FixedRatePacer {
    fn wait_next_tick(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.frame;
        } else {
            self.next = now + self.frame;
        }
    }
}

/// Renderer with no display: counts frames and traces every draw call
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    commands: u32,
}

impl Renderer for HeadlessRenderer {
    type Error = Infallible;

    fn clear(&mut self, color: Color) {
        self.commands = 1;
        log::trace!("clear {:?}", color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands += 1;
        log::trace!("circle ({}, {}) r={} {:?}", center.x, center.y, radius, color);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands += 1;
        log::trace!(
            "rect ({}, {}) {}x{} {:?}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color
        );
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.commands += 1;
        log::trace!("text {:?} at ({}, {}) {:?}", text, pos.x, pos.y, color);
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.frames += 1;
        log::trace!("present frame {} ({} commands)", self.frames, self.commands);
        Ok(())
    }
}

/// Plays by itself: heads for the basket, sidesteps obstacles, restarts a
/// few times, then quits
pub struct AutopilotInput {
    max_restarts: u32,
    max_polls: u64,
    restarts: u32,
    polls: u64,
}

impl AutopilotInput {
    pub fn new(max_restarts: u32, max_polls: u64) -> Self {
        Self {
            max_restarts,
            max_polls,
            restarts: 0,
            polls: 0,
        }
    }

    /// Keys that move the ball toward the basket without touching an obstacle
    fn steer(state: &GameState) -> TickInput {
        let speed = state.config.ball_speed;
        let ball = &state.ball;
        let delta = state.basket.center() - ball.pos;

        // Inside one step on an axis: hold still on that axis
        let axis = |d: f32| {
            if d > speed {
                1.0
            } else if d < -speed {
                -1.0
            } else {
                0.0
            }
        };
        let toward = Vec2::new(axis(delta.x), axis(delta.y));

        let candidates = [toward, Vec2::new(toward.x, 0.0), Vec2::new(0.0, toward.y)];
        let safe = candidates.into_iter().find(|dir| {
            let next = ball.pos + *dir * speed;
            !state
                .obstacles
                .iter()
                .any(|o| circle_intersects_rect(next, ball.radius, &o.rect()))
        });

        let dir = safe.unwrap_or(Vec2::ZERO);
        TickInput {
            left: dir.x < 0.0,
            right: dir.x > 0.0,
            up: dir.y < 0.0,
            down: dir.y > 0.0,
            launch: false,
        }
    }
}

impl InputSource for AutopilotInput {
    fn poll(&mut self, state: &GameState) -> PolledInput {
        self.polls += 1;
        if self.polls >= self.max_polls {
            return PolledInput {
                quit: true,
                ..Default::default()
            };
        }

        if state.session.is_game_over() {
            if self.restarts >= self.max_restarts {
                return PolledInput {
                    quit: true,
                    ..Default::default()
                };
            }
            self.restarts += 1;
            return PolledInput {
                restart: true,
                ..Default::default()
            };
        }

        PolledInput {
            keys: Self::steer(state),
            ..Default::default()
        }
    }
}
