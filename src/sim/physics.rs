//! Ball movement: steering, launch, gravity, walls
//!
//! Units are pixels and ticks; there is no dt; every call is one tick.

use glam::Vec2;

use super::rng::SimRng;
use super::state::Ball;
use crate::clamp_to_playfield;
use crate::config::GameConfig;

/// What the integration step ran into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Reached a side wall (vx flipped)
    pub side_wall: bool,
    /// Reached the ceiling (vy flipped)
    pub ceiling: bool,
    /// Came to rest on the floor
    pub floor: bool,
}

/// Nudge the ball by `ball_speed` per held direction
///
/// `dir` components are -1, 0 or 1; opposite keys cancel.
pub fn steer(ball: &mut Ball, dir: Vec2, speed: f32) {
    ball.pos += dir * speed;
}

/// Start free flight: vx random in the launch range, vy fixed upward
pub fn launch(ball: &mut Ball, config: &GameConfig, rng: &mut SimRng) -> Vec2 {
    let (min, max) = config.launch_vx_range;
    let vx = rng.range_inclusive(min, max) as f32;
    ball.vel = Vec2::new(vx, config.launch_vy);
    ball.vel
}

/// Keep the ball inside `[radius, size - radius]` on both axes
pub fn clamp(ball: &mut Ball, size: Vec2) {
    ball.pos = clamp_to_playfield(ball.pos, ball.radius, size);
}

/// One tick of ballistic motion
///
/// Gravity only acts while the ball is rising (vy < 0). Once vy reaches zero
/// or turns positive the ball keeps whatever vertical speed it has.
pub fn integrate(ball: &mut Ball, config: &GameConfig) -> Contacts {
    let r = ball.radius;
    let mut contacts = Contacts::default();

    if ball.vel.y < 0.0 {
        ball.vel.y += config.gravity;
    }

    ball.pos += ball.vel;

    if ball.pos.x <= r || ball.pos.x >= config.width - r {
        ball.vel.x = -ball.vel.x;
        contacts.side_wall = true;
    }

    if ball.pos.y <= r {
        ball.vel.y = -ball.vel.y;
        contacts.ceiling = true;
    }

    if ball.pos.y >= config.height - r {
        ball.pos.y = config.height - r;
        ball.vel = Vec2::ZERO;
        contacts.floor = true;
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(Vec2::new(x, y), 15.0)
    }

    #[test]
    fn test_steer_and_cancel() {
        let mut ball = ball_at(400.0, 300.0);
        steer(&mut ball, Vec2::new(-1.0, 1.0), 5.0);
        assert_eq!(ball.pos, Vec2::new(395.0, 305.0));

        steer(&mut ball, Vec2::ZERO, 5.0);
        assert_eq!(ball.pos, Vec2::new(395.0, 305.0));
    }

    #[test]
    fn test_launch_velocity() {
        let config = GameConfig::classic();
        let mut rng = SimRng::new(8);
        for _ in 0..50 {
            let mut ball = ball_at(400.0, 550.0);
            let vel = launch(&mut ball, &config, &mut rng);
            assert_eq!(vel, ball.vel);
            assert_eq!(vel.y, -10.0);
            assert!((-5.0..=5.0).contains(&vel.x));
            assert_eq!(vel.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_clamp_corners() {
        let size = Vec2::new(800.0, 600.0);
        let mut ball = ball_at(-40.0, 900.0);
        clamp(&mut ball, size);
        assert_eq!(ball.pos, Vec2::new(15.0, 585.0));

        let mut ball = ball_at(812.0, 3.0);
        clamp(&mut ball, size);
        assert_eq!(ball.pos, Vec2::new(785.0, 15.0));
    }

    #[test]
    fn test_gravity_while_rising() {
        let config = GameConfig::classic();
        let mut ball = ball_at(400.0, 550.0);
        ball.vel = Vec2::new(3.0, -10.0);

        let mut last_vy = ball.vel.y;
        for t in 1..=20 {
            integrate(&mut ball, &config);
            let expected = -10.0 + 0.5 * t as f32;
            assert!((ball.vel.y - expected).abs() < 1e-5, "tick {}", t);
            assert!(ball.vel.y > last_vy);
            last_vy = ball.vel.y;
        }
        assert_eq!(ball.vel.y, 0.0);
        // 20 ticks of rise: sum of (-10 + 0.5t) for t = 1..=20
        assert!((ball.pos.y - (550.0 - 95.0)).abs() < 1e-3);
        assert!((ball.pos.x - 460.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_gravity_when_not_rising() {
        let config = GameConfig::classic();
        let mut ball = ball_at(400.0, 300.0);
        ball.vel = Vec2::new(0.0, 4.0);
        integrate(&mut ball, &config);
        assert_eq!(ball.vel.y, 4.0);

        ball.vel = Vec2::ZERO;
        integrate(&mut ball, &config);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.pos, Vec2::new(400.0, 304.0));
    }

    #[test]
    fn test_side_wall_bounce() {
        let config = GameConfig::classic();
        let mut ball = ball_at(20.0, 300.0);
        ball.vel = Vec2::new(-5.0, 2.0);
        let contacts = integrate(&mut ball, &config);
        assert!(contacts.side_wall);
        assert_eq!(ball.vel.x, 5.0);
    }

    #[test]
    fn test_ceiling_bounce() {
        let config = GameConfig::classic();
        let mut ball = ball_at(400.0, 20.0);
        ball.vel = Vec2::new(0.0, -8.0);
        let contacts = integrate(&mut ball, &config);
        assert!(contacts.ceiling);
        // -8 + 0.5 = -7.5, flipped
        assert_eq!(ball.vel.y, 7.5);
    }

    #[test]
    fn test_floor_stops_ball() {
        let config = GameConfig::classic();
        let mut ball = ball_at(400.0, 580.0);
        ball.vel = Vec2::new(2.0, 6.0);
        let contacts = integrate(&mut ball, &config);
        assert!(contacts.floor);
        assert_eq!(ball.pos.y, 585.0);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_resting_on_floor_counts_as_floor() {
        let config = GameConfig::classic();
        let mut ball = ball_at(400.0, 585.0);
        assert!(integrate(&mut ball, &config).floor);
    }

    proptest! {
        #[test]
        fn prop_clamp_keeps_ball_inside(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            let mut ball = ball_at(x, y);
            clamp(&mut ball, Vec2::new(800.0, 600.0));
            prop_assert!(ball.pos.x >= 15.0 && ball.pos.x <= 785.0);
            prop_assert!(ball.pos.y >= 15.0 && ball.pos.y <= 585.0);
        }
    }
}
