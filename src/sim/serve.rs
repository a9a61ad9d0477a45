//! Serve and reset sequencing
//!
//! Waiting is carried as a countdown advanced by [`ServeMachine::tick`]; a
//! reset simply overwrites the current phase.
//!
//! ```text
//! Idle --start--> CountingDown --timer--> Launched
//!                                            |
//!          score (Center) -> CountingDown <--+
//!  score (PaddleAttached) -> AttachedToPaddle --timer--> Launched
//! ```

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{AngleConvention, angle_to_vector};
use super::paddle::Paddle;
use super::state::{Ball, Side};
use crate::config::SimConfig;
use crate::consts::TIMER_EPSILON;

/// Serve angle range toward the left goal (degrees, 0° = up)
pub const LEFT_SERVE_DEGREES: (f32, f32) = (30.0, 150.0);
/// Serve angle range toward the right goal (degrees, 0° = up)
pub const RIGHT_SERVE_DEGREES: (f32, f32) = (210.0, 330.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServePhase {
    /// Nothing started yet
    Idle,
    /// Ball pinned at center until the timer runs out
    CountingDown,
    /// Ball riding in front of the serving paddle
    AttachedToPaddle,
    /// Ball in flight
    Launched,
}

/// Serve heading toward `side`'s goal, strictly inside its range (both ends open)
pub fn random_serve_degrees<R: Rng + ?Sized>(side: Side, rng: &mut R) -> f32 {
    let (lo, hi) = match side {
        Side::Left => LEFT_SERVE_DEGREES,
        Side::Right => RIGHT_SERVE_DEGREES,
    };
    loop {
        let degrees = rng.random_range(lo..hi);
        if degrees > lo {
            return degrees;
        }
    }
}

/// Random diagonal serve toward `side`'s goal
pub fn random_serve_velocity<R: Rng + ?Sized>(side: Side, speed: f32, rng: &mut R) -> Vec2 {
    let degrees = random_serve_degrees(side, rng);
    angle_to_vector(degrees, AngleConvention::UP_IS_ZERO) * speed
}

/// Straight-across serve from `side`'s paddle toward the other goal
pub fn attached_serve_velocity(side: Side, speed: f32) -> Vec2 {
    Vec2::new(side.opposite().sign() * speed, 0.0)
}

pub fn random_side<R: Rng + ?Sized>(rng: &mut R) -> Side {
    if rng.random_bool(0.5) {
        Side::Left
    } else {
        Side::Right
    }
}

/// Owns ball placement between points.
///
/// `side` means "served toward" for a center countdown and "serving paddle"
/// while attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeMachine {
    phase: ServePhase,
    side: Side,
    remaining: f32,
}

impl Default for ServeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ServeMachine {
    pub fn new() -> Self {
        Self {
            phase: ServePhase::Idle,
            side: Side::Left,
            remaining: 0.0,
        }
    }

    pub fn phase(&self) -> ServePhase {
        self.phase
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Seconds left before launch (zero once launched)
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_launched(&self) -> bool {
        self.phase == ServePhase::Launched
    }

    /// Center the ball and count down before serving toward `side`.
    ///
    /// Cancels any countdown or attachment already in progress.
    pub fn begin_countdown(&mut self, side: Side, ball: &mut Ball, delay: f32) {
        ball.hold_at(Vec2::ZERO);
        self.phase = ServePhase::CountingDown;
        self.side = side;
        self.remaining = delay;
        log::info!("Serve countdown toward {} ({:.1}s)", side.as_str(), delay);
    }

    /// Park the ball `offset` in front of `paddle` and follow it until launch.
    ///
    /// Only one paddle can hold the ball: attaching replaces any earlier
    /// attachment.
    pub fn attach(&mut self, paddle: &Paddle, ball: &mut Ball, offset: f32, duration: f32) {
        let x = paddle.pos.x - paddle.side.sign() * offset;
        ball.hold_at(Vec2::new(x, paddle.pos.y));
        self.phase = ServePhase::AttachedToPaddle;
        self.side = paddle.side;
        self.remaining = duration;
        log::info!("Ball attached to {} paddle ({:.1}s)", paddle.side.as_str(), duration);
    }

    /// Leave `Idle`: countdown toward `hint`, or a random side
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        hint: Option<Side>,
        ball: &mut Ball,
        config: &SimConfig,
        rng: &mut R,
    ) -> Side {
        let side = hint.unwrap_or_else(|| random_side(rng));
        self.begin_countdown(side, ball, config.ball_start_delay_seconds);
        side
    }

    /// Manual reset: interrupt anything and restart a center countdown
    pub fn reset<R: Rng + ?Sized>(&mut self, ball: &mut Ball, config: &SimConfig, rng: &mut R) -> Side {
        log::info!("Manual reset from {:?}", self.phase);
        self.start(None, ball, config, rng)
    }

    /// Advance timers by `dt`. Returns the launch velocity on the tick the
    /// ball is released.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        ball: &mut Ball,
        paddles: &[Paddle; 2],
        config: &SimConfig,
        rng: &mut R,
    ) -> Option<Vec2> {
        match self.phase {
            ServePhase::Idle | ServePhase::Launched => None,
            ServePhase::CountingDown => {
                ball.hold_at(Vec2::ZERO);
                self.remaining -= dt;
                log::trace!("Time remaining: {:.3}", self.remaining);

                if self.remaining <= TIMER_EPSILON {
                    let velocity = random_serve_velocity(self.side, ball.start_speed, rng);
                    Some(self.launch(ball, velocity))
                } else {
                    None
                }
            }
            ServePhase::AttachedToPaddle => {
                let paddle = &paddles[self.side.index()];
                self.remaining -= dt;

                let t = (config.serve_follow_smoothing * dt).clamp(0.0, 1.0);
                ball.pos.y += (paddle.pos.y - ball.pos.y) * t;
                ball.vel = Vec2::ZERO;

                if self.remaining <= TIMER_EPSILON {
                    let velocity = attached_serve_velocity(self.side, ball.start_speed);
                    Some(self.launch(ball, velocity))
                } else {
                    None
                }
            }
        }
    }

    fn launch(&mut self, ball: &mut Ball, velocity: Vec2) -> Vec2 {
        self.phase = ServePhase::Launched;
        self.remaining = 0.0;
        ball.vel = velocity;
        log::debug!("Launched toward {:?} at {:.2}", velocity, velocity.length());
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::vector_to_angle;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (ServeMachine, Ball, [Paddle; 2], SimConfig, Pcg32) {
        let config = SimConfig::default();
        let ball = Ball::new(config.start_speed, config.speed_increase_per_bounce);
        let paddles = [
            Paddle::new(Side::Left, config.paddle_x),
            Paddle::new(Side::Right, config.paddle_x),
        ];
        (ServeMachine::new(), ball, paddles, config, Pcg32::seed_from_u64(12345))
    }

    #[test]
    fn test_countdown_launches_after_delay() {
        let (mut serve, mut ball, paddles, mut config, mut rng) = setup();
        config.ball_start_delay_seconds = 1.5;
        assert_eq!(serve.phase(), ServePhase::Idle);

        serve.start(Some(Side::Right), &mut ball, &config, &mut rng);
        assert_eq!(serve.phase(), ServePhase::CountingDown);
        assert_eq!(serve.remaining(), 1.5);

        for i in 0..15 {
            assert_ne!(serve.phase(), ServePhase::Launched, "launched early at tick {i}");
            serve.tick(0.1, &mut ball, &paddles, &config, &mut rng);
        }
        assert_eq!(serve.phase(), ServePhase::Launched);
        assert_eq!(serve.remaining(), 0.0);
        assert!((ball.speed() - config.start_speed).abs() < 1e-4);
    }

    #[test]
    fn test_countdown_pins_ball_at_center() {
        let (mut serve, mut ball, paddles, config, mut rng) = setup();
        ball.pos = Vec2::new(3.0, 2.0);
        ball.vel = Vec2::new(1.0, 1.0);
        serve.start(None, &mut ball, &config, &mut rng);
        serve.tick(0.1, &mut ball, &paddles, &config, &mut rng);
        assert_eq!(ball.pos, Vec2::ZERO);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_serve_angles_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let up = AngleConvention::UP_IS_ZERO;
        for _ in 0..1000 {
            let left = vector_to_angle(random_serve_velocity(Side::Left, 8.0, &mut rng), up);
            assert!((30.0 - 1e-3..=150.0 + 1e-3).contains(&left), "left serve at {left}");

            let right = vector_to_angle(random_serve_velocity(Side::Right, 8.0, &mut rng), up);
            assert!((210.0 - 1e-3..=330.0 + 1e-3).contains(&right), "right serve at {right}");
        }
    }

    #[test]
    fn test_serve_degrees_exclude_range_ends() {
        let mut rng = Pcg32::seed_from_u64(31);
        for _ in 0..1000 {
            let left = random_serve_degrees(Side::Left, &mut rng);
            assert!(left > LEFT_SERVE_DEGREES.0 && left < LEFT_SERVE_DEGREES.1, "left serve at {left}");

            let right = random_serve_degrees(Side::Right, &mut rng);
            assert!(right > RIGHT_SERVE_DEGREES.0 && right < RIGHT_SERVE_DEGREES.1, "right serve at {right}");
        }
    }

    #[test]
    fn test_serve_heads_toward_its_side() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..100 {
            assert!(random_serve_velocity(Side::Left, 8.0, &mut rng).x < 0.0);
            assert!(random_serve_velocity(Side::Right, 8.0, &mut rng).x > 0.0);
        }
    }

    #[test]
    fn test_attached_ball_follows_paddle_then_launches_across() {
        let (mut serve, mut ball, mut paddles, config, mut rng) = setup();
        serve.attach(&paddles[Side::Right.index()], &mut ball, config.serve_offset_distance, 1.0);
        assert_eq!(serve.phase(), ServePhase::AttachedToPaddle);
        assert_eq!(
            ball.pos,
            Vec2::new(config.paddle_x - config.serve_offset_distance, 0.0)
        );

        paddles[1].pos.y = 3.0;
        let mut launched = None;
        for _ in 0..20 {
            if let Some(v) = serve.tick(0.1, &mut ball, &paddles, &config, &mut rng) {
                launched = Some(v);
                break;
            }
            assert!(ball.pos.y > 0.0 && ball.pos.y <= 3.0);
        }

        let v = launched.expect("attached serve should launch");
        assert_eq!(v, Vec2::new(-config.start_speed, 0.0));
        assert!((ball.pos.y - 3.0).abs() < 0.1, "ball should have caught up with the paddle");
    }

    #[test]
    fn test_attaching_replaces_other_side() {
        let (mut serve, mut ball, paddles, _config, _rng) = setup();
        serve.attach(&paddles[0], &mut ball, 1.0, 1.5);
        serve.attach(&paddles[1], &mut ball, 1.0, 1.5);
        assert_eq!(serve.side(), Side::Right);
        assert!(ball.pos.x > 0.0);
    }

    #[test]
    fn test_reset_cancels_attachment() {
        let (mut serve, mut ball, paddles, config, mut rng) = setup();
        serve.attach(&paddles[0], &mut ball, 1.0, 1.5);
        serve.tick(0.5, &mut ball, &paddles, &config, &mut rng);

        serve.reset(&mut ball, &config, &mut rng);
        assert_eq!(serve.phase(), ServePhase::CountingDown);
        assert_eq!(serve.remaining(), config.ball_start_delay_seconds);
        assert_eq!(ball.pos, Vec2::ZERO);
    }

    #[test]
    fn test_launched_and_idle_ignore_ticks() {
        let (mut serve, mut ball, paddles, config, mut rng) = setup();
        assert!(serve.tick(1.0, &mut ball, &paddles, &config, &mut rng).is_none());
        assert_eq!(serve.phase(), ServePhase::Idle);

        serve.start(Some(Side::Left), &mut ball, &config, &mut rng);
        serve.tick(10.0, &mut ball, &paddles, &config, &mut rng);
        let v = ball.vel;
        assert!(serve.tick(1.0, &mut ball, &paddles, &config, &mut rng).is_none());
        assert_eq!(ball.vel, v);
    }
}
