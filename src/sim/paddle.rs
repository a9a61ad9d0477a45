//! Paddle movement and computer steering
//!
//! Input polling stays with the host: a paddle only sees an axis value that
//! has already been resolved to [-1, 1].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Side;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Paddle center
    pub pos: Vec2,
    /// Steered by [`Paddle::steer_axis`] instead of host input
    pub computer_controlled: bool,
}

impl Paddle {
    /// Paddle for `side`, centered vertically at `x = side.sign() * paddle_x`
    pub fn new(side: Side, paddle_x: f32) -> Self {
        Self {
            side,
            pos: Vec2::new(side.sign() * paddle_x, 0.0),
            computer_controlled: false,
        }
    }

    /// Move vertically by `axis` (1 = up, -1 = down), staying within `±travel_limit`
    pub fn apply_axis(&mut self, axis: f32, dt: f32, speed: f32, travel_limit: f32) {
        let axis = axis.clamp(-1.0, 1.0);
        let y = self.pos.y + speed * dt * axis;
        self.pos.y = y.clamp(-travel_limit, travel_limit);
    }

    /// Axis that moves this paddle toward `target_y`, idle inside the dead zone
    pub fn steer_axis(&self, target_y: f32, error_margin: f32) -> f32 {
        let diff = target_y - self.pos.y;
        if diff > error_margin {
            1.0
        } else if diff < -error_margin {
            -1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_placement() {
        assert_eq!(Paddle::new(Side::Left, 8.0).pos, Vec2::new(-8.0, 0.0));
        assert_eq!(Paddle::new(Side::Right, 8.0).pos, Vec2::new(8.0, 0.0));
    }

    #[test]
    fn test_apply_axis_moves_and_clamps() {
        let mut paddle = Paddle::new(Side::Left, 8.0);
        paddle.apply_axis(1.0, 0.1, 10.0, 4.0);
        assert!((paddle.pos.y - 1.0).abs() < 1e-6);

        paddle.apply_axis(1.0, 10.0, 10.0, 4.0);
        assert_eq!(paddle.pos.y, 4.0);

        // Over-range axis input is clamped to full speed
        paddle.apply_axis(-5.0, 0.1, 10.0, 4.0);
        assert!((paddle.pos.y - 3.0).abs() < 1e-6);
        assert_eq!(paddle.pos.x, -8.0);
    }

    #[test]
    fn test_steer_axis_dead_zone() {
        let paddle = Paddle::new(Side::Right, 8.0);
        assert_eq!(paddle.steer_axis(2.0, 0.25), 1.0);
        assert_eq!(paddle.steer_axis(-2.0, 0.25), -1.0);
        assert_eq!(paddle.steer_axis(0.2, 0.25), 0.0);
    }
}
