//! Bounce response for paddle and wall contacts
//!
//! The host detects the contact; this module only decides the outgoing
//! velocity. Paddle hits add spin from the reflect curve and speed the ball
//! up; wall hits are a plain mirror.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::config::ReflectCurve;

/// What the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikerKind {
    Paddle,
    Wall,
}

/// A single contact reported by the host's collision detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub kind: StrikerKind,
    /// Center of the struck object
    pub position: Vec2,
    /// Struck object's transform x, used to tell which face was hit
    pub transform_x: f32,
}

impl ContactEvent {
    pub fn paddle(position: Vec2) -> Self {
        Self {
            kind: StrikerKind::Paddle,
            position,
            transform_x: position.x,
        }
    }

    pub fn wall(position: Vec2) -> Self {
        Self {
            kind: StrikerKind::Wall,
            position,
            transform_x: position.x,
        }
    }

    /// Which paddle this contact belongs to, judged by field half
    pub fn side(&self) -> Side {
        if self.transform_x < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Contact offset from paddle center mapped onto [-1, 1]
#[inline]
pub fn paddle_offset(ball_pos: Vec2, paddle_pos: Vec2, half_height: f32) -> f32 {
    ((ball_pos.y - paddle_pos.y) / half_height).clamp(-1.0, 1.0)
}

/// Normal used for a paddle bounce, tilted by the hit offset.
///
/// The tilt direction follows which face was struck (paddle x vs. ball x),
/// not which half of the field the paddle belongs to.
pub fn paddle_normal(ball_pos: Vec2, contact: &ContactEvent, curve: &ReflectCurve, half_height: f32) -> Vec2 {
    let offset = paddle_offset(ball_pos, contact.position, half_height);
    let strength = curve.evaluate(offset.abs());
    let sign = if contact.transform_x <= ball_pos.x { 1.0 } else { -1.0 };

    log::debug!(
        "Paddle hit: uncurved={:.3} curved={:.3}",
        offset,
        offset * strength
    );

    Vec2::new(sign * offset * strength, -1.0).normalize()
}

/// Outgoing velocity after `contact`.
///
/// Walls mirror the vertical component and keep speed. Paddles reflect about
/// the tilted normal, reverse, and scale by `1 + speed_increase`, so every
/// paddle bounce speeds the ball up for the rest of the rally.
pub fn reflect(
    incoming: Vec2,
    contact: &ContactEvent,
    ball_pos: Vec2,
    curve: &ReflectCurve,
    half_height: f32,
    speed_increase: f32,
) -> Vec2 {
    match contact.kind {
        StrikerKind::Wall => -reflect_velocity(incoming, Vec2::NEG_X),
        StrikerKind::Paddle => {
            let normal = paddle_normal(ball_pos, contact, curve, half_height);
            -reflect_velocity(incoming, normal) * (1.0 + speed_increase)
        }
    }
}
