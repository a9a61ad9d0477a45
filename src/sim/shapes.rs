//! Simple point-containment shapes
//!
//! Hosts build their contact detection from these; the simulation core itself
//! never searches for collisions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::rotate_point;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxShape {
    pub center: Vec2,
    pub size: Vec2,
}

impl BoxShape {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Strictly inside (edges excluded)
    pub fn contains_point(&self, point: Vec2) -> bool {
        let half = self.size * 0.5;
        point.x > self.center.x - half.x
            && point.x < self.center.x + half.x
            && point.y > self.center.y - half.y
            && point.y < self.center.y + half.y
    }

    /// Same box grown by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            center: self.center,
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Vec2,
    pub radius: f32,
}

impl CircleShape {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Inside or on the rim
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }
}

/// Line segment described by center, length and a clockwise rotation.
///
/// At zero rotation the segment is vertical.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeShape {
    pub center: Vec2,
    pub length: f32,
    /// Degrees, clockwise positive
    pub rotation: f32,
}

impl EdgeShape {
    pub fn new(center: Vec2, length: f32, rotation: f32) -> Self {
        Self {
            center,
            length,
            rotation,
        }
    }

    pub fn point_a(&self) -> Vec2 {
        let unrotated = self.center + Vec2::Y * self.length / 2.0;
        rotate_point(unrotated, self.rotation, self.center)
    }

    pub fn point_b(&self) -> Vec2 {
        let unrotated = self.center + Vec2::NEG_Y * self.length / 2.0;
        rotate_point(unrotated, self.rotation, self.center)
    }

    /// Shortest distance from `point` to the segment
    pub fn distance_to_point(&self, point: Vec2) -> f32 {
        let a = self.point_a();
        let b = self.point_b();
        let line = b - a;
        let len_sq = line.length_squared();
        if len_sq < 0.0001 {
            return point.distance(a);
        }
        let t = ((point - a).dot(line) / len_sq).clamp(0.0, 1.0);
        point.distance(a + line * t)
    }
}
