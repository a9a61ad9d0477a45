//! Angle, rotation and line-intersection helpers
//!
//! All angles are in degrees. Which axis reads as 0° is an explicit
//! [`AngleConvention`] instead of a constant baked into each helper.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PARALLEL_EPSILON, RAY_EXTENSION};
use crate::error::SimError;

/// Where 0° points, as an offset (degrees) from the +x axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleConvention {
    pub offset_deg: f32,
}

impl AngleConvention {
    /// 0° = +x, counter-clockwise positive
    pub const RIGHT_IS_ZERO: Self = Self { offset_deg: 0.0 };
    /// 0° = +y, so 90° points left and 270° points right
    pub const UP_IS_ZERO: Self = Self { offset_deg: 90.0 };

    pub fn new(offset_deg: f32) -> Self {
        Self { offset_deg }
    }
}

impl Default for AngleConvention {
    fn default() -> Self {
        Self::UP_IS_ZERO
    }
}

/// Wrap degrees into [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Heading of `v` in degrees, normalized into [0, 360)
pub fn vector_to_angle(v: Vec2, convention: AngleConvention) -> f32 {
    let n = v.normalize_or_zero();
    normalize_degrees(n.y.atan2(n.x).to_degrees() - convention.offset_deg)
}

/// Unit vector for a heading in degrees (inverse of [`vector_to_angle`])
pub fn angle_to_vector(degrees: f32, convention: AngleConvention) -> Vec2 {
    let radians = (degrees + convention.offset_deg).to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Rotate `point` about `origin` by `degrees`, clockwise positive
pub fn rotate_point(point: Vec2, degrees: f32, origin: Vec2) -> Vec2 {
    let (sin, cos) = (-degrees).to_radians().sin_cos();
    let p = point - origin;
    Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos) + origin
}

/// Intersection of the infinite lines through `a1`-`b1` and `a2`-`b2`
///
/// Fails with [`SimError::DegenerateGeometry`] when the lines are parallel
/// (or either pair of points coincides).
pub fn line_intersection(a1: Vec2, b1: Vec2, a2: Vec2, b2: Vec2) -> Result<Vec2, SimError> {
    // Line 1 as A1 x + B1 y = C1
    let a_1 = b1.y - a1.y;
    let b_1 = a1.x - b1.x;
    let c_1 = a_1 * a1.x + b_1 * a1.y;

    // Line 2 as A2 x + B2 y = C2
    let a_2 = b2.y - a2.y;
    let b_2 = a2.x - b2.x;
    let c_2 = a_2 * a2.x + b_2 * a2.y;

    let delta = a_1 * b_2 - a_2 * b_1;
    if delta.abs() < PARALLEL_EPSILON {
        return Err(SimError::DegenerateGeometry("lines are parallel"));
    }

    Ok(Vec2::new(
        (b_2 * c_1 - b_1 * c_2) / delta,
        (a_1 * c_2 - a_2 * c_1) / delta,
    ))
}

/// Where the ray from `origin` along `direction` meets the vertical line at `x`
pub fn line_intersect_at_x(direction: Vec2, origin: Vec2, x: f32) -> Result<Vec2, SimError> {
    let far = origin + direction * RAY_EXTENSION;
    line_intersection(origin, far, Vec2::new(x, 1.0), Vec2::new(x, -1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_up_is_zero_convention() {
        let up = AngleConvention::UP_IS_ZERO;
        assert!((vector_to_angle(Vec2::Y, up) - 0.0).abs() < 1e-4);
        assert!((vector_to_angle(Vec2::NEG_X, up) - 90.0).abs() < 1e-4);
        assert!((vector_to_angle(Vec2::NEG_Y, up) - 180.0).abs() < 1e-4);
        assert!((vector_to_angle(Vec2::X, up) - 270.0).abs() < 1e-4);
        assert!(approx(angle_to_vector(90.0, up), Vec2::NEG_X));
    }

    #[test]
    fn test_right_is_zero_convention() {
        let right = AngleConvention::RIGHT_IS_ZERO;
        assert!((vector_to_angle(Vec2::X, right)).abs() < 1e-4);
        assert!((vector_to_angle(Vec2::new(0.0, 3.0), right) - 90.0).abs() < 1e-4);
        assert!(approx(angle_to_vector(180.0, right), Vec2::NEG_X));
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }

    #[test]
    fn test_rotate_point_clockwise() {
        // +90° clockwise takes "up" to "right"
        let p = rotate_point(Vec2::new(0.0, 1.0), 90.0, Vec2::ZERO);
        assert!(approx(p, Vec2::new(1.0, 0.0)));

        let origin = Vec2::new(2.0, 2.0);
        let p = rotate_point(Vec2::new(3.0, 2.0), 180.0, origin);
        assert!(approx(p, Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_line_intersection_crossing() {
        let p = line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        )
        .unwrap();
        assert!(approx(p, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_parallel_lines_are_degenerate() {
        let result = line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 2.0),
        );
        assert!(matches!(result, Err(SimError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_nearly_parallel_lines_are_degenerate() {
        let result = line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0 + 1e-7),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_line_intersect_at_x() {
        let p = line_intersect_at_x(Vec2::new(5.0, 5.0), Vec2::ZERO, 4.0).unwrap();
        assert!(approx(p, Vec2::new(4.0, 4.0)));

        // Behind the origin still resolves: the lines are infinite
        let p = line_intersect_at_x(Vec2::new(1.0, 0.5), Vec2::new(2.0, 0.0), -2.0).unwrap();
        assert!(approx(p, Vec2::new(-2.0, -2.0)));
    }

    #[test]
    fn test_vertical_ray_never_meets_vertical_line() {
        assert!(line_intersect_at_x(Vec2::new(0.0, 3.0), Vec2::ZERO, 4.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_angle_round_trip(x in -100.0f32..100.0, y in -100.0f32..100.0, offset in -180.0f32..180.0) {
            let v = Vec2::new(x, y);
            prop_assume!(v.length() > 1e-3);
            let convention = AngleConvention::new(offset);
            let back = angle_to_vector(vector_to_angle(v, convention), convention);
            prop_assert!((back.length() - 1.0).abs() < 1e-4);
            prop_assert!(back.dot(v.normalize()) > 0.9999);
        }

        #[test]
        fn prop_angle_in_range(x in -100.0f32..100.0, y in -100.0f32..100.0) {
            let a = vector_to_angle(Vec2::new(x, y), AngleConvention::UP_IS_ZERO);
            prop_assert!((0.0..360.0).contains(&a));
        }
    }
}
