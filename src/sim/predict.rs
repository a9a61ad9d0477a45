//! Forward trajectory prediction for computer paddles
//!
//! Works on copies only: the ball is projected from paddle plane to paddle
//! plane, bouncing with the same law as real paddle contacts. Walls are not
//! considered between planes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::line_intersect_at_x;
use super::paddle::Paddle;
use super::reflect::{ContactEvent, reflect};
use super::state::Side;
use crate::config::SimConfig;

/// Minimum x gap for a paddle to count as "ahead" of the ball
const AHEAD_EPSILON: f32 = 1e-4;
/// Bounces are evaluated this far in front of the struck face
const APPROACH_NUDGE: f32 = 1e-3;

/// One step of a predicted flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionFrame {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Paddle whose plane this frame sits on, if any
    pub collided_with: Option<Side>,
}

impl PredictionFrame {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            collided_with: None,
        }
    }
}

/// Nearest paddle in the direction of travel, inside the field
fn next_paddle<'a>(pos: Vec2, vel: Vec2, paddles: &'a [Paddle], field_x_bound: f32) -> Option<&'a Paddle> {
    paddles
        .iter()
        .filter(|p| p.pos.x.abs() <= field_x_bound)
        .filter(|p| (p.pos.x - pos.x) * vel.x > AHEAD_EPSILON)
        .min_by(|a, b| (a.pos.x - pos.x).abs().total_cmp(&(b.pos.x - pos.x).abs()))
}

/// Open trajectory: record where the ball leaves the field
fn push_exit(path: &mut Vec<PredictionFrame>, frame: &PredictionFrame, field_x_bound: f32) {
    let goal_x = frame.velocity.x.signum() * field_x_bound;
    match line_intersect_at_x(frame.velocity, frame.position, goal_x) {
        Ok(exit) => path.push(PredictionFrame::new(exit, frame.velocity)),
        Err(e) => log::warn!("Prediction stopped: {e}"),
    }
}

/// Every frame of the predicted flight, in order (the start is not included).
///
/// Stops after `max_bounces` paddle planes, at the plane of `own` (the
/// caller's paddle, which is expected to move there), or at the goal line
/// when no paddle ahead is in reach. An empty path means the flight could not
/// be projected at all.
pub fn predict_path(
    start_pos: Vec2,
    start_vel: Vec2,
    max_bounces: u32,
    paddles: &[Paddle],
    own: Option<Side>,
    config: &SimConfig,
) -> Vec<PredictionFrame> {
    let field_x_bound = config.goal_bounds_x;
    let mut path = Vec::new();
    let mut frame = PredictionFrame::new(start_pos, start_vel);

    for _ in 0..max_bounces {
        let Some(paddle) = next_paddle(frame.position, frame.velocity, paddles, field_x_bound) else {
            push_exit(&mut path, &frame, field_x_bound);
            return path;
        };

        let hit = match line_intersect_at_x(frame.velocity, frame.position, paddle.pos.x) {
            Ok(hit) => hit,
            Err(e) => {
                log::warn!("Prediction stopped: {e}");
                return path;
            }
        };

        if Some(paddle.side) == own {
            path.push(PredictionFrame {
                position: hit,
                velocity: frame.velocity,
                collided_with: Some(paddle.side),
            });
            return path;
        }

        // Other paddles hold still: a ball outside their reach flies past
        if (hit.y - paddle.pos.y).abs() > config.paddle_half_height {
            push_exit(&mut path, &frame, field_x_bound);
            return path;
        }

        let face = hit - Vec2::new(frame.velocity.x.signum() * APPROACH_NUDGE, 0.0);
        let velocity = reflect(
            frame.velocity,
            &ContactEvent::paddle(paddle.pos),
            face,
            &config.reflect_curve,
            config.paddle_half_height,
            config.speed_increase_per_bounce,
        );

        frame = PredictionFrame {
            position: hit,
            velocity,
            collided_with: Some(paddle.side),
        };
        path.push(frame);
    }

    path
}

/// Final frame of [`predict_path`], or the start frame if nothing could be
/// projected
pub fn predict(
    start_pos: Vec2,
    start_vel: Vec2,
    max_bounces: u32,
    paddles: &[Paddle],
    own: Option<Side>,
    config: &SimConfig,
) -> PredictionFrame {
    predict_path(start_pos, start_vel, max_bounces, paddles, own, config)
        .last()
        .copied()
        .unwrap_or_else(|| PredictionFrame::new(start_pos, start_vel))
}
