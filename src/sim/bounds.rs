//! Goal and out-of-play detection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Side;

/// Ball went through a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// The goal the ball crossed (this side concedes)
    pub side: Side,
}

impl ScoreEvent {
    /// Player credited with the point
    pub fn scorer(&self) -> Side {
        self.side.opposite()
    }
}

/// Result of a single bounds observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsEvent {
    Goal(ScoreEvent),
    /// Left over the top or bottom; nobody scores
    OutOfPlay,
}

/// Positional goal check: `Left` past `-goal_bounds_x`, `Right` past `+goal_bounds_x`
pub fn check_bounds(pos: Vec2, goal_bounds_x: f32) -> Option<ScoreEvent> {
    if pos.x < -goal_bounds_x {
        Some(ScoreEvent { side: Side::Left })
    } else if pos.x > goal_bounds_x {
        Some(ScoreEvent { side: Side::Right })
    } else {
        None
    }
}

/// True once the ball is past the top or bottom bound
pub fn is_out_of_play(pos: Vec2, vertical_bounds_y: f32) -> bool {
    pos.y.abs() > vertical_bounds_y
}

/// Edge-triggered bounds watcher.
///
/// Fires once per excursion: after an event it stays quiet until the ball is
/// observed back inside the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMonitor {
    pub goal_bounds_x: f32,
    pub vertical_bounds_y: f32,
    armed: bool,
}

impl ScoreMonitor {
    pub fn new(goal_bounds_x: f32, vertical_bounds_y: f32) -> Self {
        Self {
            goal_bounds_x,
            vertical_bounds_y,
            armed: true,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Goals take priority over out-of-play when both apply
    pub fn observe(&mut self, pos: Vec2) -> Option<BoundsEvent> {
        let event = match check_bounds(pos, self.goal_bounds_x) {
            Some(goal) => Some(BoundsEvent::Goal(goal)),
            None if is_out_of_play(pos, self.vertical_bounds_y) => Some(BoundsEvent::OutOfPlay),
            None => None,
        };

        match event {
            None => {
                self.armed = true;
                None
            }
            Some(_) if !self.armed => None,
            Some(event) => {
                self.armed = false;
                Some(event)
            }
        }
    }

    /// Re-arm after the ball has been relocated by a serve
    pub fn rearm(&mut self) {
        self.armed = true;
    }
}
