//! Match state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::ScoreEvent;
use super::serve::ServeMachine;
use crate::config::ServeProtocol;

/// One end of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// The ball: a point mass whose velocity only changes on contact or serve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fractional speed gain applied on every paddle bounce
    pub speed_increase: f32,
    /// Speed of a fresh serve
    pub start_speed: f32,
}

impl Ball {
    pub fn new(start_speed: f32, speed_increase: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed_increase,
            start_speed,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Pin the ball in place with no velocity
    pub fn hold_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    /// Explicit Euler step (`pos += vel * dt`)
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Running point tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Match-wide state shared by every serve-capable entity.
///
/// There is exactly one of these per match; the serving side lives in its
/// serve machine and is never tracked per ball.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchState {
    pub score: Score,
    pub serve: ServeMachine,
    /// Completed points
    pub points_played: u32,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side currently serving (or being served toward), if a serve has begun
    pub fn serving(&self) -> Option<Side> {
        match self.serve.phase() {
            super::serve::ServePhase::Idle => None,
            _ => Some(self.serve.side()),
        }
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit { side: Side, speed: f32 },
    WallHit,
    /// Ball crossed a goal; `event.side` is the goal it went through
    Scored(ScoreEvent),
    /// Ball left over the top or bottom; no point awarded
    OutOfPlay,
    ServeStarted { side: Side, protocol: ServeProtocol },
    Launched { velocity: Vec2 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite_and_sign() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.sign(), -1.0);
        assert_eq!(Side::Right.sign(), 1.0);
    }

    #[test]
    fn test_score_award() {
        let mut score = Score::new();
        score.award(Side::Left);
        score.award(Side::Left);
        score.award(Side::Right);
        assert_eq!(score.get(Side::Left), 2);
        assert_eq!(score.get(Side::Right), 1);
    }

    #[test]
    fn test_ball_integrate() {
        let mut ball = Ball::new(8.0, 0.05);
        ball.vel = Vec2::new(2.0, -1.0);
        ball.integrate(0.5);
        assert_eq!(ball.pos, Vec2::new(1.0, -0.5));

        ball.hold_at(Vec2::new(3.0, 3.0));
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.pos, Vec2::new(3.0, 3.0));
    }
}
