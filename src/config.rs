//! Match tuning and validation
//!
//! Configuration is plain data: built in code or loaded from JSON, then
//! validated once when a [`crate::sim::Simulation`] is constructed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// How the ball is put back into play after a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ServeProtocol {
    /// Ball waits at center, then launches at a random diagonal
    Center,
    /// Ball rides in front of the serving paddle, then launches straight across
    #[default]
    PaddleAttached,
}

impl ServeProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServeProtocol::Center => "Center",
            ServeProtocol::PaddleAttached => "PaddleAttached",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "center" => Some(ServeProtocol::Center),
            "paddle" | "attached" | "paddleattached" => Some(ServeProtocol::PaddleAttached),
            _ => None,
        }
    }
}

/// Which side serves after a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ServePolicy {
    /// The side whose goal was crossed serves (or is served toward)
    #[default]
    ConcedingSideServes,
    /// A fresh random side every point
    Random,
}

impl ServePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServePolicy::ConcedingSideServes => "ConcedingSideServes",
            ServePolicy::Random => "Random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conceding" | "concedingsideserves" => Some(ServePolicy::ConcedingSideServes),
            "random" => Some(ServePolicy::Random),
            _ => None,
        }
    }
}

/// One sample of the reflect curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Normalized distance from paddle center (0 = center, 1 = edge)
    pub offset: f32,
    /// Curve strength multiplier at that offset
    pub strength: f32,
}

impl CurvePoint {
    pub fn new(offset: f32, strength: f32) -> Self {
        Self { offset, strength }
    }
}

/// Offset-to-strength mapping used to add spin on off-center paddle hits.
///
/// Piecewise linear between samples, held flat beyond the first and last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectCurve {
    points: Vec<CurvePoint>,
}

impl ReflectCurve {
    /// Build a curve from sample points (sorted by offset here)
    pub fn new(mut points: Vec<CurvePoint>) -> Result<Self, SimError> {
        points.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        let curve = Self { points };
        curve.validate()?;
        Ok(curve)
    }

    /// Same strength at every offset
    pub fn constant(strength: f32) -> Self {
        Self {
            points: vec![CurvePoint::new(0.0, strength)],
        }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Check the sample points describe a usable monotonic mapping
    pub fn validate(&self) -> Result<(), SimError> {
        if self.points.is_empty() {
            return Err(SimError::invalid("reflect curve has no points"));
        }
        for p in &self.points {
            if !p.offset.is_finite() || !p.strength.is_finite() {
                return Err(SimError::invalid("reflect curve point is not finite"));
            }
            if !(0.0..=1.0).contains(&p.offset) {
                return Err(SimError::invalid(format!(
                    "reflect curve offset {} outside [0, 1]",
                    p.offset
                )));
            }
        }

        let mut rising = false;
        let mut falling = false;
        for pair in self.points.windows(2) {
            if pair[1].offset <= pair[0].offset {
                return Err(SimError::invalid("reflect curve offsets must be strictly increasing"));
            }
            rising |= pair[1].strength > pair[0].strength;
            falling |= pair[1].strength < pair[0].strength;
        }
        if rising && falling {
            return Err(SimError::invalid("reflect curve must be monotonic"));
        }
        Ok(())
    }

    /// Strength at a normalized offset
    pub fn evaluate(&self, offset: f32) -> f32 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if offset <= first.offset {
            return first.strength;
        }
        if offset >= last.offset {
            return last.strength;
        }

        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if offset <= b.offset {
                let t = (offset - a.offset) / (b.offset - a.offset);
                return a.strength + (b.strength - a.strength) * t;
            }
        }
        last.strength
    }
}

/// Strength at full offset stays below 1: a head-on ball returns only while
/// `|offset * strength| < 1`.
impl Default for ReflectCurve {
    fn default() -> Self {
        Self {
            points: vec![
                CurvePoint::new(0.0, 0.2),
                CurvePoint::new(0.5, 0.5),
                CurvePoint::new(1.0, 0.8),
            ],
        }
    }
}

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Ball ===
    /// Speed of every fresh serve (units per second)
    pub start_speed: f32,
    /// Each paddle bounce multiplies speed by `1 + speed_increase_per_bounce`
    pub speed_increase_per_bounce: f32,
    /// Spin added by off-center paddle hits
    pub reflect_curve: ReflectCurve,

    // === Serve ===
    pub serve_protocol: ServeProtocol,
    pub serve_policy: ServePolicy,
    /// Countdown before a center serve launches
    pub ball_start_delay_seconds: f32,
    /// How long the ball rides the serving paddle
    pub serve_attach_seconds: f32,
    /// Follow rate of the attached ball toward the paddle's height
    pub serve_follow_smoothing: f32,
    /// Gap between the serving paddle and the attached ball
    pub serve_offset_distance: f32,

    // === Field ===
    /// Ball past `±goal_bounds_x` is a goal
    pub goal_bounds_x: f32,
    /// Ball past `±vertical_bounds_y` is out of play
    pub vertical_bounds_y: f32,

    // === Paddles ===
    /// Paddles sit at `x = ±paddle_x`
    pub paddle_x: f32,
    /// Distance from paddle center that maps to a full-strength offset
    pub paddle_half_height: f32,
    pub paddle_speed: f32,
    /// Paddle centers stay within `±paddle_travel_limit`
    pub paddle_travel_limit: f32,

    // === Computer paddles ===
    /// Dead zone around the predicted target
    pub ai_error_margin: f32,
    /// Bounce lookahead for computer paddles
    pub ai_max_bounces: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_speed: BALL_START_SPEED,
            speed_increase_per_bounce: BALL_SPEED_INCREASE,
            reflect_curve: ReflectCurve::default(),

            serve_protocol: ServeProtocol::default(),
            serve_policy: ServePolicy::default(),
            ball_start_delay_seconds: BALL_START_DELAY,
            serve_attach_seconds: SERVE_ATTACH_SECONDS,
            serve_follow_smoothing: SERVE_FOLLOW_SMOOTHING,
            serve_offset_distance: SERVE_OFFSET,

            goal_bounds_x: GOAL_BOUNDS_X,
            vertical_bounds_y: VERTICAL_BOUNDS_Y,

            paddle_x: PADDLE_X,
            paddle_half_height: PADDLE_HALF_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_travel_limit: PADDLE_TRAVEL_LIMIT,

            ai_error_margin: AI_ERROR_MARGIN,
            ai_max_bounces: AI_MAX_BOUNCES,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: protocol={}, policy={}",
            config.serve_protocol.as_str(),
            config.serve_policy.as_str()
        );
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        log::info!("Reading config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        positive("start_speed", self.start_speed)?;
        positive("speed_increase_per_bounce", self.speed_increase_per_bounce)?;
        non_negative("ball_start_delay_seconds", self.ball_start_delay_seconds)?;
        non_negative("serve_attach_seconds", self.serve_attach_seconds)?;
        non_negative("serve_follow_smoothing", self.serve_follow_smoothing)?;
        non_negative("serve_offset_distance", self.serve_offset_distance)?;
        positive("goal_bounds_x", self.goal_bounds_x)?;
        positive("vertical_bounds_y", self.vertical_bounds_y)?;
        positive("paddle_x", self.paddle_x)?;
        positive("paddle_half_height", self.paddle_half_height)?;
        non_negative("paddle_speed", self.paddle_speed)?;
        non_negative("paddle_travel_limit", self.paddle_travel_limit)?;
        non_negative("ai_error_margin", self.ai_error_margin)?;

        if self.paddle_x >= self.goal_bounds_x {
            return Err(SimError::invalid(format!(
                "paddle_x ({}) must be inside goal_bounds_x ({})",
                self.paddle_x, self.goal_bounds_x
            )));
        }
        if self.ai_max_bounces == 0 {
            return Err(SimError::invalid("ai_max_bounces must be at least 1"));
        }
        self.reflect_curve.validate()
    }
}

fn positive(name: &str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must not be negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_start_speed_rejected() {
        let config = SimConfig {
            start_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));

        let config = SimConfig {
            start_speed: -3.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_paddle_outside_goal_rejected() {
        let config = SimConfig {
            paddle_x: 12.0,
            goal_bounds_x: 10.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_curve_rejected() {
        assert!(matches!(
            ReflectCurve::new(Vec::new()),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_non_monotonic_curve_rejected() {
        let points = vec![
            CurvePoint::new(0.0, 1.0),
            CurvePoint::new(0.5, 2.0),
            CurvePoint::new(1.0, 0.5),
        ];
        assert!(ReflectCurve::new(points).is_err());
    }

    #[test]
    fn test_curve_evaluate_interpolates_and_clamps() {
        let curve = ReflectCurve::new(vec![
            CurvePoint::new(1.0, 2.0),
            CurvePoint::new(0.0, 0.0),
        ])
        .unwrap();
        assert!((curve.evaluate(0.25) - 0.5).abs() < 1e-6);
        assert!((curve.evaluate(0.5) - 1.0).abs() < 1e-6);
        assert_eq!(curve.evaluate(-1.0), 0.0);
        assert_eq!(curve.evaluate(3.0), 2.0);
    }

    #[test]
    fn test_constant_curve() {
        let curve = ReflectCurve::constant(1.0);
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(0.7), 1.0);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SimConfig::from_json(r#"{ "start_speed": 12.0, "serve_protocol": "Center" }"#)
            .unwrap();
        assert_eq!(config.start_speed, 12.0);
        assert_eq!(config.serve_protocol, ServeProtocol::Center);
        assert_eq!(config.goal_bounds_x, GOAL_BOUNDS_X);
    }

    #[test]
    fn test_from_json_rejects_empty_curve() {
        let result = SimConfig::from_json(r#"{ "reflect_curve": { "points": [] } }"#);
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(SimError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = SimConfig::load("does/not/exist/pong.json");
        assert!(matches!(result, Err(SimError::Io(_))));
    }

    #[test]
    fn test_json_round_trip_keeps_protocol() {
        let config = SimConfig {
            serve_protocol: ServeProtocol::Center,
            serve_policy: ServePolicy::Random,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        let back = SimConfig::from_json(&json).unwrap();
        assert_eq!(back.serve_protocol, ServeProtocol::Center);
        assert_eq!(back.serve_policy, ServePolicy::Random);
        assert_eq!(back.reflect_curve, config.reflect_curve);
    }

    #[test]
    fn test_protocol_from_str() {
        assert_eq!(ServeProtocol::from_str("center"), Some(ServeProtocol::Center));
        assert_eq!(
            ServeProtocol::from_str("Attached"),
            Some(ServeProtocol::PaddleAttached)
        );
        assert_eq!(ServeProtocol::from_str("sideways"), None);
        assert_eq!(ServePolicy::from_str("RANDOM"), Some(ServePolicy::Random));
    }
}
