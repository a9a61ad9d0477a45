//! Pong Sim - ball, serve and lookahead core for a two-player paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (reflection, serve sequencing, scoring, prediction)
//! - `config`: Data-driven match tuning
//! - `error`: Crate error type
//!
//! Rendering, input polling and collision detection belong to the host. The
//! host reports contacts through [`sim::Simulation::on_collision`] and drives
//! the match with [`sim::Simulation::tick`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::{CurvePoint, ReflectCurve, ServePolicy, ServeProtocol, SimConfig};
pub use error::SimError;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep used by the demo host (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Determinant magnitude below which two lines are treated as parallel
    pub const PARALLEL_EPSILON: f32 = 1e-6;
    /// How far a direction is extended to build the second point of a ray
    pub const RAY_EXTENSION: f32 = 20.0;
    /// Serve timers at or below this are considered elapsed (absorbs float drift)
    pub const TIMER_EPSILON: f32 = 1e-4;

    /// Ball defaults
    pub const BALL_START_SPEED: f32 = 8.0;
    /// Fractional speed gain per paddle bounce
    pub const BALL_SPEED_INCREASE: f32 = 0.05;
    pub const BALL_START_DELAY: f32 = 1.5;

    /// Serve defaults
    pub const SERVE_ATTACH_SECONDS: f32 = 1.5;
    pub const SERVE_FOLLOW_SMOOTHING: f32 = 7.0;
    pub const SERVE_OFFSET: f32 = 1.0;

    /// Field defaults
    pub const GOAL_BOUNDS_X: f32 = 10.0;
    pub const VERTICAL_BOUNDS_Y: f32 = 9.0;

    /// Paddle defaults
    pub const PADDLE_X: f32 = 8.0;
    pub const PADDLE_HALF_HEIGHT: f32 = 1.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    pub const PADDLE_TRAVEL_LIMIT: f32 = 4.0;

    /// Computer paddle defaults
    pub const AI_ERROR_MARGIN: f32 = 0.25;
    pub const AI_MAX_BOUNCES: u32 = 4;
}
