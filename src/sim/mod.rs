//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep supplied by the host
//! - Seeded RNG only
//! - Paddles stored in a fixed `[left, right]` order
//! - No rendering, input or collision-search dependencies

pub mod bounds;
pub mod geometry;
pub mod paddle;
pub mod predict;
pub mod reflect;
pub mod serve;
pub mod shapes;
pub mod state;
pub mod tick;

pub use bounds::{BoundsEvent, ScoreEvent, ScoreMonitor, check_bounds, is_out_of_play};
pub use geometry::{
    AngleConvention, angle_to_vector, line_intersect_at_x, line_intersection, normalize_degrees,
    rotate_point, vector_to_angle,
};
pub use paddle::Paddle;
pub use predict::{PredictionFrame, predict, predict_path};
pub use reflect::{ContactEvent, StrikerKind, reflect};
pub use serve::{ServeMachine, ServePhase, random_serve_degrees};
pub use shapes::{BoxShape, CircleShape, EdgeShape};
pub use state::{Ball, GameEvent, MatchState, Score, Side};
pub use tick::Simulation;
