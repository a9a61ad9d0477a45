//! Crate error type

use thiserror::Error;

/// Errors surfaced by the simulation core.
///
/// Nothing here is fatal to a running match: geometry failures are absorbed by
/// the predictor, and configuration errors are raised before a match exists.
#[derive(Debug, Error)]
pub enum SimError {
    /// Intersection requested between parallel (or zero-length) lines
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}
