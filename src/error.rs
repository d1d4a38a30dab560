//! Error types for the header element and the measurement oracle

use crate::dom::NodeId;
use thiserror::Error;

/// Failure reported by a [`Measure`](crate::measure::Measure) implementation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// Font could not be resolved (e.g. no computed style for a hidden frame)
    #[error("no font available for `{family}`")]
    FontUnavailable { family: String },

    /// The width budget is not a usable number
    #[error("invalid width budget: {0}")]
    InvalidBudget(f32),

    /// Font size bounds are inverted or non-positive
    #[error("invalid font size range {min}..={max}")]
    InvalidRange { min: f32, max: f32 },
}

/// Errors from the light-DOM surface of a [`Header`](crate::header::Header)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("node {0} is not a child of this header")]
    UnknownNode(NodeId),

    #[error("node {0} is not a title")]
    NotATitle(NodeId),
}
