//! Error types for rate-control model construction.

use thiserror::Error;

/// Errors that can occur while constructing a [`Model`](crate::Model).
///
/// Once constructed, the model's runtime operations
/// (`report_complexity`, `get_quantizer`, `update_model`) are infallible —
/// see the crate-level docs for why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateControlError {
    #[error("frames_to_be_encoded must be greater than zero")]
    EmptySequence,

    #[error("luma_width × luma_height must be greater than zero (got {width}×{height})")]
    EmptyFrame { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, RateControlError>;
