//! Adaptive rate-control model for a picture-hierarchy-aware video encoder.
//!
//! The model predicts how many bits a picture will need from a measured
//! complexity value and the static tables in [`tables`], chooses a QP for
//! each GOP that should hit its share of the bit budget, and folds the
//! actual encoded sizes back in as feedback so later GOPs correct for past
//! over- or under-shoot. See [`Model`] for the three-call lifecycle an
//! encoder drives it with.

mod adjuster;
mod constants;
mod deviation;
mod error;
mod feedback;
mod fixed_point;
mod gop;
mod model;
mod predictor;
mod selector;
mod tables;

pub use deviation::DeviationBracket;
pub use error::{RateControlError, Result};
pub use fixed_point::NEUTRAL_DEVIATION;
pub use gop::GopInfo;
pub use model::{FrameType, Model, SequenceParams};
