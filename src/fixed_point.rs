//! Fixed-point helpers shared by the predictor and deviation bookkeeping.
//!
//! All deviation and resolution-scaling math uses `RC_DEVIATION_PRECISION`
//! fractional bits and 64-bit integer arithmetic throughout (table cell
//! values can exceed 10^7, so even intermediate products need the headroom).
//! Division truncates, matching the reference implementation.

use crate::constants::{MODEL_DEFAULT_PIXEL_AREA, RC_DEVIATION_PRECISION};

/// A deviation value, `1 << RC_DEVIATION_PRECISION` meaning "predicted
/// exactly right".
pub const NEUTRAL_DEVIATION: u64 = 1 << RC_DEVIATION_PRECISION;

/// Divide `bits` (a predicted size) by a fixed-point deviation factor,
/// yielding a fixed-point-scaled result: `(bits << PRECISION) / deviation`.
pub fn apply_deviation(bits: u64, deviation: u64) -> u64 {
    (bits << RC_DEVIATION_PRECISION) / deviation.max(1)
}

/// Scale a size predicted at the reference resolution (1920×1080) down to
/// `pixels` (spec.md §4.8, backward scale).
pub fn scale_to_actual(size_at_reference: u64, pixels: u64) -> u64 {
    let pixels = pixels.max(1);
    ((size_at_reference << RC_DEVIATION_PRECISION) / MODEL_DEFAULT_PIXEL_AREA * pixels)
        >> RC_DEVIATION_PRECISION
}

/// Scale a size measured at `pixels` up to the reference resolution
/// (spec.md §4.8, forward scale).
pub fn scale_to_reference(size_at_actual: u64, pixels: u64) -> u64 {
    let pixels = pixels.max(1);
    ((size_at_actual << RC_DEVIATION_PRECISION) / pixels * MODEL_DEFAULT_PIXEL_AREA)
        >> RC_DEVIATION_PRECISION
}
