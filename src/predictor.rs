//! Size prediction: turns a (complexity, QP, resolution) triple into a
//! predicted bit count by interpolating the static complexity tables.

use crate::constants::{
    PITCH_ON_MAX_COMPLEXITY_FOR_INTER_FRAMES, PITCH_ON_MAX_COMPLEXITY_FOR_INTRA_FRAMES,
};
use crate::fixed_point::scale_to_actual;
use crate::tables::{self, ComplexitySegment};

/// Linearly interpolate a segment's `[min_bits, max_bits]` cell across its
/// `[scope_start, scope_end]` complexity range.
fn interpolate(segment: &ComplexitySegment, complexity: u64, qp: usize) -> u64 {
    let cell = segment.cells[qp];
    let span = segment.scope_end - segment.scope_start;
    if span == 0 {
        return cell.min_bits;
    }
    let offset = complexity.saturating_sub(segment.scope_start).min(span);
    cell.min_bits + (cell.max_bits - cell.min_bits) * offset / span
}

/// Predict an intra frame's size, in bits, at the model's reference
/// resolution then scale it to `pixels`.
pub fn predict_intra_bits(complexity: u64, qp: u32, pixels: u64) -> u64 {
    let m = tables::lookup_intra(complexity);
    let qp = qp as usize;
    let raw = if m.extrapolated {
        let cell = m.segment.cells[qp];
        let excess = complexity.saturating_sub(m.segment.scope_end);
        cell.max_bits + excess * PITCH_ON_MAX_COMPLEXITY_FOR_INTRA_FRAMES
    } else {
        interpolate(m.segment, complexity, qp)
    };
    scale_to_actual(raw, pixels)
}

/// Predict an inter frame's size, in bits, at `temporal_layer`, scaled to
/// `pixels`.
pub fn predict_inter_bits(temporal_layer: usize, complexity: u64, qp: u32, pixels: u64) -> u64 {
    let m = tables::lookup_inter(temporal_layer, complexity);
    let qp = qp as usize;
    let raw = if m.extrapolated {
        let cell = m.segment.cells[qp];
        let excess = complexity.saturating_sub(m.segment.scope_end);
        cell.max_bits + excess * PITCH_ON_MAX_COMPLEXITY_FOR_INTER_FRAMES
    } else {
        interpolate(m.segment, complexity, qp)
    };
    scale_to_actual(raw, pixels)
}

/// A single picture's known or assumed complexity within a GOP being sized.
pub struct FrameComplexity {
    pub temporal_layer: usize,
    /// `Some` when the picture is inside the lookahead window and its real
    /// complexity has already been measured; `None` for pictures beyond the
    /// window, whose size is instead predicted from the running average of
    /// the complexities that *are* known.
    pub known: Option<u64>,
}

/// Predict the total size, in bits, of every inter picture in a GOP.
///
/// Pictures inside the lookahead window use their own measured complexity;
/// pictures beyond it fall back to the mean complexity of the pictures that
/// are known, which is the best estimate available for frames the look-ahead
/// hasn't analyzed yet.
pub fn predict_gop_inter_size(
    frames: &[FrameComplexity],
    qp_for_layer: impl Fn(usize) -> u32,
    pixels: u64,
) -> u64 {
    let known_mean = {
        let (sum, count) = frames.iter().filter_map(|f| f.known).fold(
            (0u64, 0u64),
            |(sum, count), c| (sum + c, count + 1),
        );
        if count == 0 {
            0
        } else {
            sum / count
        }
    };

    frames
        .iter()
        .map(|f| {
            let complexity = f.known.unwrap_or(known_mean);
            predict_inter_bits(f.temporal_layer, complexity, qp_for_layer(f.temporal_layer), pixels)
        })
        .sum()
}

/// Estimate a single representative complexity value for an entire GOP from
/// whatever per-frame complexities the lookahead window has already
/// measured. Returns `0` if none are known yet (the caller then has to fall
/// back to a neutral assumption).
pub fn estimate_gop_complexity(known_complexities: &[u64]) -> u64 {
    if known_complexities.is_empty() {
        return 0;
    }
    known_complexities.iter().sum::<u64>() / known_complexities.len() as u64
}
