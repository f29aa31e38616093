//! Target-size computation and QP selection for a newly started GOP.

use crate::constants::{DAMPING_FACTOR, DELTA_LEVELS, MAX_DOWNSIZE_FACTOR, MAX_QP_VALUE};
use crate::deviation::{self, DeviationBracket};
use crate::fixed_point::apply_deviation;
use crate::gop::GopInfo;
use crate::predictor::{self, FrameComplexity};

/// Inputs needed to size a new GOP, independent of any particular QP guess.
pub struct GopSizingContext {
    /// Bits budgeted per second.
    pub target_bit_rate: u64,
    /// Frame rate, as whole frames per second (already normalized from the
    /// caller's fixed-point value — see `Model::new`).
    pub frame_rate: u64,
    /// Number of pictures in the GOP being sized, including its head.
    pub gop_length: usize,
    /// Running total of bits over (positive) or under (negative) budget
    /// across every GOP completed so far.
    pub cumulative_deviation_bits: i64,
}

/// The undamped, resolution-independent byte budget for a GOP of
/// `gop_length` pictures at `target_bit_rate`/`frame_rate`.
fn base_gop_size_in_bits(ctx: &GopSizingContext) -> u64 {
    let frame_rate = ctx.frame_rate.max(1);
    (ctx.target_bit_rate / frame_rate) * ctx.gop_length as u64
}

/// Apply the damped correction for past over/undershoot, falling back to a
/// downsize factor rather than letting the target go negative.
pub fn desired_gop_size(ctx: &GopSizingContext) -> u64 {
    let base = base_gop_size_in_bits(ctx);
    let correction = ctx.cumulative_deviation_bits / DAMPING_FACTOR as i64;
    let corrected = base as i64 - correction;
    if corrected > 0 {
        corrected as u64
    } else {
        base / MAX_DOWNSIZE_FACTOR
    }
}

/// The QP an inter picture at `temporal_layer` should use given its GOP's
/// intra QP, per the fixed per-layer offset table. Shared between selection
/// (where every candidate intra QP needs its inter offsets applied too) and
/// `Model::get_quantizer` (where the same offset is applied to the GOP's
/// already-chosen QP).
pub fn inter_qp_for_layer(intra_qp: u32, temporal_layer: usize) -> u32 {
    let layer = temporal_layer.min(DELTA_LEVELS.len() - 1);
    (intra_qp as i32 + DELTA_LEVELS[layer]).clamp(0, MAX_QP_VALUE as i32) as u32
}

/// Choose the lowest intra QP whose deviation-corrected predicted total GOP
/// size doesn't exceed `desired_size`, scanning upward from `min_qp`. Falls
/// back to [`MAX_QP_VALUE`] if even the smallest, highest-QP prediction
/// overshoots (a pathologically low bitrate target).
///
/// `intra_deviation`/`inter_deviation` are the deviation snapshots taken at
/// the moment of selection (spec's `I'(qp) = I(qp)/d_intra`,
/// `T'(qp) = T(qp)/d_inter`) — not re-read per candidate QP, since the
/// snapshot is fixed for the whole scan.
pub fn select_qp(
    desired_size: u64,
    min_qp: u32,
    complexity: u64,
    inter_frames: &[FrameComplexity],
    pixels: u64,
    intra_deviation: u64,
    inter_deviation: u64,
) -> (u32, u64, u64) {
    let mut chosen = MAX_QP_VALUE;
    let mut chosen_intra = 0u64;
    let mut chosen_inter = 0u64;

    for qp in min_qp..=MAX_QP_VALUE {
        let intra_raw = predictor::predict_intra_bits(complexity, qp, pixels);
        let intra = apply_deviation(intra_raw, intra_deviation);

        let inter_raw =
            predictor::predict_gop_inter_size(inter_frames, |layer| inter_qp_for_layer(qp, layer), pixels);
        let inter = apply_deviation(inter_raw, inter_deviation);

        let total = intra + inter;
        chosen = qp;
        chosen_intra = intra;
        chosen_inter = inter;
        if total <= desired_size {
            break;
        }
    }

    (chosen, chosen_intra, chosen_inter)
}

/// Finish registering a new GOP: snapshot the current deviation for its
/// complexity bracket, compute its target size and QP against that
/// snapshot, and fold the previous GOP's final length back in now that it's
/// known (a GOP's true length isn't known until the *next* GOP's head
/// arrives).
pub fn record_new_gop(
    gop: &mut GopInfo,
    previous: Option<&mut GopInfo>,
    previous_length: Option<usize>,
    ctx: &GopSizingContext,
    complexity: u64,
    inter_frames: &[FrameComplexity],
    pixels: u64,
    intra_brackets: &[DeviationBracket],
    inter_brackets: &[DeviationBracket],
) {
    if let (Some(previous), Some(length)) = (previous, previous_length) {
        previous.length = length;
    }

    let intra_deviation = deviation::peek_deviation(intra_brackets, complexity);
    let inter_deviation = deviation::peek_deviation(inter_brackets, complexity);

    gop.complexity = complexity;
    gop.complexity_known = true;
    gop.desired_size = desired_gop_size(ctx);
    let (qp, intra_size, inter_size) = select_qp(
        gop.desired_size,
        0,
        complexity,
        inter_frames,
        pixels,
        intra_deviation,
        inter_deviation,
    );
    gop.qp = qp;
    gop.expected_intra_size = intra_size;
    gop.expected_inter_size = inter_size;
    gop.intra_deviation = intra_deviation;
    gop.inter_deviation = inter_deviation;
}
