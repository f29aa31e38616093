//! Mid-GOP QP nudging: once enough of a GOP has been reported back to tell
//! whether the sequence is trending over or under its overall budget,
//! perturb the QP used for the GOP's remaining inter pictures rather than
//! waiting for the next GOP. Recomputed fresh on every quantizer query —
//! nothing here is accumulated across calls.

use crate::constants::{
    AMOUNT_OF_REPORTED_FRAMES_TO_TRIGGER_ON_THE_FLY_QP, MAX_DELTA_QP_WHITIN_GOP,
    MAX_INTER_LEVEL_FOR_ON_THE_FLY_QP, MAX_QP_VALUE, ON_THE_FLY_QP_STEP,
};

/// Compute the mid-GOP QP delta for a picture at `temporal_layer`, given
/// `reported_frames` already reported back for its GOP and whether the
/// sequence is currently trending over its cumulative byte budget. Returns
/// zero for GOPs that haven't reported enough frames yet, or for temporal
/// layers the on-the-fly adjustment doesn't reach.
pub fn compute_delta(reported_frames: usize, temporal_layer: u8, over_budget: bool) -> i32 {
    if (reported_frames as u32) < AMOUNT_OF_REPORTED_FRAMES_TO_TRIGGER_ON_THE_FLY_QP {
        return 0;
    }
    if temporal_layer >= MAX_INTER_LEVEL_FOR_ON_THE_FLY_QP {
        return 0;
    }

    let step = if over_budget {
        ON_THE_FLY_QP_STEP
    } else {
        -ON_THE_FLY_QP_STEP
    };

    step.clamp(-MAX_DELTA_QP_WHITIN_GOP, MAX_DELTA_QP_WHITIN_GOP)
}

/// Apply a mid-GOP delta to a base QP, clamped to the valid QP range.
pub fn apply_delta(base_qp: u32, delta: i32) -> u32 {
    (base_qp as i32 + delta).clamp(0, MAX_QP_VALUE as i32) as u32
}
