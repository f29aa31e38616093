//! Post-encode feedback: once a GOP finishes, compare its actual size
//! against what the model predicted and fold the error back into the
//! deviation brackets so future predictions improve.

use crate::deviation::{find_bracket, DeviationBracket};
use crate::gop::GopInfo;

/// The result of folding one completed GOP's actual sizes back into the
/// model: how far over (positive) or under (negative) budget the GOP came
/// in, in bits, for the caller to accumulate into its running total.
pub struct FeedbackResult {
    pub budget_delta: i64,
}

/// Update `gop`'s own deviation fields and the shared deviation brackets
/// from its actual encoded sizes, then report how far over/under budget it
/// finished.
pub fn update_model(
    gop: &mut GopInfo,
    intra_brackets: &mut [DeviationBracket],
    inter_brackets: &mut [DeviationBracket],
    actual_intra_bits: u64,
    actual_inter_bits: u64,
) -> FeedbackResult {
    gop.intra_size = actual_intra_bits;
    gop.actual_size = actual_intra_bits + actual_inter_bits;

    let intra_variation = variation_ratio(gop.expected_intra_size, gop.intra_deviation, actual_intra_bits);
    let inter_variation = variation_ratio(gop.expected_inter_size, gop.inter_deviation, actual_inter_bits);

    gop.intra_deviation = intra_variation;
    gop.inter_deviation = inter_variation;

    if actual_intra_bits > 0 {
        find_bracket(intra_brackets, gop.complexity).update(intra_variation);
    }
    if actual_inter_bits > 0 {
        find_bracket(inter_brackets, gop.complexity).update(inter_variation);
    }

    gop.encoded = true;

    FeedbackResult {
        budget_delta: gop.actual_size as i64 - gop.desired_size as i64,
    }
}

/// Re-estimate the deviation for a bracket once a picture's actual size is
/// known: `expected_size * snapshot_deviation / actual_size`. `expected_size`
/// was itself computed as `raw_prediction / snapshot_deviation` at selection
/// time (see `selector::select_qp`), so this reduces to `raw_prediction /
/// actual_size` once simplified: the brackets converge toward whatever
/// deviation makes the corrected prediction match what actually gets spent.
/// If nothing was actually spent there's nothing to learn from, so the prior
/// snapshot carries forward unchanged.
fn variation_ratio(expected: u64, snapshot_deviation: u64, actual: u64) -> u64 {
    if actual == 0 {
        snapshot_deviation
    } else {
        ((expected as u128 * snapshot_deviation as u128) / actual as u128) as u64
    }
}
