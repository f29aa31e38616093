use super::*;
use crate::fixed_point::NEUTRAL_DEVIATION;
use crate::tables::{initial_inter_deviation_brackets, initial_intra_deviation_brackets};

fn finished_gop() -> GopInfo {
    let mut gop = GopInfo::start(0, 0, 8);
    gop.complexity = 100;
    gop.desired_size = 10_000;
    gop.expected_intra_size = 4_000;
    gop.expected_inter_size = 6_000;
    gop
}

#[test]
fn variation_ratio_is_neutral_for_exact_prediction() {
    assert_eq!(variation_ratio(1000, NEUTRAL_DEVIATION, 1000), NEUTRAL_DEVIATION);
}

#[test]
fn variation_ratio_carries_snapshot_forward_when_actual_was_zero() {
    assert_eq!(variation_ratio(1000, NEUTRAL_DEVIATION * 3, 0), NEUTRAL_DEVIATION * 3);
}

#[test]
fn variation_ratio_reflects_overshoot() {
    let ratio = variation_ratio(2000, NEUTRAL_DEVIATION, 1000);
    assert_eq!(ratio, NEUTRAL_DEVIATION * 2);
}

#[test]
fn variation_ratio_folds_in_the_snapshot_not_just_the_raw_ratio() {
    // expected (1000) was already corrected by a prior 2x deviation, so the
    // raw prediction it came from was 500; actual came in at 500, exactly
    // matching the raw prediction, so the new deviation should land back at
    // neutral rather than staying at the old 2x snapshot.
    let ratio = variation_ratio(1000, NEUTRAL_DEVIATION * 2, 500);
    assert_eq!(ratio, NEUTRAL_DEVIATION);
}

#[test]
fn update_model_marks_gop_encoded_and_records_actual_size() {
    let mut gop = finished_gop();
    let mut intra = initial_intra_deviation_brackets();
    let mut inter = initial_inter_deviation_brackets();

    update_model(&mut gop, &mut intra, &mut inter, 4_000, 6_000);

    assert!(gop.encoded);
    assert_eq!(gop.actual_size, 10_000);
    assert_eq!(gop.intra_deviation, NEUTRAL_DEVIATION);
    assert_eq!(gop.inter_deviation, NEUTRAL_DEVIATION);
}

#[test]
fn update_model_reports_positive_delta_on_overshoot() {
    let mut gop = finished_gop();
    let mut intra = initial_intra_deviation_brackets();
    let mut inter = initial_inter_deviation_brackets();

    let result = update_model(&mut gop, &mut intra, &mut inter, 5_000, 7_000);
    assert_eq!(result.budget_delta, 2_000);
}

#[test]
fn update_model_reports_negative_delta_on_undershoot() {
    let mut gop = finished_gop();
    let mut intra = initial_intra_deviation_brackets();
    let mut inter = initial_inter_deviation_brackets();

    let result = update_model(&mut gop, &mut intra, &mut inter, 2_000, 3_000);
    assert_eq!(result.budget_delta, -5_000);
}

#[test]
fn update_model_feeds_the_matching_deviation_bracket() {
    let mut gop = finished_gop();
    let mut intra = initial_intra_deviation_brackets();
    let mut inter = initial_inter_deviation_brackets();

    // expected_intra_size (4_000) was snapshotted at a neutral deviation, so
    // coming in at double that (8_000) means the bracket's deviation should
    // halve: future corrected predictions need to grow to match.
    update_model(&mut gop, &mut intra, &mut inter, 8_000, 6_000);

    let bracket = find_bracket(&mut intra, gop.complexity);
    assert_eq!(bracket.reported, 1);
    assert_eq!(bracket.deviation, NEUTRAL_DEVIATION / 2);
}

#[test]
fn update_model_skips_bracket_update_when_actual_is_zero() {
    let mut gop = finished_gop();
    let mut intra = initial_intra_deviation_brackets();
    let mut inter = initial_inter_deviation_brackets();

    update_model(&mut gop, &mut intra, &mut inter, 4_000, 0);

    let bracket = find_bracket(&mut inter, gop.complexity);
    assert_eq!(bracket.reported, 0);
    assert_eq!(gop.inter_deviation, NEUTRAL_DEVIATION);
}
