use super::*;
use crate::constants::MODEL_DEFAULT_PIXEL_AREA;

#[test]
fn predict_intra_bits_is_higher_at_lower_qp() {
    let pixels = MODEL_DEFAULT_PIXEL_AREA;
    let low_qp = predict_intra_bits(100, 10, pixels);
    let high_qp = predict_intra_bits(100, 50, pixels);
    assert!(low_qp > high_qp);
}

#[test]
fn predict_intra_bits_grows_with_complexity_within_a_segment() {
    let pixels = MODEL_DEFAULT_PIXEL_AREA;
    let low = predict_intra_bits(0, 30, pixels);
    let high = predict_intra_bits(500, 30, pixels);
    assert!(high >= low);
}

#[test]
fn predict_intra_bits_past_table_coverage_still_returns_a_value() {
    let pixels = MODEL_DEFAULT_PIXEL_AREA;
    let bits = predict_intra_bits(999_999, 20, pixels);
    assert!(bits > 0);
}

#[test]
fn predict_inter_bits_scales_with_resolution() {
    let full = predict_inter_bits(0, 1000, 30, MODEL_DEFAULT_PIXEL_AREA);
    let quarter = predict_inter_bits(0, 1000, 30, MODEL_DEFAULT_PIXEL_AREA / 4);
    assert!(quarter < full);
}

#[test]
fn predict_gop_inter_size_uses_known_mean_for_unknown_frames() {
    let frames = vec![
        FrameComplexity { temporal_layer: 0, known: Some(1000) },
        FrameComplexity { temporal_layer: 0, known: Some(3000) },
        FrameComplexity { temporal_layer: 0, known: None },
    ];
    let total = predict_gop_inter_size(&frames, |_| 30, MODEL_DEFAULT_PIXEL_AREA);
    let with_mean_only = predict_inter_bits(0, 2000, 30, MODEL_DEFAULT_PIXEL_AREA);
    // The unknown frame should contribute roughly the mean-complexity size.
    assert!(total > with_mean_only);
}

#[test]
fn predict_gop_inter_size_of_empty_gop_is_zero() {
    assert_eq!(predict_gop_inter_size(&[], |_| 30, MODEL_DEFAULT_PIXEL_AREA), 0);
}

#[test]
fn estimate_gop_complexity_averages_known_values() {
    assert_eq!(estimate_gop_complexity(&[100, 200, 300]), 200);
}

#[test]
fn estimate_gop_complexity_of_empty_slice_is_zero() {
    assert_eq!(estimate_gop_complexity(&[]), 0);
}
