use super::*;

#[test]
fn intra_lookup_matches_first_segment_at_lower_boundary() {
    let m = lookup_intra(0);
    assert_eq!(m.segment.scope_start, 0);
    assert!(!m.extrapolated);
}

#[test]
fn intra_lookup_matches_segment_at_upper_boundary() {
    let m = lookup_intra(500);
    assert_eq!(m.segment.scope_start, 0);
    assert_eq!(m.segment.scope_end, 500);
    assert!(!m.extrapolated);

    let m = lookup_intra(501);
    assert_eq!(m.segment.scope_start, 501);
    assert!(!m.extrapolated);
}

#[test]
fn intra_lookup_extrapolates_past_last_segment() {
    let m = lookup_intra(999_999);
    assert!(m.extrapolated);
    assert_eq!(m.segment.scope_end, 1600);
}

#[test]
fn inter_lookup_clamps_temporal_layer_to_table_coverage() {
    let in_range = lookup_inter(INTER_TABLE_LAYERS - 1, 100);
    let beyond = lookup_inter(INTER_TABLE_LAYERS + 3, 100);
    assert_eq!(in_range.segment.scope_start, beyond.segment.scope_start);
    assert_eq!(in_range.segment.scope_end, beyond.segment.scope_end);
}

#[test]
fn inter_lookup_extrapolates_past_17500() {
    let m = lookup_inter(0, 999_999);
    assert!(m.extrapolated);
}

#[test]
fn every_segment_has_64_cells() {
    for segment in &INTRA_SEGMENTS {
        assert_eq!(segment.cells.len(), (MAX_QP_VALUE as usize) + 1);
    }
    for layer in &INTER_SEGMENTS {
        for segment in layer {
            assert_eq!(segment.cells.len(), (MAX_QP_VALUE as usize) + 1);
        }
    }
}

#[test]
fn initial_intra_deviation_brackets_cover_up_to_max_complexity() {
    let brackets = initial_intra_deviation_brackets();
    assert_eq!(brackets.len(), 10);
    assert_eq!(brackets.first().unwrap().scope_start, 0);
    assert_eq!(brackets.last().unwrap().scope_end, MAX_COMPLEXITY as u64);
    for pair in brackets.windows(2) {
        assert_eq!(pair[0].scope_end + 1, pair[1].scope_start);
    }
}

#[test]
fn initial_inter_deviation_brackets_cover_up_to_max_complexity() {
    let brackets = initial_inter_deviation_brackets();
    assert_eq!(brackets.len(), 8);
    assert_eq!(brackets.first().unwrap().scope_start, 0);
    assert_eq!(brackets.last().unwrap().scope_end, MAX_COMPLEXITY as u64);
    for pair in brackets.windows(2) {
        assert_eq!(pair[0].scope_end + 1, pair[1].scope_start);
    }
}

#[test]
fn all_initial_deviation_brackets_start_neutral() {
    for b in initial_intra_deviation_brackets()
        .iter()
        .chain(initial_inter_deviation_brackets().iter())
    {
        assert_eq!(b.deviation, NEUTRAL_DEVIATION);
        assert_eq!(b.reported, 0);
    }
}
