//! GOP registry: one [`GopInfo`] slot per *picture*, indexed by picture
//! number. A slot whose `exists` flag is set is also a GOP head and carries
//! the full per-GOP bookkeeping; every slot, head or not, also doubles as
//! the record of that single picture's own reported complexity — this is
//! what lets a complexity report that arrives before its GOP's head (a
//! pipelined lookahead) land in the right place regardless of arrival order.

use crate::fixed_point::NEUTRAL_DEVIATION;

/// Bookkeeping for a single picture. Every picture gets a slot (`complexity`
/// below becomes that picture's own reported value while it's not yet part
/// of a sized GOP); a slot where `exists` is set is additionally a GOP head
/// and the rest of the fields describe the whole GOP it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GopInfo {
    /// Whether this slot is a registered GOP head (as opposed to just
    /// holding a not-yet-consumed per-picture complexity report).
    pub exists: bool,
    /// Whether every picture in this GOP has been encoded and its feedback
    /// folded into the deviation brackets.
    pub encoded: bool,
    /// Picture number of this GOP's head (its own index in the registry).
    pub index: usize,
    /// Number of pictures in this GOP, including the head.
    pub length: usize,
    /// For a GOP head: the complexity estimate for the GOP as a whole. For
    /// any other slot: that single picture's own reported complexity, set
    /// by `report_complexity` regardless of whether its GOP has been sized
    /// yet.
    pub complexity: u64,
    /// Whether `complexity` holds a real reported value yet (`complexity`
    /// alone can't distinguish "reported as zero" from "never reported").
    pub complexity_known: bool,
    /// Temporal layer of the picture this slot represents (0 for every
    /// intra/head picture; the picture's own reported layer otherwise).
    pub temporal_layer_index: u8,
    /// Size of the lookahead window available when this GOP's QP was chosen.
    pub frames_in_sw: usize,
    /// QP assigned to the head picture.
    pub qp: u32,
    /// Target size, in bits, for the whole GOP.
    pub desired_size: u64,
    /// Sum of bits actually spent on pictures in this GOP reported so far.
    pub actual_size: u64,
    /// Bits predicted for the head (intra) picture alone.
    pub intra_size: u64,
    /// Bits the model expected the head picture to need (used to compute
    /// the intra deviation once the real size is known).
    pub expected_intra_size: u64,
    /// Bits the model expected the remaining inter pictures to need in
    /// total (used to compute the inter deviation).
    pub expected_inter_size: u64,
    /// Fixed-point deviation observed for the head picture once reported.
    pub intra_deviation: u64,
    /// Fixed-point deviation observed for the inter pictures once reported.
    pub inter_deviation: u64,
    /// Number of pictures in this GOP reported back so far.
    pub reported_frames: usize,
}

impl Default for GopInfo {
    fn default() -> Self {
        Self {
            exists: false,
            encoded: false,
            index: 0,
            length: 0,
            complexity: 0,
            complexity_known: false,
            temporal_layer_index: 0,
            frames_in_sw: 0,
            qp: 0,
            desired_size: 0,
            actual_size: 0,
            intra_size: 0,
            expected_intra_size: 0,
            expected_inter_size: 0,
            intra_deviation: NEUTRAL_DEVIATION,
            inter_deviation: NEUTRAL_DEVIATION,
            reported_frames: 0,
        }
    }
}

impl GopInfo {
    /// Register a new GOP head at `index`, replacing whatever stale entry
    /// may have occupied this slot from a much earlier pass of the
    /// registry's fixed-size ring.
    pub fn start(index: usize, temporal_layer_index: u8, frames_in_sw: usize) -> Self {
        Self {
            exists: true,
            index,
            temporal_layer_index,
            frames_in_sw,
            ..Default::default()
        }
    }
}

/// Walk backward from `position` to find the head of the GOP that contains
/// it: the closest earlier slot with `exists == true`. Every picture has its
/// own registry slot (for per-picture complexity bookkeeping), but only a
/// GOP head's slot has `exists` set.
pub fn find_gop_head(gop_infos: &[GopInfo], position: usize) -> usize {
    let mut cursor = position;
    loop {
        if gop_infos[cursor].exists {
            return cursor;
        }
        if cursor == 0 {
            return 0;
        }
        cursor -= 1;
    }
}

#[cfg(test)]
mod tests {
    include!("gop_test.rs");
}
