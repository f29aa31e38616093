//! Public entry point: [`Model`], the rate-control state machine an encoder
//! drives one picture at a time.

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::adjuster;
use crate::deviation::DeviationBracket;
use crate::error::{RateControlError, Result};
use crate::feedback;
use crate::gop::{find_gop_head, GopInfo};
use crate::predictor::FrameComplexity;
use crate::selector::{self, GopSizingContext};

/// The three roles a picture can play, mirroring how the GOP registry and
/// QP-offset table treat each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FrameType {
    /// Starts a new GOP and a new prediction window.
    Key,
    /// An intra picture that doesn't start a new GOP (rare, but the registry
    /// shouldn't confuse it with a `Key` head).
    IntraOnly,
    /// A predicted picture at `temporal_layer`.
    Inter,
}

impl FrameType {
    pub fn is_key(self) -> bool {
        matches!(self, FrameType::Key)
    }

    pub fn is_intra(self) -> bool {
        matches!(self, FrameType::Key | FrameType::IntraOnly)
    }

    pub fn is_inter(self) -> bool {
        matches!(self, FrameType::Inter)
    }
}

/// Sequence-wide parameters fixed for the lifetime of a [`Model`].
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct SequenceParams {
    pub frames_to_be_encoded: u64,
    /// Bits per second.
    pub target_bit_rate: u64,
    /// Frames per second, as a 16.16 fixed-point value.
    pub frame_rate_fp: u64,
    pub luma_width: u32,
    pub luma_height: u32,
    /// Nominal number of pictures per GOP (the lookahead window length used
    /// when a head picture is reported).
    pub intra_period_length: u32,
}

impl SequenceParams {
    fn pixels(&self) -> u64 {
        self.luma_width as u64 * self.luma_height as u64
    }
}

struct Inner {
    params: SequenceParams,
    /// Frames per second, normalized out of `params.frame_rate_fp`'s 16.16
    /// fixed point and clamped to at least 1 whole frame.
    effective_frame_rate: u64,
    /// `params.intra_period_length`, clamped to at least 1 picture.
    effective_intra_period: usize,
    gops: Vec<GopInfo>,
    intra_brackets: Vec<DeviationBracket>,
    inter_brackets: Vec<DeviationBracket>,
    cumulative_deviation_bits: i64,
    /// Running sum of each reported picture's share of its GOP's target
    /// size, across the whole sequence so far.
    global_target_bits: u64,
    /// Running sum of every picture's actual reported size, across the
    /// whole sequence so far. Compared against `global_target_bits` to sign
    /// the mid-GOP QP nudge.
    global_actual_bits: u64,
}

/// Adaptive rate-control model for a picture-hierarchy-aware encoder.
///
/// A `Model` is constructed once per sequence and driven picture by picture:
/// [`Model::report_complexity`] before encoding (to size the GOP a key
/// picture starts), [`Model::get_quantizer`] to pick the picture's QP, and
/// [`Model::update_model`] after encoding (to fold the real size back in).
/// All three are infallible once construction succeeds — the work that can
/// fail (validating sequence parameters) happens up front in [`Model::new`].
pub struct Model {
    inner: Mutex<Inner>,
}

impl Model {
    pub fn new(params: SequenceParams) -> Result<Self> {
        if params.frames_to_be_encoded == 0 {
            return Err(RateControlError::EmptySequence);
        }
        if params.luma_width == 0 || params.luma_height == 0 {
            return Err(RateControlError::EmptyFrame {
                width: params.luma_width,
                height: params.luma_height,
            });
        }

        let effective_frame_rate = (params.frame_rate_fp >> 16).max(1);
        let effective_intra_period = (params.intra_period_length as usize).max(1);

        debug!(
            frames = params.frames_to_be_encoded,
            bit_rate = params.target_bit_rate,
            frame_rate = effective_frame_rate,
            width = params.luma_width,
            height = params.luma_height,
            "constructing rate control model"
        );

        Ok(Self {
            inner: Mutex::new(Inner {
                params,
                effective_frame_rate,
                effective_intra_period,
                gops: vec![GopInfo::default(); params.frames_to_be_encoded as usize],
                intra_brackets: crate::tables::initial_intra_deviation_brackets(),
                inter_brackets: crate::tables::initial_inter_deviation_brackets(),
                cumulative_deviation_bits: 0,
                global_target_bits: 0,
                global_actual_bits: 0,
            }),
        })
    }

    /// Report a picture's measured complexity, ahead of encoding it. Every
    /// report is stored in that picture's own registry slot; a
    /// [`FrameType::Key`] report additionally sizes and QP-selects the GOP it
    /// starts, drawing its lookahead from whatever later pictures in the
    /// window have already reported their own complexity (in any order).
    pub fn report_complexity(
        &self,
        picture_number: usize,
        frame_type: FrameType,
        temporal_layer: u8,
        complexity: u64,
    ) {
        let mut inner = self.inner.lock();
        let pixels = inner.params.pixels();

        inner.gops[picture_number].complexity = complexity;
        inner.gops[picture_number].complexity_known = true;
        inner.gops[picture_number].temporal_layer_index = temporal_layer;

        if !frame_type.is_key() {
            return;
        }

        let previous_head = if picture_number == 0 {
            None
        } else {
            Some(find_gop_head(&inner.gops, picture_number - 1))
        };
        let previous_length = previous_head.map(|head| picture_number - head);

        let frames_in_sw = inner.effective_intra_period;
        let mut gop = GopInfo::start(picture_number, temporal_layer, frames_in_sw);

        let ctx = GopSizingContext {
            target_bit_rate: inner.params.target_bit_rate,
            frame_rate: inner.effective_frame_rate,
            gop_length: frames_in_sw,
            cumulative_deviation_bits: inner.cumulative_deviation_bits,
        };

        let window_end = (picture_number + frames_in_sw).min(inner.gops.len());
        let lookahead: Vec<FrameComplexity> = (picture_number + 1..window_end)
            .map(|i| {
                let slot = &inner.gops[i];
                FrameComplexity {
                    temporal_layer: slot.temporal_layer_index as usize,
                    known: slot.complexity_known.then_some(slot.complexity),
                }
            })
            .collect();

        // The previous GOP's length is backfilled directly below, once this
        // call releases its borrow of `gop` — `record_new_gop` can't hold
        // both `gop` and `inner.gops[previous_head]` mutably at once, so
        // it's given `None` here and handled separately.
        selector::record_new_gop(
            &mut gop,
            None,
            None,
            &ctx,
            complexity,
            &lookahead,
            pixels,
            &inner.intra_brackets,
            &inner.inter_brackets,
        );

        if let (Some(head), Some(length)) = (previous_head, previous_length) {
            inner.gops[head].length = length;
        }

        trace!(
            picture_number,
            qp = gop.qp,
            desired_size = gop.desired_size,
            "registered new gop"
        );

        inner.gops[picture_number] = gop;
    }

    /// Choose the QP for `picture_number`, whose GOP must already have been
    /// sized via [`Model::report_complexity`] on its head picture.
    pub fn get_quantizer(&self, picture_number: usize, frame_type: FrameType, temporal_layer: u8) -> u32 {
        let inner = self.inner.lock();
        let head = find_gop_head(&inner.gops, picture_number);
        let gop = &inner.gops[head];

        if frame_type.is_intra() {
            return gop.qp;
        }

        let base = selector::inter_qp_for_layer(gop.qp, temporal_layer as usize);
        let over_budget = inner.global_actual_bits > inner.global_target_bits;
        let delta = adjuster::compute_delta(gop.reported_frames, temporal_layer, over_budget);
        adjuster::apply_delta(base, delta)
    }

    /// Fold a picture's actual encoded size back into the model. Once the
    /// last picture of a GOP has been reported, its deviation brackets are
    /// updated and the cumulative budget tracker advances.
    pub fn update_model(&self, picture_number: usize, frame_type: FrameType, actual_bits: u64) {
        let mut inner = self.inner.lock();
        let head = find_gop_head(&inner.gops, picture_number);

        inner.gops[head].reported_frames += 1;

        let frames_in_sw = inner.gops[head].frames_in_sw.max(1);
        let share = inner.gops[head].desired_size / frames_in_sw as u64;
        inner.global_target_bits += share;
        inner.global_actual_bits += actual_bits;

        if frame_type.is_intra() {
            inner.gops[head].intra_size = actual_bits;
        } else {
            inner.gops[head].actual_size += actual_bits;
        }

        let is_last_in_gop = inner.gops[head].reported_frames >= frames_in_sw;

        if is_last_in_gop && !inner.gops[head].encoded {
            let intra_bits = inner.gops[head].intra_size;
            let inter_bits = inner.gops[head].actual_size;
            let intra_brackets = &mut inner.intra_brackets;
            let inter_brackets = &mut inner.inter_brackets;

            let result = {
                let gop = &mut inner.gops[head];
                feedback::update_model(gop, intra_brackets, inter_brackets, intra_bits, inter_bits)
            };
            inner.cumulative_deviation_bits += result.budget_delta;

            debug!(
                picture_number = head,
                budget_delta = result.budget_delta,
                "gop feedback applied"
            );
        }
    }

    /// Snapshot of a picture's registry slot, mostly useful for tests and
    /// debugging — `GopInfo` is plain serializable data.
    pub fn gop_info(&self, picture_number: usize) -> GopInfo {
        let inner = self.inner.lock();
        let head = find_gop_head(&inner.gops, picture_number);
        inner.gops[head]
    }

    /// Snapshot of the `(intra, inter)` deviation brackets covering
    /// `complexity`, mostly useful for tests and debugging.
    pub fn deviation_snapshot(&self, complexity: u64) -> (DeviationBracket, DeviationBracket) {
        let inner = self.inner.lock();
        (
            crate::deviation::peek_bracket(&inner.intra_brackets, complexity),
            crate::deviation::peek_bracket(&inner.inter_brackets, complexity),
        )
    }
}
