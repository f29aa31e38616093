//! Wire constants from spec.md §6. Reproduced verbatim — these are part of
//! the contract, not tuning knobs.

/// Maximum valid QP value; QP is always in `[0, MAX_QP_VALUE]`.
pub const MAX_QP_VALUE: u32 = 63;

/// Upper bound of the complexity axis. The sentinel segment in every table
/// uses this as its `scope_end`.
pub const MAX_COMPLEXITY: u32 = 999_999;

/// Reference frame area (1920×1080) that every table cell is denominated
/// against. Predictions are scaled to/from the actual frame area.
pub const MODEL_DEFAULT_PIXEL_AREA: u64 = 1920 * 1080;

/// Fractional bits used throughout the model's fixed-point arithmetic.
pub const RC_DEVIATION_PRECISION: u32 = 16;

/// Fixed pitch used to extrapolate intra-frame size past the last real
/// complexity segment (the "max complexity" policy, spec.md §4.1).
pub const PITCH_ON_MAX_COMPLEXITY_FOR_INTRA_FRAMES: u64 = 57;

/// Fixed pitch used to extrapolate inter-frame size past the last real
/// complexity segment.
pub const PITCH_ON_MAX_COMPLEXITY_FOR_INTER_FRAMES: u64 = 17;

/// Divisor applied to the cumulative over/undershoot when computing a new
/// GOP's target size (spec.md §4.4).
pub const DAMPING_FACTOR: u64 = 2;

/// When damped correction would drive a GOP's target size negative, the
/// target is instead divided by this factor rather than going negative.
pub const MAX_DOWNSIZE_FACTOR: u64 = 15;

/// Running-average deviation brackets stop growing their sample count past
/// this many reports; they keep updating their value forever.
pub const MAX_REPORTED: u32 = 5;

/// Number of reported frames a GOP must have before the mid-GOP adjuster
/// starts perturbing upcoming inter QPs.
pub const AMOUNT_OF_REPORTED_FRAMES_TO_TRIGGER_ON_THE_FLY_QP: u32 = 2;

/// Mid-GOP QP perturbation only applies to temporal layers below this
/// index; higher (finer) layers are left alone.
pub const MAX_INTER_LEVEL_FOR_ON_THE_FLY_QP: u8 = 4;

/// Absolute bound on the mid-GOP QP delta.
pub const MAX_DELTA_QP_WHITIN_GOP: i32 = 12;

/// Magnitude of the fixed mid-GOP QP nudge (before the clamp above).
pub const ON_THE_FLY_QP_STEP: i32 = 3;

/// Per-temporal-layer QP offset applied to inter frames relative to their
/// GOP's intra QP.
pub const DELTA_LEVELS: [i32; 7] = [3, 5, 7, 8, 9, 10, 11];

/// Number of temporal layers the inter complexity table has real data for;
/// `DELTA_LEVELS` covers more layers than the table does (see DESIGN.md).
pub const INTER_TABLE_LAYERS: usize = 5;
