//! Bounded running-average deviation tracking.
//!
//! Each bracket remembers how far off the table's size prediction has been
//! for complexities in its range, as a fixed-point ratio (predicted / actual,
//! so dividing a raw prediction by the bracket's deviation reproduces the
//! actually observed size). The ratio is folded in as a running average that
//! stops growing its sample weight past [`MAX_REPORTED`], so the model keeps
//! adapting indefinitely instead of converging to a fixed weight per
//! bracket.

use crate::constants::MAX_REPORTED;
use crate::fixed_point::NEUTRAL_DEVIATION;

/// A complexity-range bracket tracking a running-average deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviationBracket {
    pub scope_start: u64,
    pub scope_end: u64,
    /// Fixed-point ratio, `1 << RC_DEVIATION_PRECISION` meaning "no bias".
    pub deviation: u64,
    /// Number of samples folded in so far, capped at `MAX_REPORTED`.
    pub reported: u32,
}

impl DeviationBracket {
    pub fn new(scope_start: u64, scope_end: u64) -> Self {
        Self {
            scope_start,
            scope_end,
            deviation: NEUTRAL_DEVIATION,
            reported: 0,
        }
    }

    /// Fold a freshly observed ratio (`var`, same fixed-point scale as
    /// `deviation`) into the running average, then grow the sample count
    /// (capped).
    pub fn update(&mut self, var: u64) {
        let reported = self.reported as u64;
        self.deviation = (self.deviation * reported + var) / (reported + 1);
        if self.reported < MAX_REPORTED {
            self.reported += 1;
        }
    }
}

/// Find the bracket covering `complexity`, falling back to the last bracket
/// (the sentinel, covering up to `MAX_COMPLEXITY`) if none matches exactly.
pub fn find_bracket(brackets: &mut [DeviationBracket], complexity: u64) -> &mut DeviationBracket {
    let index = brackets
        .iter()
        .position(|b| complexity >= b.scope_start && complexity <= b.scope_end)
        .unwrap_or(brackets.len() - 1);
    &mut brackets[index]
}

/// Read-only version of [`find_bracket`]: snapshot the bracket covering
/// `complexity` without requiring (or taking) a mutable borrow. Used at QP
/// selection time, where the deviation value is read but not yet updated —
/// the update happens later, once the picture's actual size is known.
pub fn peek_bracket(brackets: &[DeviationBracket], complexity: u64) -> DeviationBracket {
    brackets
        .iter()
        .find(|b| complexity >= b.scope_start && complexity <= b.scope_end)
        .copied()
        .unwrap_or_else(|| *brackets.last().expect("bracket table is never empty"))
}

/// Just the deviation value from [`peek_bracket`], which is all most callers need.
pub fn peek_deviation(brackets: &[DeviationBracket], complexity: u64) -> u64 {
    peek_bracket(brackets, complexity).deviation
}
