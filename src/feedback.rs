//! Type I and Type II feedback regimes and their diagnostic counters.

use core::ops::AddAssign;

/// # Overview
///
/// Feedback regime applied to a clause.
///
/// - `TypeI`: the clause should match this example. Fired clauses drift
///   toward the example's literals, silent clauses erase literals.
/// - `TypeII`: the clause should not match. A clause that fired gains a
///   currently-false literal so it stops firing. Never randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    TypeI,
    TypeII
}

impl Feedback {
    /// Regime for `match_target` as 0/1.
    #[inline]
    pub fn from_match_target(match_target: bool) -> Self {
        if match_target { Self::TypeI } else { Self::TypeII }
    }
}

/// # Overview
///
/// Automaton transitions applied during one or more training steps, split
/// by the class pair they hit and the feedback regime.
///
/// Diagnostic only; training never reads these back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackCounters {
    pub target_type_i:  usize,
    pub target_type_ii: usize,
    pub other_type_i:   usize,
    pub other_type_ii:  usize
}

impl FeedbackCounters {
    /// Total transitions across all four categories.
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.target_type_i + self.target_type_ii + self.other_type_i + self.other_type_ii
    }

    /// Adds `count` to the bucket for `feedback` on the target or the other
    /// class.
    #[inline]
    pub(crate) fn record(&mut self, target: bool, feedback: Feedback, count: usize) {
        let bucket = match (target, feedback) {
            (true, Feedback::TypeI) => &mut self.target_type_i,
            (true, Feedback::TypeII) => &mut self.target_type_ii,
            (false, Feedback::TypeI) => &mut self.other_type_i,
            (false, Feedback::TypeII) => &mut self.other_type_ii
        };
        *bucket += count;
    }
}

impl AddAssign for FeedbackCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.target_type_i += rhs.target_type_i;
        self.target_type_ii += rhs.target_type_ii;
        self.other_type_i += rhs.other_type_i;
        self.other_type_ii += rhs.other_type_ii;
    }
}
