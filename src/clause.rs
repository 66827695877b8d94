//! Clause - a conjunction of literals with cached include and trainable
//! index sets.
//!
//! Each feature `k` owns two automata: `positive[k]` governs literal `x_k`
//! and `negative[k]` governs `NOT x_k`. Evaluation only walks the included
//! sets, so its cost follows the number of included literals rather than
//! `n_features`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use rand::Rng;

use crate::{
    Automaton, IndexSet,
    error::{Error, Result},
    feedback::Feedback,
    utils::bernoulli
};

/// # Overview
///
/// Selects the plain (`x_k`) or negated (`NOT x_k`) literal of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Positive,
    Negative
}

impl Literal {
    pub const BOTH: [Literal; 2] = [Literal::Positive, Literal::Negative];

    /// Truth value of this literal when the feature equals `xk`.
    #[inline(always)]
    pub fn value(self, xk: bool) -> bool {
        match self {
            Literal::Positive => xk,
            Literal::Negative => !xk
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Odds {
    strengthen: f64,
    weaken:     f64
}

/// # Overview
///
/// A clause with `2 * n_features` automata and cached index sets.
///
/// Invariant: `included_*` always lists exactly the indices whose automaton
/// action is include, and `trainable_*` lists the indices whose state lies
/// within the last used threshold of the middle state (empty when no
/// threshold is in use).
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::{Clause, utils::rng_from_seed};
///
/// let mut rng = rng_from_seed(42);
/// let mut clause = Clause::new(2, 10, &mut rng).unwrap();
///
/// // include x0 and NOT x1
/// clause.set_state(&[6, 5, 5, 7], None);
/// assert!(clause.evaluate(&[1, 0]));
/// assert!(!clause.evaluate(&[1, 1]));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    n_features:          usize,
    positive:            Vec<Automaton>,
    negative:            Vec<Automaton>,
    included_positive:   IndexSet,
    included_negative:   IndexSet,
    trainable_positive:  IndexSet,
    trainable_negative:  IndexSet,
    trainable_threshold: Option<u16>
}

impl Clause {
    /// # Overview
    ///
    /// Creates a clause whose literal pairs start on either side of the
    /// inclusion boundary: for each feature one automaton sits at `middle`
    /// and the other at `middle + 1`, chosen at random.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if the automata storage cannot be reserved.
    ///
    /// # Panics
    ///
    /// Panics if `n_states` is odd.
    pub fn new<R: Rng>(n_features: usize, n_states: i16, rng: &mut R) -> Result<Self> {
        assert!(n_states % 2 == 0, "n_states must be even, got {n_states}");
        let middle = n_states / 2;

        let mut positive = Vec::new();
        let mut negative = Vec::new();
        positive
            .try_reserve_exact(n_features)
            .and_then(|()| negative.try_reserve_exact(n_features))
            .map_err(|_| Error::Allocation {
                what: "clause automata"
            })?;

        for _ in 0..n_features {
            let choice = i16::from(rng.random::<bool>());
            positive.push(Automaton::new(n_states, middle + choice));
            negative.push(Automaton::new(n_states, middle + 1 - choice));
        }

        let mut clause = Self {
            n_features,
            positive,
            negative,
            included_positive: IndexSet::new(),
            included_negative: IndexSet::new(),
            trainable_positive: IndexSet::new(),
            trainable_negative: IndexSet::new(),
            trainable_threshold: None
        };
        clause.compress(None);
        Ok(clause)
    }

    #[inline(always)]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Automata governing the plain literals `x_k`.
    #[inline(always)]
    pub fn positive(&self) -> &[Automaton] {
        &self.positive
    }

    /// Automata governing the negated literals `NOT x_k`.
    #[inline(always)]
    pub fn negative(&self) -> &[Automaton] {
        &self.negative
    }

    /// # Overview
    ///
    /// Raw access to one side's automata. Call [`Clause::compress`] after
    /// mutating them, before the next evaluation or update.
    #[inline]
    pub fn automata_mut(&mut self, side: Literal) -> &mut [Automaton] {
        match side {
            Literal::Positive => &mut self.positive,
            Literal::Negative => &mut self.negative
        }
    }

    #[inline(always)]
    pub fn included_positive(&self) -> &IndexSet {
        &self.included_positive
    }

    #[inline(always)]
    pub fn included_negative(&self) -> &IndexSet {
        &self.included_negative
    }

    #[inline(always)]
    pub fn trainable_positive(&self) -> &IndexSet {
        &self.trainable_positive
    }

    #[inline(always)]
    pub fn trainable_negative(&self) -> &IndexSet {
        &self.trainable_negative
    }

    /// Number of included literals of both kinds.
    #[inline]
    pub fn n_included(&self) -> usize {
        self.included_positive.len() + self.included_negative.len()
    }

    /// # Overview
    ///
    /// Evaluates the conjunction on binary input. Early exit on violation.
    ///
    /// A clause with no included literals is vacuously true.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != n_features`.
    #[inline]
    pub fn evaluate(&self, x: &[u8]) -> bool {
        self.check_input(x);
        self.included_positive.iter().all(|k| x[k] != 0)
            && self.included_negative.iter().all(|k| x[k] == 0)
    }

    /// # Overview
    ///
    /// Rebuilds every index set from the automata.
    ///
    /// With `threshold = Some(t)` and `t > 0` the trainable sets receive the
    /// indices with `|state - middle| <= t`; with `None` or `Some(0)` they are
    /// emptied.
    pub fn compress(&mut self, threshold: Option<u16>) {
        self.included_positive.clear();
        self.included_negative.clear();
        for k in 0..self.n_features {
            if self.positive[k].action() {
                self.included_positive.push_unchecked(k);
            }
            if self.negative[k].action() {
                self.included_negative.push_unchecked(k);
            }
        }
        self.rebuild_trainable(threshold);
    }

    fn rebuild_trainable(&mut self, threshold: Option<u16>) {
        self.trainable_positive.clear();
        self.trainable_negative.clear();
        self.trainable_threshold = threshold;

        let Some(t) = threshold.filter(|&t| t > 0) else {
            return;
        };
        for k in 0..self.n_features {
            if near_boundary(&self.positive[k], t) {
                self.trainable_positive.push_unchecked(k);
            }
            if near_boundary(&self.negative[k], t) {
                self.trainable_negative.push_unchecked(k);
            }
        }
    }

    /// # Overview
    ///
    /// Applies one feedback regime to the automata and returns the number of
    /// automaton transitions performed.
    ///
    /// - `feedback`: [`Feedback::TypeI`] when the clause should match this
    ///   example, [`Feedback::TypeII`] when it should not.
    /// - `fired`: the clause output on `x`, as evaluated by the caller.
    /// - `threshold`: `None` scans every literal, `Some(t)` scans only the
    ///   trainable literals for `t`. `Some(0)` has no trainable literals and
    ///   applies no feedback.
    ///
    /// Included sets are maintained incrementally from action flips; the
    /// trainable sets are rebuilt afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != n_features`.
    pub fn update<R: Rng>(
        &mut self,
        x: &[u8],
        feedback: Feedback,
        fired: bool,
        s: f64,
        threshold: Option<u16>,
        rng: &mut R
    ) -> usize {
        self.check_input(x);
        if threshold.is_some() && threshold != self.trainable_threshold {
            self.rebuild_trainable(threshold);
        }

        let count = match feedback {
            Feedback::TypeI => {
                let odds = Odds {
                    strengthen: (s - 1.0) / s,
                    weaken:     1.0 / s
                };
                self.type_i(x, fired, odds, threshold.is_some(), rng)
            }
            Feedback::TypeII if fired => self.type_ii(x, threshold.is_some()),
            Feedback::TypeII => 0
        };

        self.rebuild_trainable(threshold);
        count
    }

    fn type_i<R: Rng>(
        &mut self,
        x: &[u8],
        fired: bool,
        odds: Odds,
        restricted: bool,
        rng: &mut R
    ) -> usize {
        let mut count = 0;

        if !restricted {
            for k in 0..self.n_features {
                let xk = x[k] != 0;
                for side in Literal::BOTH {
                    count += self.type_i_literal(side, k, xk, fired, odds, rng);
                }
            }
            return count;
        }

        for side in Literal::BOTH {
            let trainable = core::mem::take(self.trainable_mut(side));
            for k in trainable.iter() {
                count += self.type_i_literal(side, k, x[k] != 0, fired, odds, rng);
            }
        }
        count
    }

    /// Fired clause with a true literal: strengthen. Otherwise weaken.
    #[inline]
    fn type_i_literal<R: Rng>(
        &mut self,
        side: Literal,
        k: usize,
        xk: bool,
        fired: bool,
        odds: Odds,
        rng: &mut R
    ) -> usize {
        if fired && side.value(xk) {
            self.reward_with(side, k, odds.strengthen, rng)
        } else {
            self.penalize_with(side, k, odds.weaken, rng)
        }
    }

    fn type_ii(&mut self, x: &[u8], restricted: bool) -> usize {
        let mut count = 0;

        if !restricted {
            for k in 0..self.n_features {
                let xk = x[k] != 0;
                for side in Literal::BOTH {
                    count += self.block(side, k, xk);
                }
            }
            return count;
        }

        for side in Literal::BOTH {
            let trainable = core::mem::take(self.trainable_mut(side));
            for k in trainable.iter() {
                count += self.block(side, k, x[k] != 0);
            }
        }
        count
    }

    /// Moves an excluded false literal one step toward include.
    #[inline]
    fn block(&mut self, side: Literal, k: usize, xk: bool) -> usize {
        if side.value(xk) {
            return 0;
        }
        let (automata, included) = self.side_mut(side);
        let a = &mut automata[k];
        if a.action() {
            return 0;
        }
        // excluded means state <= middle < n_states
        if a.reward() {
            included.insert(k);
        }
        1
    }

    #[inline]
    fn reward_with<R: Rng>(&mut self, side: Literal, k: usize, p: f64, rng: &mut R) -> usize {
        let (automata, included) = self.side_mut(side);
        let a = &mut automata[k];
        if !a.can_reward() || !bernoulli(rng, p) {
            return 0;
        }
        if a.reward() {
            included.insert(k);
        }
        1
    }

    #[inline]
    fn penalize_with<R: Rng>(&mut self, side: Literal, k: usize, p: f64, rng: &mut R) -> usize {
        let (automata, included) = self.side_mut(side);
        let a = &mut automata[k];
        if !a.can_penalize() || !bernoulli(rng, p) {
            return 0;
        }
        if a.penalty() {
            included.remove(k);
        }
        1
    }

    #[inline(always)]
    fn check_input(&self, x: &[u8]) {
        assert_eq!(
            x.len(),
            self.n_features,
            "feature vector length mismatch"
        );
    }

    #[inline(always)]
    fn side_mut(&mut self, side: Literal) -> (&mut [Automaton], &mut IndexSet) {
        match side {
            Literal::Positive => (&mut self.positive, &mut self.included_positive),
            Literal::Negative => (&mut self.negative, &mut self.included_negative)
        }
    }

    #[inline(always)]
    fn trainable_mut(&mut self, side: Literal) -> &mut IndexSet {
        match side {
            Literal::Positive => &mut self.trainable_positive,
            Literal::Negative => &mut self.trainable_negative
        }
    }

    /// # Overview
    ///
    /// Overwrites every automaton state and recompresses.
    ///
    /// `states[..n_features]` are the plain literals, `states[n_features..]`
    /// the negated ones, both ordered by feature index.
    ///
    /// # Panics
    ///
    /// Panics if `states.len() != 2 * n_features`.
    pub fn set_state(&mut self, states: &[i16], threshold: Option<u16>) {
        assert_eq!(
            states.len(),
            2 * self.n_features,
            "expected {} states",
            2 * self.n_features
        );
        let (plain, negated) = states.split_at(self.n_features);
        for (a, &s) in self.positive.iter_mut().zip(plain) {
            a.set_state(s);
        }
        for (a, &s) in self.negative.iter_mut().zip(negated) {
            a.set_state(s);
        }
        self.compress(threshold);
    }

    /// # Overview
    ///
    /// Current states in the layout accepted by [`Clause::set_state`].
    pub fn get_state(&self) -> Vec<i16> {
        self.positive
            .iter()
            .chain(&self.negative)
            .map(Automaton::state)
            .collect()
    }
}

#[inline]
fn near_boundary(a: &Automaton, threshold: u16) -> bool {
    (i32::from(a.state()) - i32::from(a.middle())).abs() <= i32::from(threshold)
}
