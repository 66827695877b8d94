//! Multi-class Tsetlin Machine trained with pairwise stochastic feedback.
//!
//! Every training step touches exactly two classes: the target class and one
//! other class drawn uniformly at random, so the cost of a step does not
//! grow with the number of classes.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::{
    Clause, Config, Rule, TrainParams,
    error::{Error, Result},
    feedback::{Feedback, FeedbackCounters},
    training::{EpochStats, FitOptions, FitResult},
    utils::{argmax, bernoulli, clip_margin, shuffle}
};

/// # Overview
///
/// Vote direction of a clause: positive clauses add +1 to their class when
/// they fire, negative clauses add -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative
}

impl Polarity {
    #[inline(always)]
    pub fn sign(self) -> i32 {
        match self {
            Polarity::Positive => 1,
            Polarity::Negative => -1
        }
    }

    #[inline(always)]
    fn offset(self) -> usize {
        match self {
            Polarity::Positive => 0,
            Polarity::Negative => 1
        }
    }

    /// Regime applied to a clause of this polarity on the target class
    /// (`target = true`) or on the sampled other class.
    #[inline]
    fn feedback(self, target: bool) -> Feedback {
        match (self, target) {
            (Polarity::Positive, true) | (Polarity::Negative, false) => Feedback::TypeI,
            _ => Feedback::TypeII
        }
    }
}

/// # Overview
///
/// Multi-class Tsetlin Machine.
///
/// Each class owns `n_clauses` clauses: `n_clauses / 2` positive, then
/// `n_clauses / 2` negative. They are stored flat, indexed by
/// `(class, polarity, slot)`.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::{Config, TrainParams, TsetlinMachine, utils::rng_from_seed};
///
/// let config = Config::builder()
///     .features(4)
///     .classes(2)
///     .clauses(10)
///     .states(100)
///     .build()
///     .unwrap();
/// let mut rng = rng_from_seed(42);
/// let mut tm = TsetlinMachine::new(config, &mut rng).unwrap();
///
/// let x = vec![vec![1, 0, 1, 0], vec![0, 1, 0, 1]];
/// let y = vec![0, 1];
/// let params = TrainParams::new(5, 3.0).unwrap();
///
/// tm.fit(&x, &y, &params, 50, &mut rng);
/// assert!(tm.predict(&x[0]) < 2);
/// ```
#[derive(Debug, Clone)]
pub struct TsetlinMachine {
    clauses: Vec<Clause>,
    config:  Config
}

impl TsetlinMachine {
    /// # Overview
    ///
    /// Creates a machine with freshly initialized clauses.
    ///
    /// # Errors
    ///
    /// Any [`Config::validate`] error, or [`Error::Allocation`] if clause
    /// storage cannot be reserved. Clauses built before the failure are
    /// dropped.
    pub fn new<R: Rng>(config: Config, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let total = config
            .n_classes
            .checked_mul(config.n_clauses)
            .ok_or(Error::Allocation { what: "clauses" })?;

        let mut clauses = Vec::new();
        clauses
            .try_reserve_exact(total)
            .map_err(|_| Error::Allocation { what: "clauses" })?;
        for _ in 0..total {
            clauses.push(Clause::new(config.n_features, config.n_states, rng)?);
        }

        debug!(
            n_features = config.n_features,
            n_classes = config.n_classes,
            n_clauses = config.n_clauses,
            n_states = config.n_states,
            "tsetlin machine initialized"
        );
        Ok(Self {
            clauses,
            config
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.config.n_classes
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.config.n_features
    }

    /// # Overview
    ///
    /// The clause at `(class, polarity, slot)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range.
    pub fn clause(&self, class: usize, polarity: Polarity, slot: usize) -> &Clause {
        &self.clauses[self.index(class, polarity, slot)]
    }

    /// # Overview
    ///
    /// Mutable access for state injection. Use [`Clause::set_state`] or
    /// recompress after touching automata directly.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range.
    pub fn clause_mut(&mut self, class: usize, polarity: Polarity, slot: usize) -> &mut Clause {
        let idx = self.index(class, polarity, slot);
        &mut self.clauses[idx]
    }

    #[inline]
    fn index(&self, class: usize, polarity: Polarity, slot: usize) -> usize {
        let half = self.config.half_clauses();
        assert!(class < self.config.n_classes, "class {class} out of range");
        assert!(slot < half, "slot {slot} out of range");
        (class * 2 + polarity.offset()) * half + slot
    }

    /// Positive and negative clauses of one class.
    #[inline]
    fn class_clauses(&self, class: usize) -> (&[Clause], &[Clause]) {
        let start = class * self.config.n_clauses;
        self.clauses[start..start + self.config.n_clauses].split_at(self.config.half_clauses())
    }

    #[inline]
    fn check_input(&self, x: &[u8]) {
        assert_eq!(
            x.len(),
            self.config.n_features,
            "feature vector length mismatch"
        );
    }

    /// # Overview
    ///
    /// Unclipped vote sum of one class: fired positive clauses minus fired
    /// negative clauses.
    pub fn class_sum(&self, class: usize, x: &[u8]) -> i32 {
        let (pos, neg) = self.class_clauses(class);
        let fired = |clauses: &[Clause]| clauses.iter().filter(|c| c.evaluate(x)).count() as i32;
        fired(pos) - fired(neg)
    }

    /// # Overview
    ///
    /// Vote sums per class.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != n_features`.
    pub fn class_votes(&self, x: &[u8]) -> Vec<i32> {
        self.check_input(x);
        (0..self.config.n_classes)
            .map(|class| self.class_sum(class, x))
            .collect()
    }

    /// # Overview
    ///
    /// Predicts class with highest vote. Ties go to the lowest class index.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != n_features`.
    #[inline]
    pub fn predict(&self, x: &[u8]) -> usize {
        argmax(&self.class_votes(x))
    }

    /// # Overview
    ///
    /// Predicted class together with the vote vector it was chosen from.
    pub fn predict_with_votes(&self, x: &[u8]) -> (usize, Vec<i32>) {
        let votes = self.class_votes(x);
        (argmax(&votes), votes)
    }

    /// # Overview
    ///
    /// Batch prediction for multiple samples.
    #[inline]
    pub fn predict_batch(&self, xs: &[Vec<u8>]) -> Vec<usize> {
        xs.iter().map(|x| self.predict(x)).collect()
    }

    /// # Overview
    ///
    /// Trains on a single example and returns the feedback it caused.
    ///
    /// The target class sees its clauses updated with probability
    /// `(T - margin) / 2T`, one other class drawn uniformly with probability
    /// `(T + margin') / 2T`, margins clipped to `[-T, T]`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != n_features` or `y >= n_classes`.
    pub fn step<R: Rng>(
        &mut self,
        x: &[u8],
        y: usize,
        params: &TrainParams,
        rng: &mut R
    ) -> FeedbackCounters {
        self.check_input(x);
        assert!(
            y < self.config.n_classes,
            "label {y} out of range for {} classes",
            self.config.n_classes
        );

        let mut counters = FeedbackCounters::default();
        let margin = self.train_class(x, y, true, params, rng, &mut counters);
        let other = self.sample_other_class(y, rng);
        let other_margin = self.train_class(x, other, false, params, rng, &mut counters);

        trace!(
            target_class = y,
            other_class = other,
            margin,
            other_margin,
            feedback = counters.total(),
            "training step"
        );
        counters
    }

    /// Uniform draw over every class except `y`; class 0 when it is the only
    /// one.
    fn sample_other_class<R: Rng>(&self, y: usize, rng: &mut R) -> usize {
        let n = self.config.n_classes;
        if n == 1 {
            return 0;
        }
        let r = rng.random_range(0..n - 1);
        if r >= y { r + 1 } else { r }
    }

    /// Evaluates one class, then gives each of its clauses feedback with the
    /// margin-derived probability. Returns the clipped margin.
    fn train_class<R: Rng>(
        &mut self,
        x: &[u8],
        class: usize,
        target: bool,
        params: &TrainParams,
        rng: &mut R,
        counters: &mut FeedbackCounters
    ) -> i32 {
        let half = self.config.half_clauses();
        let start = class * self.config.n_clauses;
        let (pos, neg) = self.clauses[start..start + self.config.n_clauses].split_at_mut(half);

        let pos_fired: Vec<bool> = pos.iter().map(|c| c.evaluate(x)).collect();
        let neg_fired: Vec<bool> = neg.iter().map(|c| c.evaluate(x)).collect();
        let sum = pos_fired.iter().filter(|&&f| f).count() as i32
            - neg_fired.iter().filter(|&&f| f).count() as i32;

        let margin = clip_margin(sum, params.t);
        let t = f64::from(params.t);
        let m = f64::from(margin);
        let prob = if target {
            (t - m) / (2.0 * t)
        } else {
            (t + m) / (2.0 * t)
        };

        let pos_feedback = Polarity::Positive.feedback(target);
        let neg_feedback = Polarity::Negative.feedback(target);
        for i in 0..half {
            if bernoulli(rng, prob) {
                let n = pos[i].update(x, pos_feedback, pos_fired[i], params.s, params.threshold, rng);
                counters.record(target, pos_feedback, n);
            }
            if bernoulli(rng, prob) {
                let n = neg[i].update(x, neg_feedback, neg_fired[i], params.s, params.threshold, rng);
                counters.record(target, neg_feedback, n);
            }
        }
        margin
    }

    /// # Overview
    ///
    /// Runs [`TsetlinMachine::step`] once per example per epoch, in dataset
    /// order. Returns the feedback summed over all steps.
    ///
    /// # Panics
    ///
    /// Panics if `x` and `y` differ in length or any example violates the
    /// preconditions of `step`.
    pub fn fit<R: Rng>(
        &mut self,
        x: &[Vec<u8>],
        y: &[usize],
        params: &TrainParams,
        epochs: usize,
        rng: &mut R
    ) -> FeedbackCounters {
        assert_eq!(x.len(), y.len(), "samples and labels differ in length");
        let mut total = FeedbackCounters::default();
        for _ in 0..epochs {
            for (xi, &yi) in x.iter().zip(y) {
                total += self.step(xi, yi, params, rng);
            }
        }
        total
    }

    /// # Overview
    ///
    /// Epoch loop with optional shuffling, plateau detection and a per-epoch
    /// callback. Each epoch is recorded with its accuracy and feedback.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDataset`], [`Error::DimensionMismatch`] for mismatched
    /// sample/label counts or feature widths, [`Error::LabelOutOfRange`].
    pub fn fit_with_options<R: Rng>(
        &mut self,
        x: &[Vec<u8>],
        y: &[usize],
        params: &TrainParams,
        mut opts: FitOptions,
        rng: &mut R
    ) -> Result<FitResult> {
        self.validate_dataset(x, y)?;

        let mut order: Vec<usize> = (0..x.len()).collect();
        let mut epochs = Vec::with_capacity(opts.epochs);
        let mut stopped_early = false;

        for epoch in 1..=opts.epochs {
            if opts.shuffle {
                shuffle(&mut order, rng);
            }

            let mut feedback = FeedbackCounters::default();
            for &i in &order {
                feedback += self.step(&x[i], y[i], params, rng);
            }
            let stats = EpochStats {
                epoch,
                accuracy: self.evaluate(x, y),
                feedback
            };
            debug!(
                epoch,
                accuracy = stats.accuracy,
                feedback = feedback.total(),
                "epoch complete"
            );
            epochs.push(stats);

            if let Some(callback) = opts.callback.as_mut()
                && !callback(&stats)
            {
                info!(epoch, "training stopped by callback");
                stopped_early = true;
                break;
            }
            if let Some(plateau) = opts.plateau
                && plateau.reached(&epochs)
            {
                info!(epoch, accuracy = stats.accuracy, "accuracy plateaued");
                stopped_early = true;
                break;
            }
        }

        Ok(FitResult {
            epochs,
            stopped_early
        })
    }

    fn validate_dataset(&self, x: &[Vec<u8>], y: &[usize]) -> Result<()> {
        if x.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if x.len() != y.len() {
            return Err(Error::DimensionMismatch {
                expected: x.len(),
                got:      y.len()
            });
        }
        if let Some(row) = x.iter().find(|row| row.len() != self.config.n_features) {
            return Err(Error::DimensionMismatch {
                expected: self.config.n_features,
                got:      row.len()
            });
        }
        if let Some(&label) = y.iter().find(|&&label| label >= self.config.n_classes) {
            return Err(Error::LabelOutOfRange {
                label,
                n_classes: self.config.n_classes
            });
        }
        Ok(())
    }

    /// Evaluates accuracy on test data.
    ///
    /// Returns fraction of correct predictions (0.0 to 1.0).
    ///
    /// # Panics
    ///
    /// Panics if `x` and `y` differ in length.
    #[must_use]
    pub fn evaluate(&self, x: &[Vec<u8>], y: &[usize]) -> f32 {
        assert_eq!(x.len(), y.len(), "samples and labels differ in length");
        if x.is_empty() {
            return 0.0;
        }
        let correct = x
            .iter()
            .zip(y)
            .filter(|(xi, yi)| self.predict(xi) == **yi)
            .count();
        correct as f32 / x.len() as f32
    }

    /// Extracts learned rules of one class, positive clauses first.
    #[must_use]
    pub fn rules(&self, class: usize) -> Vec<Rule> {
        let (pos, neg) = self.class_clauses(class);
        pos.iter()
            .map(|c| Rule::from_clause(c, Polarity::Positive))
            .chain(neg.iter().map(|c| Rule::from_clause(c, Polarity::Negative)))
            .collect()
    }
}
