//! Epoch loop controls for [`TsetlinMachine::fit_with_options`].
//!
//! [`TsetlinMachine::fit_with_options`]: crate::TsetlinMachine::fit_with_options

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
#[cfg(feature = "std")]
use std::boxed::Box;

use crate::feedback::FeedbackCounters;

/// # Overview
///
/// What one pass over the training set did to the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch:    usize,
    /// Training-set accuracy after the epoch.
    pub accuracy: f32,
    /// Automaton transitions caused by the epoch's steps.
    pub feedback: FeedbackCounters
}

/// Invoked after every epoch; returning `false` ends training.
pub type ProgressCallback = Box<dyn FnMut(&EpochStats) -> bool + Send>;

/// # Overview
///
/// Stop once accuracy has gone `patience` epochs without beating the best
/// earlier epoch by more than `min_delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plateau {
    pub patience:  usize,
    pub min_delta: f32
}

impl Plateau {
    pub(crate) fn reached(&self, epochs: &[EpochStats]) -> bool {
        if epochs.len() <= self.patience {
            return false;
        }
        let (earlier, recent) = epochs.split_at(epochs.len() - self.patience);
        let best = earlier
            .iter()
            .map(|e| e.accuracy)
            .fold(f32::NEG_INFINITY, f32::max);
        recent.iter().all(|e| e.accuracy <= best + self.min_delta)
    }
}

/// # Overview
///
/// Epoch budget and stop conditions for
/// [`TsetlinMachine::fit_with_options`].
///
/// Examples are visited in dataset order unless [`FitOptions::shuffled`] is
/// set.
///
/// [`TsetlinMachine::fit_with_options`]: crate::TsetlinMachine::fit_with_options
pub struct FitOptions {
    pub epochs:   usize,
    pub shuffle:  bool,
    pub plateau:  Option<Plateau>,
    pub callback: Option<ProgressCallback>
}

impl FitOptions {
    #[must_use]
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            shuffle: false,
            plateau: None,
            callback: None
        }
    }

    /// Reshuffles example order at the start of every epoch.
    #[must_use]
    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }

    #[must_use]
    pub fn stop_on_plateau(mut self, patience: usize, min_delta: f32) -> Self {
        self.plateau = Some(Plateau {
            patience,
            min_delta
        });
        self
    }

    /// # Overview
    ///
    /// Observes each finished epoch. Returning `false` stops training.
    ///
    /// ```
    /// use tsetlin_pairwise::FitOptions;
    ///
    /// let opts = FitOptions::new(100).on_epoch(|stats| stats.feedback.total() > 0);
    /// assert!(opts.callback.is_some());
    /// ```
    #[must_use]
    pub fn on_epoch<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&EpochStats) -> bool + Send + 'static
    {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl core::fmt::Debug for FitOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FitOptions")
            .field("epochs", &self.epochs)
            .field("shuffle", &self.shuffle)
            .field("plateau", &self.plateau)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// # Overview
///
/// Per-epoch record of a [`TsetlinMachine::fit_with_options`] run.
///
/// [`TsetlinMachine::fit_with_options`]: crate::TsetlinMachine::fit_with_options
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub epochs:        Vec<EpochStats>,
    /// A plateau or the callback ended training before the epoch budget.
    pub stopped_early: bool
}

impl FitResult {
    #[inline]
    pub fn epochs_run(&self) -> usize {
        self.epochs.len()
    }

    /// Accuracy after the last epoch; `None` when no epoch ran.
    #[inline]
    pub fn final_accuracy(&self) -> Option<f32> {
        self.epochs.last().map(|e| e.accuracy)
    }

    /// Feedback summed over every epoch.
    pub fn feedback(&self) -> FeedbackCounters {
        let mut total = FeedbackCounters::default();
        for e in &self.epochs {
            total += e.feedback;
        }
        total
    }
}
