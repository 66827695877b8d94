//! Configuration and builder for Tsetlin Machine.

use crate::error::{Error, Result};

/// # Overview
///
/// Structural parameters of a Tsetlin Machine, fixed at construction.
///
/// `n_clauses` counts clauses per class; half vote for the class, half
/// against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Config {
    pub n_features: usize,
    pub n_classes:  usize,
    pub n_clauses:  usize,
    pub n_states:   i16
}

impl Config {
    /// # Overview
    ///
    /// Creates a new ConfigBuilder.
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// # Overview
    ///
    /// Validates configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.n_clauses == 0 {
            return Err(Error::MissingClauses);
        }
        if !self.n_clauses.is_multiple_of(2) {
            return Err(Error::OddClauses);
        }
        if self.n_features == 0 {
            return Err(Error::MissingFeatures);
        }
        if self.n_classes == 0 {
            return Err(Error::MissingClasses);
        }
        if self.n_states < 2 {
            return Err(Error::InvalidStates);
        }
        if self.n_states % 2 != 0 {
            return Err(Error::OddStates);
        }
        Ok(())
    }

    /// Clauses of one polarity per class.
    #[inline]
    #[must_use]
    pub fn half_clauses(&self) -> usize {
        self.n_clauses / 2
    }
}

/// # Overview
///
/// Builder for Config with validation.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    n_features: Option<usize>,
    n_classes:  Option<usize>,
    n_clauses:  Option<usize>,
    n_states:   Option<i16>
}

impl ConfigBuilder {
    /// # Overview
    ///
    /// Sets the number of clauses per class (must be even).
    pub fn clauses(mut self, n: usize) -> Self {
        self.n_clauses = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets the number of input features.
    pub fn features(mut self, n: usize) -> Self {
        self.n_features = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets the number of output classes.
    pub fn classes(mut self, n: usize) -> Self {
        self.n_classes = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets total states per automaton (must be even, default: 100).
    pub fn states(mut self, n: i16) -> Self {
        self.n_states = Some(n);
        self
    }

    /// # Overview
    ///
    /// Builds and validates the Config.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            n_features: self.n_features.ok_or(Error::MissingFeatures)?,
            n_classes:  self.n_classes.ok_or(Error::MissingClasses)?,
            n_clauses:  self.n_clauses.ok_or(Error::MissingClauses)?,
            n_states:   self.n_states.unwrap_or(100)
        };
        config.validate()?;
        Ok(config)
    }
}

/// # Overview
///
/// Per-step training hyperparameters.
///
/// - `t`: vote margin; clipped class sums live in `[-t, t]`.
/// - `s`: specificity; literals are weakened with probability `1/s`.
/// - `threshold`: when set, feedback only visits literals whose state lies
///   within `threshold` of the middle state. Must be positive.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::TrainParams;
///
/// let params = TrainParams::new(15, 3.9).unwrap().with_threshold(5).unwrap();
/// assert_eq!(params.threshold, Some(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct TrainParams {
    pub t:         i32,
    pub s:         f64,
    pub threshold: Option<u16>
}

impl TrainParams {
    /// # Overview
    ///
    /// Creates validated parameters with a full literal scan.
    pub fn new(t: i32, s: f64) -> Result<Self> {
        let params = Self {
            t,
            s,
            threshold: None
        };
        params.validate()?;
        Ok(params)
    }

    /// # Overview
    ///
    /// Restricts feedback to literals near the inclusion boundary.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidThreshold`] for `0`, which leaves no literal
    /// trainable.
    pub fn with_threshold(mut self, threshold: u16) -> Result<Self> {
        self.threshold = Some(threshold);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.t <= 0 {
            return Err(Error::InvalidMargin);
        }
        if self.s.is_nan() || self.s <= 1.0 {
            return Err(Error::InvalidSpecificity);
        }
        if self.threshold == Some(0) {
            return Err(Error::InvalidThreshold);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_with_defaults() {
        let config = Config::builder()
            .clauses(20)
            .features(4)
            .classes(3)
            .build()
            .unwrap();

        assert_eq!(config.n_clauses, 20);
        assert_eq!(config.n_features, 4);
        assert_eq!(config.n_classes, 3);
        assert_eq!(config.n_states, 100);
        assert_eq!(config.half_clauses(), 10);
    }

    #[test]
    fn builder_rejects_odd_clauses() {
        let result = Config::builder().clauses(21).features(4).classes(2).build();

        assert_eq!(result, Err(Error::OddClauses));
    }

    #[test]
    fn builder_rejects_odd_states() {
        let result = Config::builder()
            .clauses(20)
            .features(4)
            .classes(2)
            .states(99)
            .build();

        assert_eq!(result, Err(Error::OddStates));
    }

    #[test]
    fn builder_requires_classes() {
        let result = Config::builder().clauses(20).features(4).build();

        assert_eq!(result, Err(Error::MissingClasses));
    }

    #[test]
    fn builder_rejects_tiny_states() {
        let result = Config::builder()
            .clauses(2)
            .features(1)
            .classes(1)
            .states(0)
            .build();

        assert_eq!(result, Err(Error::InvalidStates));
    }

    #[test]
    fn params_validation() {
        assert_eq!(TrainParams::new(0, 3.0), Err(Error::InvalidMargin));
        assert_eq!(TrainParams::new(10, 1.0), Err(Error::InvalidSpecificity));
        assert_eq!(TrainParams::new(10, f64::NAN), Err(Error::InvalidSpecificity));
        assert!(TrainParams::new(10, 1.5).is_ok());
    }

    #[test]
    fn threshold_must_be_positive() {
        let params = TrainParams::new(10, 3.0).unwrap();

        assert_eq!(params.with_threshold(0), Err(Error::InvalidThreshold));
        assert_eq!(params.with_threshold(3).unwrap().threshold, Some(3));

        let mut raw = params;
        raw.threshold = Some(0);
        assert_eq!(raw.validate(), Err(Error::InvalidThreshold));
    }
}
