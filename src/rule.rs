//! Rule extraction for interpretability.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{Clause, Polarity};

/// # Overview
///
/// A human-readable rule extracted from a clause.
///
/// Represents a conjunction: `(x[i1] AND x[i2] AND NOT x[j1] AND NOT x[j2])`
/// voting for (`+`) or against (`-`) its class.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::{Clause, Polarity, Rule, utils::rng_from_seed};
///
/// let mut rng = rng_from_seed(42);
/// let mut clause = Clause::new(4, 50, &mut rng).unwrap();
/// clause.set_state(&[30, 1, 1, 1, 1, 1, 40, 1], None);
///
/// let rule = Rule::from_clause(&clause, Polarity::Positive);
/// assert_eq!(rule.included, vec![0]);
/// assert_eq!(rule.negated, vec![2]);
/// assert_eq!(rule.to_string(), "+ (x[0] AND NOT x[2])");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub included: Vec<usize>,
    pub negated:  Vec<usize>,
    pub polarity: Polarity
}

impl Rule {
    /// # Overview
    ///
    /// Extracts rule from a clause, literals sorted by feature index.
    pub fn from_clause(clause: &Clause, polarity: Polarity) -> Self {
        let mut included: Vec<usize> = clause.included_positive().iter().collect();
        let mut negated: Vec<usize> = clause.included_negative().iter().collect();
        included.sort_unstable();
        negated.sort_unstable();

        Self {
            included,
            negated,
            polarity
        }
    }

    /// # Overview
    ///
    /// Returns true if rule has no active literals (matches everything).
    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.negated.is_empty()
    }

    /// # Overview
    ///
    /// Returns number of active literals.
    pub fn complexity(&self) -> usize {
        self.included.len() + self.negated.len()
    }

    /// Evaluates the rule on binary input.
    pub fn matches(&self, x: &[u8]) -> bool {
        self.included.iter().all(|&k| x[k] != 0) && self.negated.iter().all(|&k| x[k] == 0)
    }
}

impl core::fmt::Display for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = match self.polarity {
            Polarity::Positive => "+",
            Polarity::Negative => "-"
        };
        if self.is_empty() {
            return write!(f, "{sign} TRUE");
        }

        write!(f, "{sign} (")?;
        let literals = self
            .included
            .iter()
            .map(|&k| (k, ""))
            .chain(self.negated.iter().map(|&k| (k, "NOT ")));
        for (n, (k, prefix)) in literals.enumerate() {
            if n > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{prefix}x[{k}]")?;
        }
        write!(f, ")")
    }
}
