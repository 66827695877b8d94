//! # Tsetlin Machine
//!
//! Multi-class Tsetlin Machine trained with pairwise stochastic feedback.
//!
//! Each class owns an even number of clauses, half voting for it and half
//! against it. A clause is a conjunction of literals whose membership is
//! decided by two-action automata; clauses cache the indices of their
//! included literals so evaluation never scans every automaton.
//!
//! Training touches two classes per example: the target class and one
//! class drawn at random from the rest.
//!
//! # Features
//!
//! - `std` (default): Standard library support and entropy-seeded RNG
//!
//! # Examples
//!
//! ```
//! use tsetlin_pairwise::{Config, TrainParams, TsetlinMachine, utils::rng_from_seed};
//!
//! let config = Config::builder()
//!     .features(2)
//!     .classes(2)
//!     .clauses(20)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = rng_from_seed(42);
//! let mut tm = TsetlinMachine::new(config, &mut rng).unwrap();
//!
//! let x = vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]];
//! let y = vec![0, 1, 1, 0];
//! let params = TrainParams::new(10, 3.9).unwrap();
//!
//! tm.fit(&x, &y, &params, 200, &mut rng);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod automaton;
mod clause;
mod config;
pub mod error;
pub mod feedback;
mod index_set;
mod machine;
mod rule;
mod training;
pub mod utils;

pub use automaton::Automaton;
pub use clause::{Clause, Literal};
pub use config::{Config, ConfigBuilder, TrainParams};
pub use error::{Error, Result};
pub use feedback::{Feedback, FeedbackCounters};
pub use index_set::IndexSet;
pub use machine::{Polarity, TsetlinMachine};
pub use rule::Rule;
pub use training::{EpochStats, FitOptions, FitResult, Plateau, ProgressCallback};
