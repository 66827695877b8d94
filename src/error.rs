//! Error types for Tsetlin Machine.

/// # Overview
///
/// Errors that can occur when configuring, building or fitting a Tsetlin
/// Machine.
///
/// Runtime misuse of an already built machine (wrong feature width, label
/// out of range) is a programming error and panics instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("n_clauses is required")]
    MissingClauses,
    #[error("n_features is required")]
    MissingFeatures,
    #[error("n_classes is required")]
    MissingClasses,
    #[error("n_clauses must be even")]
    OddClauses,
    #[error("n_states must be even")]
    OddStates,
    #[error("n_states must be at least 2")]
    InvalidStates,
    #[error("s must be > 1.0")]
    InvalidSpecificity,
    #[error("margin T must be > 0")]
    InvalidMargin,
    #[error("threshold must be > 0")]
    InvalidThreshold,
    #[error("dataset cannot be empty")]
    EmptyDataset,
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("label {label} out of range for {n_classes} classes")]
    LabelOutOfRange { label: usize, n_classes: usize },
    #[error("could not allocate {what}")]
    Allocation { what: &'static str }
}

/// # Overview
///
/// Result type for Tsetlin Machine operations.
pub type Result<T> = core::result::Result<T, Error>;
