//! Error types for the carecast-markov crate.

/// Error type for all fallible operations in the carecast-markov crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkovError {
    /// Returned when a transition matrix is not row-stochastic.
    #[error("invalid transition matrix: {reason}")]
    InvalidMatrix {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a distribution entry is negative or non-finite.
    #[error("invalid count for {state}: {value} (must be finite and >= 0)")]
    InvalidCount {
        /// Name of the offending state.
        state: String,
        /// The invalid value.
        value: f64,
    },

    /// Returned when a rate lies outside [0, 1].
    #[error("invalid rate: {value} (must be in [0, 1])")]
    InvalidRate {
        /// The invalid value.
        value: f64,
    },

    /// Returned when the baseline scenario has no matrix.
    #[error("baseline scenario {name:?} has no transition matrix")]
    MissingBaseline {
        /// Name of the baseline scenario.
        name: String,
    },
}
