//! Error types for the carecast-crisis crate.

/// Error type for all fallible operations in the carecast-crisis crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CrisisError {
    /// Returned when a stressor factor is negative or non-finite.
    #[error("invalid crisis factor for {scenario:?}: {value} (must be finite and >= 0)")]
    InvalidFactor {
        /// Name of the stressor.
        scenario: String,
        /// The invalid value.
        value: f64,
    },

    /// Returned when a name is both a stressor and an aggregate label.
    #[error("scenario {scenario:?} cannot be both a stressor and an aggregate label")]
    AmbiguousScenario {
        /// The conflicting name.
        scenario: String,
    },
}
