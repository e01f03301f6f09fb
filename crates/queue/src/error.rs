//! Error types for the carecast-queue crate.

/// Error type for all fallible operations in the carecast-queue crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueueError {
    /// Returned when the simulation horizon is zero days.
    #[error("horizon must be at least one day")]
    EmptyHorizon,

    /// Returned when the first weekday is outside 0..=6.
    #[error("invalid first weekday: {weekday} (must be 0..=6, Monday = 0)")]
    InvalidWeekday {
        /// The invalid weekday index.
        weekday: u8,
    },

    /// Returned when a rate or capacity parameter is negative or non-finite.
    #[error("invalid {name}: {value} (must be finite and >= 0)")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
}
