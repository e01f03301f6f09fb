//! Error types for the carecast-sim crate.

use carecast_care::CareError;
use carecast_crisis::CrisisError;
use carecast_markov::MarkovError;
use carecast_queue::QueueError;

/// Error type for all fallible operations in the carecast-sim crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimError {
    /// Returned when run inputs fail validation; nothing has been simulated.
    #[error("invalid simulation parameters: {reason}")]
    InvalidParams {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the model configuration is inconsistent.
    #[error("invalid model configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Error from the Markov chain.
    #[error(transparent)]
    Markov(#[from] MarkovError),

    /// Error from the crisis adjuster.
    #[error(transparent)]
    Crisis(#[from] CrisisError),

    /// Error from the care-pathway models.
    #[error(transparent)]
    Care(#[from] CareError),

    /// Error from the queue simulation.
    #[error(transparent)]
    Queue(#[from] QueueError),
}
