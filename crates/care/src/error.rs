//! Error types for the carecast-care crate.

/// Error type for all fallible operations in the carecast-care crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CareError {
    /// Returned when an allocation proportion is outside [0, 1].
    #[error("invalid allocation proportion for {state}: {value} (must be in [0, 1])")]
    InvalidProportion {
        /// Name of the severity state.
        state: String,
        /// The invalid value.
        value: f64,
    },

    /// Returned when the allocation table names the healthy state.
    #[error("allocation table cannot include the healthy state")]
    HealthyAllocation,

    /// Returned when a relapse-model constant is negative or non-finite.
    #[error("invalid relapse parameter {name}: {value} (must be finite and >= 0)")]
    InvalidRelapseParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_proportion() {
        let e = CareError::InvalidProportion {
            state: "severe".to_string(),
            value: 1.25,
        };
        assert_eq!(
            e.to_string(),
            "invalid allocation proportion for severe: 1.25 (must be in [0, 1])"
        );
    }

    #[test]
    fn error_healthy_allocation() {
        assert_eq!(
            CareError::HealthyAllocation.to_string(),
            "allocation table cannot include the healthy state"
        );
    }

    #[test]
    fn error_invalid_relapse_parameter() {
        let e = CareError::InvalidRelapseParameter {
            name: "decay_constant",
            value: f64::NAN,
        };
        assert_eq!(
            e.to_string(),
            "invalid relapse parameter decay_constant: NaN (must be finite and >= 0)"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CareError>();
    }
}
