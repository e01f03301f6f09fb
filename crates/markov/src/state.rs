//! Severity states for the population Markov chain.

use serde::Serialize;

/// Number of severity states.
pub const N_STATES: usize = 4;

/// Four-state mental-health severity classification.
///
/// Every member of the population occupies exactly one state at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SeverityState {
    /// No current condition.
    Healthy = 0,
    /// Mild symptoms.
    Mild = 1,
    /// Moderate symptoms.
    Moderate = 2,
    /// Severe symptoms.
    Severe = 3,
}

impl SeverityState {
    /// All four states in index order.
    pub const ALL: [SeverityState; N_STATES] =
        [Self::Healthy, Self::Mild, Self::Moderate, Self::Severe];

    /// The states that consume care resources, in index order.
    pub const AFFECTED: [SeverityState; 3] = [Self::Mild, Self::Moderate, Self::Severe];

    /// Returns the zero-based index of this state (matches the `#[repr(u8)]` discriminant).
    pub fn as_index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl std::fmt::Display for SeverityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_index_values() {
        assert_eq!(SeverityState::Healthy.as_index(), 0);
        assert_eq!(SeverityState::Mild.as_index(), 1);
        assert_eq!(SeverityState::Moderate.as_index(), 2);
        assert_eq!(SeverityState::Severe.as_index(), 3);
    }

    #[test]
    fn all_ordering() {
        for (i, s) in SeverityState::ALL.iter().enumerate() {
            assert_eq!(s.as_index(), i);
        }
        assert!(!SeverityState::AFFECTED.contains(&SeverityState::Healthy));
    }

    #[test]
    fn display_uses_config_name() {
        assert_eq!(SeverityState::Moderate.to_string(), "moderate");
    }
}
