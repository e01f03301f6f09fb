//! Population counts per severity state.

use serde::Serialize;

use crate::error::MarkovError;
use crate::state::{N_STATES, SeverityState};

/// A dense vector of population counts indexed by [`SeverityState`].
///
/// Counts are real-valued because a Markov step spreads whole people
/// fractionally across states.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StateDistribution {
    counts: [f64; N_STATES],
}

impl StateDistribution {
    /// Builds a distribution from raw counts in [`SeverityState::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::InvalidCount`] if any count is negative or
    /// non-finite.
    pub fn new(counts: [f64; N_STATES]) -> Result<Self, MarkovError> {
        for state in SeverityState::ALL {
            let value = counts[state.as_index()];
            if !value.is_finite() || value < 0.0 {
                return Err(MarkovError::InvalidCount {
                    state: state.name().to_string(),
                    value,
                });
            }
        }
        Ok(Self { counts })
    }

    /// Builds a distribution from whole-person counts.
    pub fn from_counts(counts: [u64; N_STATES]) -> Self {
        Self {
            counts: counts.map(|c| c as f64),
        }
    }

    /// Puts an entire population in the healthy state.
    pub fn all_healthy(total: u64) -> Self {
        let mut counts = [0.0; N_STATES];
        counts[SeverityState::Healthy.as_index()] = total as f64;
        Self { counts }
    }

    pub(crate) fn from_raw(counts: [f64; N_STATES]) -> Self {
        Self { counts }
    }

    /// Returns the count for one state.
    pub fn get(&self, state: SeverityState) -> f64 {
        self.counts[state.as_index()]
    }

    /// Returns all counts in index order.
    pub fn counts(&self) -> &[f64; N_STATES] {
        &self.counts
    }

    /// Sum over all states.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Sum over the non-healthy states.
    pub fn affected_total(&self) -> f64 {
        SeverityState::AFFECTED.iter().map(|&s| self.get(s)).sum()
    }

    /// Moves a fraction of the healthy population into the mild state.
    ///
    /// Models new onset ahead of progression; the total is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::InvalidRate`] unless `rate` is in `[0, 1]`.
    pub fn apply_onset(&mut self, rate: f64) -> Result<(), MarkovError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(MarkovError::InvalidRate { value: rate });
        }
        let new_cases = self.get(SeverityState::Healthy) * rate;
        self.counts[SeverityState::Healthy.as_index()] -= new_cases;
        self.counts[SeverityState::Mild.as_index()] += new_cases;
        Ok(())
    }
}
