//! Splitting case counts into allocated care resources.

use std::collections::BTreeMap;

use carecast_markov::{SeverityState, StateDistribution};

use crate::error::CareError;

/// Proportion of care resources assigned to each affected severity state.
///
/// The table may be partial and its proportions need not sum to 1: callers
/// can deliberately under- or over-allocate. Nothing is normalised, so an
/// allocation computed from it is not necessarily a partition of the cases.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceAllocation {
    proportions: BTreeMap<SeverityState, f64>,
}

impl ResourceAllocation {
    /// Builds an allocation table.
    ///
    /// # Errors
    ///
    /// Returns [`CareError::HealthyAllocation`] if the table names
    /// [`SeverityState::Healthy`], or [`CareError::InvalidProportion`] if a
    /// proportion is outside `[0, 1]`.
    pub fn new(
        proportions: impl IntoIterator<Item = (SeverityState, f64)>,
    ) -> Result<Self, CareError> {
        let proportions: BTreeMap<SeverityState, f64> = proportions.into_iter().collect();
        for (&state, &value) in &proportions {
            if state == SeverityState::Healthy {
                return Err(CareError::HealthyAllocation);
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(CareError::InvalidProportion {
                    state: state.name().to_string(),
                    value,
                });
            }
        }
        Ok(Self { proportions })
    }

    /// Returns the proportion for `state`, or 0 if the table omits it.
    pub fn get(&self, state: SeverityState) -> f64 {
        self.proportions.get(&state).copied().unwrap_or(0.0)
    }

    /// Sum of all proportions. Not required to be 1.
    pub fn total(&self) -> f64 {
        self.proportions.values().sum()
    }

    /// Iterates `(state, proportion)` pairs in state order.
    pub fn iter(&self) -> impl Iterator<Item = (SeverityState, f64)> + '_ {
        self.proportions.iter().map(|(&s, &p)| (s, p))
    }
}

impl Default for ResourceAllocation {
    /// Mild 0.4, moderate 0.35, severe 0.25.
    fn default() -> Self {
        Self {
            proportions: BTreeMap::from([
                (SeverityState::Mild, 0.4),
                (SeverityState::Moderate, 0.35),
                (SeverityState::Severe, 0.25),
            ]),
        }
    }
}

/// Resource quantities per severity state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocatedResources {
    units: BTreeMap<SeverityState, f64>,
}

impl AllocatedResources {
    /// Returns the units allocated to `state`, or 0 if it was not allocated.
    pub fn get(&self, state: SeverityState) -> f64 {
        self.units.get(&state).copied().unwrap_or(0.0)
    }

    /// Total units across all states.
    pub fn total(&self) -> f64 {
        self.units.values().sum()
    }

    /// Iterates `(state, units)` pairs in state order.
    pub fn iter(&self) -> impl Iterator<Item = (SeverityState, f64)> + '_ {
        self.units.iter().map(|(&s, &u)| (s, u))
    }
}

/// Allocates resources: `units[s] = cases[s] * table[s]` for each state in
/// the table.
pub fn allocate(cases: &StateDistribution, table: &ResourceAllocation) -> AllocatedResources {
    let units = table
        .iter()
        .map(|(state, proportion)| (state, cases.get(state) * proportion))
        .collect();
    AllocatedResources { units }
}
