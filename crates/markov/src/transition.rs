//! Transition matrices and the per-scenario transition table.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::MarkovError;
use crate::state::{N_STATES, SeverityState};

/// Row-sum tolerance accepted when validating a matrix.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Name of the baseline scenario in the standard table.
pub const BASELINE_SCENARIO: &str = "peace";

/// A 4x4 row-stochastic transition matrix.
///
/// Row `i` holds the probabilities of moving from state `i` to each state
/// in one step. A value of this type has always passed [`validate`], so the
/// engine can use it without re-checking.
///
/// [`validate`]: TransitionMatrix::validate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionMatrix {
    probs: [[f64; N_STATES]; N_STATES],
}

impl TransitionMatrix {
    /// Builds a validated transition matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::InvalidMatrix`] if any entry is non-finite or
    /// outside `[0, 1]`, or if a row does not sum to 1 within
    /// [`ROW_SUM_TOLERANCE`].
    pub fn new(probs: [[f64; N_STATES]; N_STATES]) -> Result<Self, MarkovError> {
        let matrix = Self { probs };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Constructs a matrix without validation; callers guarantee the invariant.
    pub(crate) fn from_probs(probs: [[f64; N_STATES]; N_STATES]) -> Self {
        Self { probs }
    }

    /// The identity matrix: nobody changes state.
    pub fn identity() -> Self {
        let mut probs = [[0.0; N_STATES]; N_STATES];
        for (i, row) in probs.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { probs }
    }

    /// Returns the transition probabilities from a given state.
    pub fn row(&self, from: SeverityState) -> &[f64; N_STATES] {
        &self.probs[from.as_index()]
    }

    /// Returns the probability of transitioning from one state to another.
    pub fn prob(&self, from: SeverityState, to: SeverityState) -> f64 {
        self.probs[from.as_index()][to.as_index()]
    }

    /// Returns the full probability matrix.
    pub fn probs(&self) -> &[[f64; N_STATES]; N_STATES] {
        &self.probs
    }

    /// Validates that the matrix is row-stochastic.
    pub fn validate(&self) -> Result<(), MarkovError> {
        for (i, row) in self.probs.iter().enumerate() {
            let mut sum = 0.0;
            for (j, &p) in row.iter().enumerate() {
                if !p.is_finite() {
                    return Err(MarkovError::InvalidMatrix {
                        reason: format!("probs[{i}][{j}] is not finite: {p}"),
                    });
                }
                if !(0.0..=1.0).contains(&p) {
                    return Err(MarkovError::InvalidMatrix {
                        reason: format!("probs[{i}][{j}] = {p} is outside [0, 1]"),
                    });
                }
                sum += p;
            }
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(MarkovError::InvalidMatrix {
                    reason: format!("row {i} sums to {sum}, expected ~1.0"),
                });
            }
        }
        Ok(())
    }
}

/// One transition matrix per named scenario, plus a baseline.
///
/// Built once when configuration is loaded and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    matrices: BTreeMap<String, TransitionMatrix>,
    baseline: String,
}

impl TransitionTable {
    /// Builds a table from named matrices.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::MissingBaseline`] if `baseline` is not one of
    /// the named matrices.
    pub fn new(
        matrices: BTreeMap<String, TransitionMatrix>,
        baseline: impl Into<String>,
    ) -> Result<Self, MarkovError> {
        let baseline = baseline.into();
        if !matrices.contains_key(&baseline) {
            return Err(MarkovError::MissingBaseline { name: baseline });
        }
        Ok(Self { matrices, baseline })
    }

    /// The standard `peace` and `crisis` tables.
    pub fn standard() -> Self {
        let peace = TransitionMatrix::from_probs([
            [0.95, 0.03, 0.01, 0.01],
            [0.00, 0.85, 0.10, 0.05],
            [0.00, 0.00, 0.80, 0.20],
            [0.10, 0.20, 0.20, 0.50],
        ]);
        let crisis = TransitionMatrix::from_probs([
            [0.85, 0.10, 0.05, 0.00],
            [0.00, 0.75, 0.15, 0.10],
            [0.00, 0.00, 0.70, 0.30],
            [0.10, 0.20, 0.20, 0.50],
        ]);
        let mut matrices = BTreeMap::new();
        matrices.insert(BASELINE_SCENARIO.to_string(), peace);
        matrices.insert("crisis".to_string(), crisis);
        Self {
            matrices,
            baseline: BASELINE_SCENARIO.to_string(),
        }
    }

    /// Returns the matrix for an exact scenario name.
    pub fn get(&self, scenario: &str) -> Option<&TransitionMatrix> {
        self.matrices.get(scenario)
    }

    /// Returns the name of the matrix that `scenario` resolves to.
    pub fn resolve_name<'a>(&'a self, scenario: &'a str) -> &'a str {
        if self.matrices.contains_key(scenario) {
            scenario
        } else {
            &self.baseline
        }
    }

    /// Returns the matrix for `scenario`, falling back to the baseline.
    pub fn resolve(&self, scenario: &str) -> &TransitionMatrix {
        match self.matrices.get(scenario) {
            Some(m) => m,
            None => {
                debug!(scenario, baseline = %self.baseline, "no matrix for scenario, using baseline");
                &self.matrices[&self.baseline]
            }
        }
    }

    /// Returns the baseline scenario name.
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Iterates scenario names in sorted order.
    pub fn scenarios(&self) -> impl Iterator<Item = &str> {
        self.matrices.keys().map(String::as_str)
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: [[f64; 4]; 4] = [
        [0.7, 0.1, 0.1, 0.1],
        [0.0, 0.5, 0.3, 0.2],
        [0.0, 0.0, 0.6, 0.4],
        [0.25, 0.25, 0.25, 0.25],
    ];

    #[test]
    fn validate_ok() {
        assert!(TransitionMatrix::new(VALID).is_ok());
    }

    #[test]
    fn standard_tables_are_row_stochastic() {
        let table = TransitionTable::standard();
        for name in table.scenarios() {
            let m = table.get(name).unwrap();
            assert!(m.validate().is_ok(), "{name} is not row-stochastic");
        }
    }

    #[test]
    fn validate_bad_sum() {
        let mut probs = VALID;
        probs[2] = [0.0, 0.0, 0.6, 0.5];
        let err = TransitionMatrix::new(probs).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn validate_out_of_range() {
        let mut probs = VALID;
        probs[0] = [1.2, -0.2, 0.0, 0.0];
        assert!(TransitionMatrix::new(probs).is_err());
    }

    #[test]
    fn validate_nan() {
        let mut probs = VALID;
        probs[3][0] = f64::NAN;
        assert!(TransitionMatrix::new(probs).is_err());
    }

    #[test]
    fn validate_within_tolerance() {
        let mut probs = VALID;
        probs[0] = [0.7, 0.1, 0.1, 0.1 + 5e-7];
        assert!(TransitionMatrix::new(probs).is_ok());
    }

    #[test]
    fn row_and_prob_access() {
        let m = TransitionMatrix::new(VALID).unwrap();
        assert_eq!(m.row(SeverityState::Mild), &[0.0, 0.5, 0.3, 0.2]);
        assert!((m.prob(SeverityState::Moderate, SeverityState::Severe) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn table_requires_baseline() {
        let mut matrices = BTreeMap::new();
        matrices.insert("crisis".to_string(), TransitionMatrix::identity());
        let err = TransitionTable::new(matrices, "peace").unwrap_err();
        assert!(matches!(err, MarkovError::MissingBaseline { .. }));
    }

    #[test]
    fn unknown_scenario_resolves_to_baseline() {
        let table = TransitionTable::standard();
        let peace = *table.get("peace").unwrap();
        assert_eq!(*table.resolve("pandemic"), peace);
        assert_eq!(table.resolve_name("pandemic"), "peace");
        assert_eq!(table.resolve_name("crisis"), "crisis");
    }

    #[test]
    fn scenarios_sorted() {
        let table = TransitionTable::standard();
        let names: Vec<&str> = table.scenarios().collect();
        assert_eq!(names, vec!["crisis", "peace"]);
    }
}
