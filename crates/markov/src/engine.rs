//! Deterministic evolution of a state distribution.

use tracing::trace;

use crate::distribution::StateDistribution;
use crate::state::N_STATES;
use crate::transition::TransitionMatrix;

/// Advances a distribution by one step: `out[j] = Σ_i dist[i] * P[i][j]`.
///
/// For a nonnegative distribution the result is nonnegative and keeps the
/// same total, up to floating-point rounding.
pub fn step(distribution: &StateDistribution, matrix: &TransitionMatrix) -> StateDistribution {
    let counts = distribution.counts();
    let probs = matrix.probs();
    let mut out = [0.0; N_STATES];
    for (i, &count) in counts.iter().enumerate() {
        for (j, slot) in out.iter_mut().enumerate() {
            *slot += count * probs[i][j];
        }
    }
    StateDistribution::from_raw(out)
}

/// Applies [`step`] `steps` times. Zero steps returns the input unchanged.
pub fn advance(
    distribution: &StateDistribution,
    matrix: &TransitionMatrix,
    steps: usize,
) -> StateDistribution {
    let mut current = *distribution;
    for s in 0..steps {
        current = step(&current, matrix);
        trace!(step = s + 1, counts = ?current.counts(), "advanced distribution");
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SeverityState;
    use approx::assert_abs_diff_eq;

    fn two_state() -> TransitionMatrix {
        // Only Healthy and Mild interact; the other states are absorbing.
        TransitionMatrix::new([
            [0.5, 0.5, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn two_state_one_step() {
        let v = StateDistribution::from_counts([100, 0, 0, 0]);
        let out = step(&v, &two_state());
        assert_abs_diff_eq!(out.get(SeverityState::Healthy), 50.0);
        assert_abs_diff_eq!(out.get(SeverityState::Mild), 50.0);
    }

    #[test]
    fn two_state_two_steps() {
        let v = StateDistribution::from_counts([100, 0, 0, 0]);
        let out = advance(&v, &two_state(), 2);
        assert_abs_diff_eq!(out.get(SeverityState::Healthy), 25.0);
        assert_abs_diff_eq!(out.get(SeverityState::Mild), 75.0);
    }

    #[test]
    fn zero_steps_is_identity() {
        let v = StateDistribution::from_counts([10, 20, 30, 40]);
        assert_eq!(advance(&v, &two_state(), 0), v);
    }

    #[test]
    fn identity_matrix_preserves_distribution() {
        let v = StateDistribution::new([812.5, 91.0, 77.25, 19.0]).unwrap();
        assert_eq!(advance(&v, &TransitionMatrix::identity(), 5), v);
    }

    #[test]
    fn step_conserves_total() {
        let m = TransitionMatrix::new([
            [0.95, 0.03, 0.01, 0.01],
            [0.00, 0.85, 0.10, 0.05],
            [0.00, 0.00, 0.80, 0.20],
            [0.10, 0.20, 0.20, 0.50],
        ])
        .unwrap();
        let v = StateDistribution::new([800.0, 100.0, 80.0, 20.0]).unwrap();
        let out = step(&v, &m);
        assert_abs_diff_eq!(out.total(), v.total(), epsilon = 1e-9);
        assert!(out.counts().iter().all(|&c| c >= 0.0));
    }
}
