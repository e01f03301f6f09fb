//! Time-decaying relapse load.

use crate::error::CareError;

/// Expected relapses as an exponentially decaying share of current cases.
///
/// `relapse(total, t) = base_rate * exp(-decay * t) * total`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelapseModel {
    base_rate: f64,
    decay: f64,
}

impl RelapseModel {
    /// Creates a relapse model.
    ///
    /// # Errors
    ///
    /// Returns [`CareError::InvalidRelapseParameter`] if either constant is
    /// negative or non-finite.
    pub fn new(base_rate: f64, decay: f64) -> Result<Self, CareError> {
        for (name, value) in [("base_decay_rate", base_rate), ("decay_constant", decay)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CareError::InvalidRelapseParameter { name, value });
            }
        }
        Ok(Self { base_rate, decay })
    }

    /// Returns the relapse rate at `t = 0`.
    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    /// Returns the exponential decay constant.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Relapse rate at elapsed time `t`.
    pub fn rate_at(&self, t: f64) -> f64 {
        self.base_rate * (-self.decay * t).exp()
    }

    /// Expected relapse cases among `cases_total` at elapsed time `t`.
    pub fn relapse(&self, cases_total: f64, t: f64) -> f64 {
        self.rate_at(t) * cases_total
    }
}

impl Default for RelapseModel {
    /// `base_rate = 0.1`, `decay = 0.05`.
    fn default() -> Self {
        Self {
            base_rate: 0.1,
            decay: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn at_time_zero() {
        let m = RelapseModel::default();
        assert_eq!(m.relapse(170.0, 0.0), 17.0);
    }

    #[test]
    fn one_step_decay() {
        let m = RelapseModel::default();
        assert_relative_eq!(m.relapse(1000.0, 1.0), 100.0 * (-0.05f64).exp());
    }

    #[test]
    fn monotonically_decreasing() {
        let m = RelapseModel::default();
        let mut prev = m.relapse(500.0, 0.0);
        for t in 1..50 {
            let r = m.relapse(500.0, t as f64);
            assert!(r < prev, "relapse must decrease: t={t}, {r} >= {prev}");
            prev = r;
        }
    }

    #[test]
    fn zero_decay_is_constant() {
        let m = RelapseModel::new(0.2, 0.0).unwrap();
        assert_relative_eq!(m.relapse(50.0, 30.0), 10.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(RelapseModel::new(-0.1, 0.05).is_err());
        assert!(RelapseModel::new(0.1, f64::NAN).is_err());
        assert!(matches!(
            RelapseModel::new(0.1, -1.0),
            Err(CareError::InvalidRelapseParameter {
                name: "decay_constant",
                ..
            })
        ));
    }
}
