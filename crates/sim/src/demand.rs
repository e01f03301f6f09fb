//! Population projection and the base daily arrival rate.

/// Days per year used to spread annual rates over days.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Compound daily growth: `initial * (1 + annual_rate / 365)^days`.
pub fn project_population(initial: f64, annual_growth_rate: f64, days: u32) -> f64 {
    initial * (1.0 + annual_growth_rate / DAYS_PER_YEAR).powf(f64::from(days))
}

/// Mean daily arrivals when `incidence_rate` of the population seeks care
/// over a year.
pub fn base_arrival_rate(population: f64, incidence_rate: f64) -> f64 {
    population * incidence_rate / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_days_is_identity() {
        assert_eq!(project_population(1_000_000.0, 0.01, 0), 1_000_000.0);
    }

    #[test]
    fn one_day_growth() {
        let p = project_population(1_000_000.0, 0.01, 1);
        assert_relative_eq!(p, 1_000_000.0 * (1.0 + 0.01 / 365.0));
    }

    #[test]
    fn full_year_close_to_annual_rate() {
        let p = project_population(1000.0, 0.01, 365);
        assert_relative_eq!(p, 1010.05, epsilon = 0.01);
    }

    #[test]
    fn long_projection_keeps_growing() {
        let p = project_population(1000.0, 0.01, u32::MAX);
        assert!(p > 1000.0);
        let shrink = project_population(1000.0, -0.5, u32::MAX);
        assert!((0.0..1000.0).contains(&shrink));
    }

    #[test]
    fn arrival_rate_spreads_incidence_over_year() {
        assert_relative_eq!(base_arrival_rate(365_000.0, 0.15), 150.0);
        assert_eq!(base_arrival_rate(0.0, 0.15), 0.0);
    }
}
