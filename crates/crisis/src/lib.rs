//! Crisis-scenario adjustment of incidence and arrival rates.
//!
//! A scenario inflates a base rate multiplicatively:
//! `adjusted = base * (1 + factor)`. See [`CrisisAdjuster`] for how a
//! scenario name maps to its factor.

mod adjuster;
mod error;

pub use adjuster::{AGGREGATE_CRISIS, CrisisAdjuster, FactorMode};
pub use error::CrisisError;
