//! Scenario simulation of mental-health service demand.
//!
//! Composes the workspace crates into one run:
//!
//! ```text
//!  params ──▶ crisis adjust ──▶ markov advance ──▶ allocate ──▶ queue ──▶ result
//!               (λ)              (case mix)        (capacity)   (trace)
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use carecast_sim::{InitialPopulation, ModelConfig, SimulationParams, run_seeded};
//!
//! let config = ModelConfig::new();
//! let params = SimulationParams::new(InitialPopulation::default())
//!     .with_scenario("crisis")
//!     .with_horizon_days(30);
//!
//! let result = run_seeded(&config, &params, 42).unwrap();
//! assert!(result.severe_cases > 0.0);
//! ```

mod config;
mod demand;
mod error;
mod orchestrate;
mod params;
mod result;

pub use config::ModelConfig;
pub use demand::{DAYS_PER_YEAR, base_arrival_rate, project_population};
pub use error::SimError;
pub use orchestrate::{run_all_scenarios, run_seeded, run_simulation};
pub use params::{InitialPopulation, SimulationParams};
pub use result::SimulationResult;

// Re-export the component types callers need to build configurations.
pub use carecast_care::{RelapseModel, ResourceAllocation};
pub use carecast_crisis::{CrisisAdjuster, FactorMode};
pub use carecast_markov::{SeverityState, StateDistribution, TransitionMatrix, TransitionTable};
pub use carecast_queue::{ArrivalSource, QueueConfig, RatioEstimate, RngArrivals, ScriptedArrivals};
