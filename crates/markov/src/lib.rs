//! Four-state Markov chain for population severity.
//!
//! This crate advances a population distribution across the
//! healthy/mild/moderate/severe states using a scenario-specific,
//! row-stochastic transition matrix.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │ distribution │────▶│  onset         │────▶│  advance         │
//!  │ (counts)     │     │  (healthy→mild)│     │  (P applied k×)  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use carecast_markov::{SeverityState, StateDistribution, TransitionTable, advance};
//!
//! let table = TransitionTable::standard();
//! let start = StateDistribution::from_counts([800_000, 100_000, 80_000, 20_000]);
//! let evolved = advance(&start, table.resolve("crisis"), 1);
//!
//! assert!((evolved.total() - start.total()).abs() < 1e-6);
//! assert!(evolved.get(SeverityState::Severe) > 0.0);
//! ```

pub mod distribution;
pub mod engine;
pub mod error;
pub mod state;
pub mod transition;

pub use distribution::StateDistribution;
pub use engine::{advance, step};
pub use error::MarkovError;
pub use state::{N_STATES, SeverityState};
pub use transition::{BASELINE_SCENARIO, ROW_SUM_TOLERANCE, TransitionMatrix, TransitionTable};
