//! Discrete daily simulation of a care waiting list.
//!
//! A daily-step approximation, not an exact M/M/c solution: each day the
//! backlog is served up to that day's capacity, Poisson arrivals join, and a
//! waiting-time estimate is read off the backlog.
//!
//! # Quick start
//!
//! ```rust
//! use carecast_queue::{QueueConfig, QueueMetrics, ScriptedArrivals, simulate_queue};
//!
//! let config = QueueConfig::new()
//!     .with_horizon_days(7)
//!     .with_num_servers(1)
//!     .with_service_rate_per_server(10.0);
//! let mut arrivals = ScriptedArrivals::new(vec![5, 3]);
//!
//! let trace = simulate_queue(&config, 4.0, 1.0, &mut arrivals).unwrap();
//! let metrics = QueueMetrics::from_trace(&trace);
//! assert_eq!(metrics.max_queue_length, 5);
//! ```

mod arrivals;
mod error;
mod metrics;
mod schedule;
mod simulate;

pub use arrivals::{ArrivalSource, MAX_ARRIVAL_RATE, RngArrivals, ScriptedArrivals};
pub use error::QueueError;
pub use metrics::{QueueMetrics, RatioEstimate};
pub use schedule::{CapacitySchedule, DAYS_PER_WEEK};
pub use simulate::{DayRecord, QueueConfig, QueueTrace, simulate_queue};
