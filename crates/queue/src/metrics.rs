//! Summary metrics over a queue trace.

use serde::Serialize;

use crate::simulate::{DayRecord, QueueTrace};

/// Averages and peak of a simulated queue.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QueueMetrics {
    /// Mean of the daily waiting-time estimates, in days.
    pub average_waiting_time: f64,
    /// Mean end-of-day backlog.
    pub average_queue_length: f64,
    /// Largest end-of-day backlog.
    pub max_queue_length: u64,
}

impl QueueMetrics {
    /// Reduces day records to summary metrics. All zero for an empty slice.
    pub fn from_records(days: &[DayRecord]) -> Self {
        if days.is_empty() {
            return Self::default();
        }
        let n = days.len() as f64;
        let total_wait: f64 = days.iter().map(|d| d.waiting_time).sum();
        let total_queue: f64 = days.iter().map(|d| d.queue_length as f64).sum();
        let max_queue_length = days.iter().map(|d| d.queue_length).max().unwrap_or(0);
        Self {
            average_waiting_time: total_wait / n,
            average_queue_length: total_queue / n,
            max_queue_length,
        }
    }

    /// Reduces a full trace.
    pub fn from_trace(trace: &QueueTrace) -> Self {
        Self::from_records(trace.days())
    }
}

/// Steady-state load estimate from total demand and total resources.
///
/// A closed-form check on the day-by-day simulation: no weekends, no
/// arrivals process, just the ratio of cases to care units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioEstimate {
    /// `demand / resources`. `None` (serialized as `null`) when there are no
    /// resources and the wait is unbounded.
    pub waiting_time: Option<f64>,
    /// Demand not covered by resources, floored at 0.
    pub waiting_list_length: f64,
}

impl RatioEstimate {
    /// Computes the estimate for `demand` cases against `resources` units.
    pub fn new(demand: f64, resources: f64) -> Self {
        let waiting_time = if resources > 0.0 {
            Some(demand / resources)
        } else {
            None
        };
        Self {
            waiting_time,
            waiting_list_length: (demand - resources).max(0.0),
        }
    }

    /// Whether the wait is unbounded because no resources exist.
    pub fn is_unbounded(&self) -> bool {
        self.waiting_time.is_none()
    }
}
