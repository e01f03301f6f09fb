//! Final output record of a simulation run.

use std::fmt;

use carecast_markov::StateDistribution;
use carecast_queue::RatioEstimate;
use serde::Serialize;

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Scenario name requested by the caller.
    pub scenario: String,
    /// Scenario whose transition matrix was used.
    pub transition_scenario: String,
    /// Crisis-adjusted mean daily arrivals.
    pub arrival_rate: f64,
    /// Service capacity on an open day, before flooring to whole people.
    pub daily_capacity: f64,
    /// Mean daily waiting-time estimate, in days.
    pub average_waiting_time: f64,
    /// Mean end-of-day backlog.
    pub average_queue_length: f64,
    /// Largest end-of-day backlog.
    pub max_queue_length: u64,
    /// People in the severe state after progression.
    pub severe_cases: f64,
    /// Expected relapse cases.
    pub relapse_cases: f64,
    /// Closed-form demand-over-resources estimate.
    pub ratio: RatioEstimate,
    /// Evolved state distribution.
    pub distribution: StateDistribution,
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scenario:             {}", self.scenario)?;
        writeln!(f, "average waiting time: {:.2} days", self.average_waiting_time)?;
        writeln!(f, "average queue length: {:.0}", self.average_queue_length)?;
        writeln!(f, "max queue length:     {}", self.max_queue_length)?;
        writeln!(f, "severe cases:         {:.0}", self.severe_cases)?;
        writeln!(f, "relapse cases:        {:.0}", self.relapse_cases)?;
        match self.ratio.waiting_time {
            Some(w) => writeln!(f, "ratio waiting time:   {w:.2}")?,
            None => writeln!(f, "ratio waiting time:   unbounded")?,
        }
        write!(f, "ratio waiting list:   {:.0}", self.ratio.waiting_list_length)
    }
}
