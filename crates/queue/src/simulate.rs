//! Day-by-day service queue simulation.

use tracing::debug;

use crate::arrivals::{ArrivalSource, MAX_ARRIVAL_RATE};
use crate::error::QueueError;
use crate::schedule::{CapacitySchedule, DAYS_PER_WEEK};

/// Configuration for the queue simulation.
///
/// # Example
///
/// ```
/// use carecast_queue::QueueConfig;
///
/// let config = QueueConfig::new()
///     .with_horizon_days(90)
///     .with_num_servers(12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueueConfig {
    horizon_days: usize,
    num_servers: u32,
    service_rate_per_server: f64,
    first_weekday: u8,
}

impl QueueConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: 365-day horizon, 38 servers, 10 people per server per day,
    /// horizon starting on a Monday.
    pub fn new() -> Self {
        Self {
            horizon_days: 365,
            num_servers: 38,
            service_rate_per_server: 10.0,
            first_weekday: 0,
        }
    }

    /// Sets the number of simulated days.
    pub fn with_horizon_days(mut self, days: usize) -> Self {
        self.horizon_days = days;
        self
    }

    /// Sets the number of servers.
    pub fn with_num_servers(mut self, n: u32) -> Self {
        self.num_servers = n;
        self
    }

    /// Sets the people served per server per day.
    pub fn with_service_rate_per_server(mut self, rate: f64) -> Self {
        self.service_rate_per_server = rate;
        self
    }

    /// Sets the weekday (Monday = 0) of the first simulated day.
    pub fn with_first_weekday(mut self, weekday: u8) -> Self {
        self.first_weekday = weekday;
        self
    }

    // --- Accessors ---

    /// Returns the number of simulated days.
    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Returns the number of servers.
    pub fn num_servers(&self) -> u32 {
        self.num_servers
    }

    /// Returns the people served per server per day.
    pub fn service_rate_per_server(&self) -> f64 {
        self.service_rate_per_server
    }

    /// Returns the weekday of the first simulated day.
    pub fn first_weekday(&self) -> u8 {
        self.first_weekday
    }

    /// Nominal throughput used to turn a backlog into a waiting time.
    pub fn total_service_rate(&self) -> f64 {
        self.num_servers as f64 * self.service_rate_per_server
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), QueueError> {
        if self.horizon_days == 0 {
            return Err(QueueError::EmptyHorizon);
        }
        if self.first_weekday as usize >= DAYS_PER_WEEK {
            return Err(QueueError::InvalidWeekday {
                weekday: self.first_weekday,
            });
        }
        check_non_negative("service rate", self.service_rate_per_server)
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), QueueError> {
    if !value.is_finite() || value < 0.0 {
        return Err(QueueError::InvalidParameter { name, value });
    }
    Ok(())
}

/// State at the end of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayRecord {
    /// Backlog divided by nominal throughput, in days.
    pub waiting_time: f64,
    /// People still waiting at the end of the day.
    pub queue_length: u64,
}

impl DayRecord {
    /// Creates a day record.
    pub fn new(waiting_time: f64, queue_length: u64) -> Self {
        Self {
            waiting_time,
            queue_length,
        }
    }
}

/// The per-day output of one queue simulation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueTrace {
    days: Vec<DayRecord>,
    total_arrivals: u64,
    total_served: u64,
}

impl QueueTrace {
    /// Builds a trace from day records alone.
    pub fn from_records(days: Vec<DayRecord>) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    /// Returns the day records in order.
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    /// Number of simulated days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns `true` if no days were simulated.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Arrivals over the whole horizon.
    pub fn total_arrivals(&self) -> u64 {
        self.total_arrivals
    }

    /// People served over the whole horizon.
    pub fn total_served(&self) -> u64 {
        self.total_served
    }

    /// Backlog at the end of the horizon.
    pub fn final_queue_length(&self) -> u64 {
        self.days.last().map_or(0, |d| d.queue_length)
    }
}

/// Runs the queue over the configured horizon.
///
/// Each day: capacity is `service_rate_per_server * resource_units` on open
/// days and zero at weekends; the queue is served first, then the day's
/// arrivals join it. The waiting time is the end-of-day backlog divided by
/// `num_servers * service_rate_per_server`, or 0 when that throughput is 0.
///
/// # Arguments
///
/// * `config` - Horizon, servers and service rate.
/// * `arrival_rate` - Mean daily arrivals.
/// * `resource_units` - Allocated care resources that scale daily capacity.
/// * `arrivals` - Source of daily arrival counts.
///
/// # Errors
///
/// Returns [`QueueError`] if the configuration is invalid or if
/// `arrival_rate` or `resource_units` is negative or non-finite.
pub fn simulate_queue(
    config: &QueueConfig,
    arrival_rate: f64,
    resource_units: f64,
    arrivals: &mut impl ArrivalSource,
) -> Result<QueueTrace, QueueError> {
    config.validate()?;
    check_non_negative("arrival rate", arrival_rate)?;
    if arrival_rate > MAX_ARRIVAL_RATE {
        return Err(QueueError::InvalidParameter {
            name: "arrival rate",
            value: arrival_rate,
        });
    }
    check_non_negative("resource units", resource_units)?;

    let schedule = CapacitySchedule::new(
        config.service_rate_per_server() * resource_units,
        config.first_weekday(),
    );
    let throughput = config.total_service_rate();
    debug!(
        arrival_rate,
        weekday_capacity = schedule.weekday_capacity(),
        throughput,
        "starting queue simulation"
    );

    let mut queue: u64 = 0;
    let mut trace = QueueTrace {
        days: Vec::with_capacity(config.horizon_days()),
        total_arrivals: 0,
        total_served: 0,
    };

    for day in 1..=config.horizon_days() {
        let served = queue.min(schedule.capacity(day));
        let arrived = arrivals.sample_poisson(arrival_rate);
        queue = queue - served + arrived;

        let waiting_time = if throughput > 0.0 {
            queue as f64 / throughput
        } else {
            0.0
        };
        trace.total_arrivals += arrived;
        trace.total_served += served;
        trace.days.push(DayRecord::new(waiting_time, queue));
    }

    debug!(
        total_arrivals = trace.total_arrivals,
        total_served = trace.total_served,
        final_queue = queue,
        "queue simulation complete"
    );
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::{RngArrivals, ScriptedArrivals};
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn defaults() {
        let cfg = QueueConfig::new();
        assert_eq!(cfg.horizon_days(), 365);
        assert_eq!(cfg.num_servers(), 38);
        assert_relative_eq!(cfg.service_rate_per_server(), 10.0);
        assert_eq!(cfg.first_weekday(), 0);
        assert_relative_eq!(cfg.total_service_rate(), 380.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(matches!(
            QueueConfig::new().with_horizon_days(0).validate(),
            Err(QueueError::EmptyHorizon)
        ));
        assert!(matches!(
            QueueConfig::new().with_first_weekday(7).validate(),
            Err(QueueError::InvalidWeekday { weekday: 7 })
        ));
        assert!(
            QueueConfig::new()
                .with_service_rate_per_server(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            QueueConfig::new()
                .with_service_rate_per_server(-1.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_negative_arrival_rate() {
        let mut src = ScriptedArrivals::default();
        let result = simulate_queue(&QueueConfig::new(), -1.0, 10.0, &mut src);
        assert!(matches!(
            result,
            Err(QueueError::InvalidParameter {
                name: "arrival rate",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_resources() {
        let mut src = ScriptedArrivals::default();
        assert!(simulate_queue(&QueueConfig::new(), 1.0, f64::INFINITY, &mut src).is_err());
    }

    #[test]
    fn trace_length_matches_horizon() {
        let cfg = QueueConfig::new().with_horizon_days(30);
        let mut src = RngArrivals::new(StdRng::seed_from_u64(1));
        let trace = simulate_queue(&cfg, 5.0, 1.0, &mut src).unwrap();
        assert_eq!(trace.len(), 30);
    }

    #[test]
    fn zero_servers_gives_zero_waiting_time() {
        let cfg = QueueConfig::new().with_num_servers(0).with_horizon_days(14);
        let mut src = ScriptedArrivals::new(vec![4; 14]);
        let trace = simulate_queue(&cfg, 4.0, 0.0, &mut src).unwrap();
        assert_eq!(trace.final_queue_length(), 56);
        assert!(trace.days().iter().all(|d| d.waiting_time == 0.0));
    }

    #[test]
    fn conservation_of_people() {
        let cfg = QueueConfig::new().with_horizon_days(120);
        let mut src = RngArrivals::new(StdRng::seed_from_u64(5));
        let trace = simulate_queue(&cfg, 40.0, 3.5, &mut src).unwrap();
        assert_eq!(
            trace.total_arrivals() - trace.total_served(),
            trace.final_queue_length()
        );
    }
}
