//! Weekly service-capacity schedule.

/// Days in a week.
pub const DAYS_PER_WEEK: usize = 7;

/// Weekday indices (Monday = 0) on which no service is offered.
const CLOSED_WEEKDAYS: [usize; 2] = [5, 6];

/// Daily service capacity: full capacity on weekdays, none at weekends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacitySchedule {
    weekday_capacity: f64,
    first_weekday: u8,
}

impl CapacitySchedule {
    /// Creates a schedule whose day 1 falls on `first_weekday` (Monday = 0).
    pub fn new(weekday_capacity: f64, first_weekday: u8) -> Self {
        Self {
            weekday_capacity,
            first_weekday,
        }
    }

    /// Nominal capacity on an open day.
    pub fn weekday_capacity(&self) -> f64 {
        self.weekday_capacity
    }

    /// Weekday index (Monday = 0) of 1-based `day`.
    pub fn weekday(&self, day: usize) -> usize {
        (day - 1 + self.first_weekday as usize) % DAYS_PER_WEEK
    }

    /// Whether 1-based `day` is a weekend day.
    pub fn is_weekend(&self, day: usize) -> bool {
        CLOSED_WEEKDAYS.contains(&self.weekday(day))
    }

    /// Whole people that can be served on 1-based `day`.
    ///
    /// The backlog counts people, so fractional capacity is floored.
    pub fn capacity(&self, day: usize) -> u64 {
        if self.is_weekend(day) {
            0
        } else {
            self.weekday_capacity.floor() as u64
        }
    }
}
