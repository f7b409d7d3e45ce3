//! Fixed non-leap calendar and the month → day → hour stepping clock.

/// Days per month of a 365-day year.
pub const DAYS_IN_MONTH: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
/// Days in the simulated year.
pub const DAYS_PER_YEAR: usize = 365;
/// Hours in the simulated year.
pub const HOURS_PER_YEAR: usize = DAYS_PER_YEAR * 24;

/// Days in `month` (1–12); 0 for anything else.
pub fn days_in_month(month: usize) -> usize {
    month
        .checked_sub(1)
        .and_then(|m| DAYS_IN_MONTH.get(m).copied())
        .unwrap_or(0)
}

/// Position of one simulated hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimHour {
    /// Month, 1–12.
    pub month: usize,
    /// Day of month, 1-based.
    pub day: usize,
    /// Hour of day, 0–23.
    pub hour: usize,
    /// Day of year, 0-based.
    pub day_of_year: usize,
    /// Hour of year, 0-based.
    pub hour_of_year: usize,
}

impl SimHour {
    /// True for the final hour of a day.
    pub fn ends_day(&self) -> bool {
        self.hour == 23
    }
}

/// Clock that walks every hour of the year in month, day, hour nesting order.
///
/// # Examples
///
/// ```
/// use solar_pump_sim::sim::calendar::{Calendar, HOURS_PER_YEAR};
///
/// let mut calendar = Calendar::new();
/// let mut count = 0;
/// calendar.run(|_| count += 1);
/// assert_eq!(count, HOURS_PER_YEAR);
/// ```
pub struct Calendar {
    /// Next hour of year to emit.
    current: usize,
    month: usize,
    day: usize,
    hour: usize,
    day_of_year: usize,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar {
    /// Clock positioned at 1 January, hour 0.
    pub fn new() -> Self {
        Self {
            current: 0,
            month: 1,
            day: 1,
            hour: 0,
            day_of_year: 0,
        }
    }

    /// Returns the current hour and advances, or `None` once the year is done.
    pub fn tick(&mut self) -> Option<SimHour> {
        if self.current >= HOURS_PER_YEAR {
            return None;
        }
        let now = SimHour {
            month: self.month,
            day: self.day,
            hour: self.hour,
            day_of_year: self.day_of_year,
            hour_of_year: self.current,
        };

        self.current += 1;
        self.hour += 1;
        if self.hour == 24 {
            self.hour = 0;
            self.day += 1;
            self.day_of_year += 1;
            if self.day > days_in_month(self.month) {
                self.day = 1;
                self.month += 1;
            }
        }
        Some(now)
    }

    /// Calls `f` for each remaining hour.
    pub fn run(&mut self, mut f: impl FnMut(SimHour)) {
        while let Some(t) = self.tick() {
            f(t);
        }
    }
}
