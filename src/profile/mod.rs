//! Month × hour-of-day solar resource profiles.

/// Resource file ingestion (PVGIS-style hourly exports).
pub mod ingest;
/// Free-text site metadata found in the file preamble.
pub mod metadata;
/// Generated profiles for presets and tests.
pub mod synthetic;

use serde::{Deserialize, Serialize};

pub use ingest::{IngestedProfile, ProfileReader, ResourceColumn, ingest};
pub use metadata::SiteMetadata;

/// Number of months in the profile.
pub const MONTHS: usize = 12;
/// Number of hour-of-day slots per month.
pub const HOURS_PER_DAY: usize = 24;

/// Long-run average solar resource for every (month, hour-of-day) pair.
///
/// Values are W when taken from a power column and W/m² when taken from an
/// irradiance column. Every entry is finite and non-negative; months are
/// addressed 1–12 and hours 0–23.
///
/// # Examples
///
/// ```
/// use solar_pump_sim::profile::MonthlyProfile;
///
/// let p = MonthlyProfile::flat(500.0, 6, 18);
/// assert_eq!(p.value(1, 6), 500.0);
/// assert_eq!(p.value(12, 19), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProfile {
    values: [[f64; HOURS_PER_DAY]; MONTHS],
}

impl Default for MonthlyProfile {
    fn default() -> Self {
        Self::zeros()
    }
}

impl MonthlyProfile {
    /// Profile with no resource at any hour.
    pub fn zeros() -> Self {
        Self {
            values: [[0.0; HOURS_PER_DAY]; MONTHS],
        }
    }

    /// Builds a profile from raw rows, clamping negative or non-finite entries to 0.
    pub fn from_rows(rows: [[f64; HOURS_PER_DAY]; MONTHS]) -> Self {
        let mut values = rows;
        for month in values.iter_mut() {
            for v in month.iter_mut() {
                if !v.is_finite() || *v < 0.0 {
                    *v = 0.0;
                }
            }
        }
        Self { values }
    }

    /// Same power in every month for hours `first_hour..=last_hour`, zero otherwise.
    pub fn flat(power: f64, first_hour: usize, last_hour: usize) -> Self {
        let mut row = [0.0; HOURS_PER_DAY];
        for (h, v) in row.iter_mut().enumerate() {
            if h >= first_hour && h <= last_hour {
                *v = power;
            }
        }
        Self::from_rows([row; MONTHS])
    }

    /// Value for `month` (1–12) at `hour` (0–23); 0 outside those ranges.
    pub fn value(&self, month: usize, hour: usize) -> f64 {
        self.month(month)
            .and_then(|row| row.get(hour).copied())
            .unwrap_or(0.0)
    }

    /// The 24 hourly values of `month` (1–12).
    pub fn month(&self, month: usize) -> Option<&[f64; HOURS_PER_DAY]> {
        month.checked_sub(1).and_then(|m| self.values.get(m))
    }

    /// Largest value anywhere in the profile.
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flat_map(|row| row.iter())
            .fold(0.0, |acc, &v| acc.max(v))
    }

    /// Mean daily resource of `month` in Wh (or Wh/m²).
    pub fn daily_total(&self, month: usize) -> f64 {
        self.month(month).map(|row| row.iter().sum()).unwrap_or(0.0)
    }

    /// Returns a copy with every value multiplied by `factor` (negative factors give zeros).
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 0.0 };
        let mut values = self.values;
        for row in values.iter_mut() {
            for v in row.iter_mut() {
                *v *= factor;
            }
        }
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_is_all_zero() {
        let p = MonthlyProfile::zeros();
        assert_eq!(p.max_value(), 0.0);
        for m in 1..=12 {
            assert_eq!(p.daily_total(m), 0.0);
        }
    }

    #[test]
    fn from_rows_clamps_bad_values() {
        let mut rows = [[1.0; HOURS_PER_DAY]; MONTHS];
        rows[0][0] = -5.0;
        rows[3][7] = f64::NAN;
        rows[11][23] = f64::INFINITY;
        let p = MonthlyProfile::from_rows(rows);
        assert_eq!(p.value(1, 0), 0.0);
        assert_eq!(p.value(4, 7), 0.0);
        assert_eq!(p.value(12, 23), 0.0);
        assert_eq!(p.value(6, 12), 1.0);
    }

    #[test]
    fn flat_covers_inclusive_window() {
        let p = MonthlyProfile::flat(500.0, 6, 18);
        let row = p.month(7).copied().unwrap_or([0.0; HOURS_PER_DAY]);
        assert_eq!(row.iter().filter(|&&v| v > 0.0).count(), 13);
        assert_eq!(p.value(7, 5), 0.0);
        assert_eq!(p.value(7, 18), 500.0);
        assert_eq!(p.daily_total(7), 6500.0);
    }

    #[test]
    fn out_of_range_lookups_are_zero() {
        let p = MonthlyProfile::flat(100.0, 0, 23);
        assert_eq!(p.value(0, 5), 0.0);
        assert_eq!(p.value(13, 5), 0.0);
        assert_eq!(p.value(1, 24), 0.0);
        assert!(p.month(0).is_none());
    }

    #[test]
    fn scaled_multiplies_and_rejects_negative_factor() {
        let p = MonthlyProfile::flat(200.0, 10, 12);
        assert_eq!(p.scaled(2.5).value(3, 11), 500.0);
        assert_eq!(p.scaled(-1.0).max_value(), 0.0);
    }
}
