//! Post-hoc monthly and annual aggregation of day records.

use std::fmt;

use serde::Serialize;

use super::types::DayRecord;

/// A day with more deficit than this (L) counts as not served.
pub const DEFICIT_TOLERANCE_L: f64 = 1e-6;

/// Share of demand delivered, in percent.
///
/// `max(0, (1 - deficit / demand) * 100)`, capped at 100 and defined as 100
/// when nothing was demanded.
pub fn reliability_pct(deficit_l: f64, demand_l: f64) -> f64 {
    if demand_l <= 0.0 {
        return 100.0;
    }
    ((1.0 - deficit_l / demand_l) * 100.0).clamp(0.0, 100.0)
}

/// Aggregate water balance of one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    /// Month, 1–12.
    pub month: usize,
    pub days: usize,
    pub pumped_l: f64,
    pub demand_l: f64,
    pub deficit_l: f64,
    pub overflow_l: f64,
    /// `pumped_l / days`.
    pub avg_daily_pumped_l: f64,
    pub days_not_served: usize,
    pub reliability_pct: f64,
}

impl MonthSummary {
    /// Sums the day records of `month`.
    pub fn from_days(month: usize, days: &[DayRecord]) -> Self {
        let mut pumped = 0.0;
        let mut demand = 0.0;
        let mut deficit = 0.0;
        let mut overflow = 0.0;
        let mut not_served = 0;

        for d in days {
            pumped += d.pumped_l;
            demand += d.demand_l;
            deficit += d.deficit_l;
            overflow += d.overflow_l;
            if !d.served {
                not_served += 1;
            }
        }

        let avg_daily_pumped_l = if days.is_empty() {
            0.0
        } else {
            pumped / days.len() as f64
        };

        Self {
            month,
            days: days.len(),
            pumped_l: pumped,
            demand_l: demand,
            deficit_l: deficit,
            overflow_l: overflow,
            avg_daily_pumped_l,
            days_not_served: not_served,
            reliability_pct: reliability_pct(deficit, demand),
        }
    }
}

/// Aggregate water balance of the whole year.
#[derive(Debug, Clone, Serialize)]
pub struct YearSummary {
    pub pumped_l: f64,
    pub demand_l: f64,
    pub deficit_l: f64,
    pub overflow_l: f64,
    pub days_not_served: usize,
    pub reliability_pct: f64,
    /// Tank contents after the last hour (L).
    pub final_stored_l: f64,
}

impl YearSummary {
    /// Sums the monthly summaries.
    pub fn from_months(months: &[MonthSummary], final_stored_l: f64) -> Self {
        let pumped: f64 = months.iter().map(|m| m.pumped_l).sum();
        let demand: f64 = months.iter().map(|m| m.demand_l).sum();
        let deficit: f64 = months.iter().map(|m| m.deficit_l).sum();
        let overflow: f64 = months.iter().map(|m| m.overflow_l).sum();
        let days_not_served = months.iter().map(|m| m.days_not_served).sum();

        Self {
            pumped_l: pumped,
            demand_l: demand,
            deficit_l: deficit,
            overflow_l: overflow,
            days_not_served,
            reliability_pct: reliability_pct(deficit, demand),
            final_stored_l,
        }
    }
}

impl fmt::Display for YearSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Annual Summary ---")?;
        writeln!(f, "Pumped:           {:>12.0} L", self.pumped_l)?;
        writeln!(f, "Demand:           {:>12.0} L", self.demand_l)?;
        writeln!(f, "Deficit:          {:>12.0} L", self.deficit_l)?;
        writeln!(f, "Overflow:         {:>12.0} L", self.overflow_l)?;
        writeln!(f, "Days not served:  {:>12}", self.days_not_served)?;
        write!(f, "Reliability:      {:>11.1}%", self.reliability_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(pumped: f64, demand: f64, deficit: f64, overflow: f64) -> DayRecord {
        DayRecord {
            month: 1,
            day: 1,
            day_of_year: 0,
            pumped_l: pumped,
            demand_l: demand,
            deficit_l: deficit,
            overflow_l: overflow,
            delivered_l: demand - deficit,
            served: deficit <= DEFICIT_TOLERANCE_L,
        }
    }

    #[test]
    fn reliability_edges() {
        assert_eq!(reliability_pct(0.0, 0.0), 100.0);
        assert_eq!(reliability_pct(5.0, 0.0), 100.0);
        assert_eq!(reliability_pct(0.0, 100.0), 100.0);
        assert_eq!(reliability_pct(25.0, 100.0), 75.0);
        assert_eq!(reliability_pct(100.0, 100.0), 0.0);
        assert_eq!(reliability_pct(150.0, 100.0), 0.0);
    }

    #[test]
    fn month_sums_days() {
        let days = vec![
            day(100.0, 50.0, 0.0, 10.0),
            day(20.0, 50.0, 30.0, 0.0),
            day(60.0, 50.0, 1e-9, 0.0),
        ];
        let m = MonthSummary::from_days(3, &days);
        assert_eq!(m.month, 3);
        assert_eq!(m.days, 3);
        assert_eq!(m.pumped_l, 180.0);
        assert_eq!(m.demand_l, 150.0);
        assert_eq!(m.overflow_l, 10.0);
        assert_eq!(m.avg_daily_pumped_l, 60.0);
        assert_eq!(m.days_not_served, 1);
        assert!((m.reliability_pct - 80.0).abs() < 1e-6);
    }

    #[test]
    fn empty_month_is_well_defined() {
        let m = MonthSummary::from_days(2, &[]);
        assert_eq!(m.avg_daily_pumped_l, 0.0);
        assert_eq!(m.reliability_pct, 100.0);
    }

    #[test]
    fn year_sums_months() {
        let a = MonthSummary::from_days(1, &[day(10.0, 40.0, 40.0, 0.0)]);
        let b = MonthSummary::from_days(2, &[day(90.0, 40.0, 0.0, 50.0)]);
        let y = YearSummary::from_months(&[a, b], 12.5);
        assert_eq!(y.pumped_l, 100.0);
        assert_eq!(y.demand_l, 80.0);
        assert_eq!(y.deficit_l, 40.0);
        assert_eq!(y.overflow_l, 50.0);
        assert_eq!(y.days_not_served, 1);
        assert_eq!(y.reliability_pct, 50.0);
        assert_eq!(y.final_stored_l, 12.5);
    }

    #[test]
    fn display_does_not_panic() {
        let y = YearSummary::from_months(&[], 0.0);
        assert!(format!("{y}").contains("Reliability"));
    }
}
