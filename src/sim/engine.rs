//! Hour-by-hour reservoir simulation over a 365-day year.

use tracing::{debug, info};

use super::calendar::{Calendar, DAYS_IN_MONTH, DAYS_PER_YEAR, HOURS_PER_YEAR, SimHour};
use super::kpi::{DEFICIT_TOLERANCE_L, MonthSummary, YearSummary};
use super::reservoir::ReservoirState;
use super::types::{DayRecord, HourRecord, HourlyPoint, SimulationConfig, SimulationResult};
use crate::profile::HOURS_PER_DAY;
use crate::pump::{LITRES_PER_M3, PumpCurve};

/// Runs one full year for `config` and returns every aggregate.
///
/// Pure: each call starts from an empty tank and shares nothing with other
/// calls, so independent configurations may be simulated concurrently.
pub fn simulate(config: &SimulationConfig) -> SimulationResult {
    Engine::new(config).run()
}

/// Pump output for each hour of `month` (1–12) without running the reservoir.
///
/// Uses the same clamping and curve lookup as [`simulate`]; returns an empty
/// vector for a month outside 1–12.
pub fn hourly_profile(config: &SimulationConfig, month: usize) -> Vec<HourlyPoint> {
    let Some(row) = config.profile().month(month) else {
        return Vec::new();
    };
    let curve = config.operating_curve();
    row.iter()
        .enumerate()
        .map(|(hour, &resource_w)| {
            let power_w = clamp_power(curve, resource_w);
            let flow_m3h = curve.flow_at(power_w);
            HourlyPoint {
                hour,
                resource_w,
                power_w,
                flow_m3h,
                volume_l: flow_m3h * LITRES_PER_M3,
            }
        })
        .collect()
}

/// Profile value limited to `[0, max_power]` of the curve.
fn clamp_power(curve: &PumpCurve, resource_w: f64) -> f64 {
    resource_w.clamp(0.0, curve.max_power())
}

#[derive(Default)]
struct DayTotals {
    pumped_l: f64,
    demand_l: f64,
    deficit_l: f64,
    overflow_l: f64,
}

/// Single-run simulation state: the borrowed configuration and a fresh tank.
pub struct Engine<'a> {
    config: &'a SimulationConfig,
    reservoir: ReservoirState,
    today: DayTotals,
}

impl<'a> Engine<'a> {
    /// Engine with an empty tank.
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self {
            config,
            reservoir: ReservoirState::empty(config.tank_capacity_l()),
            today: DayTotals::default(),
        }
    }

    /// Advances the reservoir by one hour.
    ///
    /// # Arguments
    ///
    /// * `t` - Calendar position of the hour
    ///
    /// # Returns
    ///
    /// The hour's record, with storage as of the end of the hour.
    pub fn step(&mut self, t: SimHour) -> HourRecord {
        let curve = self.config.operating_curve();

        // 1. Resource, clamped to the datasheet range
        let power_w = clamp_power(curve, self.config.profile().value(t.month, t.hour));

        // 2. Pumped volume
        let pumped_l = curve.flow_at(power_w) * LITRES_PER_M3;

        // 3-5. Demand withdrawal, spill and shortfall
        let demand_l = self.config.hourly_demand_l();
        let balance = self.reservoir.step(pumped_l, demand_l);

        self.today.pumped_l += pumped_l;
        self.today.demand_l += demand_l;
        self.today.deficit_l += balance.deficit_l;
        self.today.overflow_l += balance.overflow_l;

        HourRecord {
            month: t.month,
            day: t.day,
            hour: t.hour,
            power_w,
            pumped_l,
            demand_l,
            deficit_l: balance.deficit_l,
            overflow_l: balance.overflow_l,
            stored_l: self.reservoir.stored_l,
            fill_fraction: self.reservoir.fill_fraction(),
        }
    }

    /// Closes the running day and resets the day totals.
    fn close_day(&mut self, t: SimHour) -> DayRecord {
        // Summed from the same hourly terms as the deficit.
        let totals = std::mem::take(&mut self.today);
        let demand_l = totals.demand_l;
        DayRecord {
            month: t.month,
            day: t.day,
            day_of_year: t.day_of_year,
            pumped_l: totals.pumped_l,
            demand_l,
            deficit_l: totals.deficit_l,
            overflow_l: totals.overflow_l,
            delivered_l: (demand_l - totals.deficit_l).max(0.0),
            served: totals.deficit_l <= DEFICIT_TOLERANCE_L,
        }
    }

    /// Steps through every hour of the year and aggregates the records.
    pub fn run(mut self) -> SimulationResult {
        let mut hours = Vec::with_capacity(HOURS_PER_YEAR);
        let mut days = Vec::with_capacity(DAYS_PER_YEAR);

        Calendar::new().run(|t| {
            hours.push(self.step(t));
            if t.ends_day() {
                days.push(self.close_day(t));
            }
        });
        debug_assert_eq!(hours.len(), HOURS_PER_YEAR);
        debug_assert_eq!(hours.len(), days.len() * HOURS_PER_DAY);

        let mut months = Vec::with_capacity(DAYS_IN_MONTH.len());
        let mut first_day = 0;
        for (i, &n) in DAYS_IN_MONTH.iter().enumerate() {
            let summary = MonthSummary::from_days(i + 1, &days[first_day..first_day + n]);
            debug!(
                month = summary.month,
                pumped_l = summary.pumped_l,
                deficit_l = summary.deficit_l,
                overflow_l = summary.overflow_l,
                days_not_served = summary.days_not_served,
                "month simulated"
            );
            months.push(summary);
            first_day += n;
        }

        let year = YearSummary::from_months(&months, self.reservoir.stored_l);
        info!(
            head_m = self.config.head_m(),
            tank_capacity_l = self.config.tank_capacity_l(),
            daily_demand_l = self.config.daily_demand_l(),
            reliability_pct = year.reliability_pct,
            days_not_served = year.days_not_served,
            "simulation complete"
        );

        SimulationResult {
            months,
            days,
            hours,
            year,
        }
    }
}
