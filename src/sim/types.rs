//! Simulation input and per-hour / per-day records.

use serde::Serialize;

use super::kpi::{MonthSummary, YearSummary};
use crate::error::ConfigurationError;
use crate::profile::MonthlyProfile;
use crate::pump::PumpCurve;

/// Everything one simulation run needs.
///
/// Construction validates every scalar and derives the pump curve at the
/// operating head once, so the engine can run without re-checking anything.
///
/// # Examples
///
/// ```
/// use solar_pump_sim::profile::MonthlyProfile;
/// use solar_pump_sim::pump::{PumpCurve, PumpCurvePoint};
/// use solar_pump_sim::sim::types::SimulationConfig;
///
/// let pump = PumpCurve::new(&[PumpCurvePoint::new(2.0, 500.0)], 150.0).unwrap();
/// let cfg = SimulationConfig::new(75.0, 5000.0, 2000.0, MonthlyProfile::zeros(), pump).unwrap();
/// assert_eq!(cfg.operating_curve().flow_at(500.0), 4.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SimulationConfig {
    head_m: f64,
    tank_capacity_l: f64,
    daily_demand_l: f64,
    profile: MonthlyProfile,
    pump: PumpCurve,
    operating_curve: PumpCurve,
}

impl SimulationConfig {
    /// Validates the inputs and builds a run configuration.
    ///
    /// # Arguments
    ///
    /// * `head_m` - Operating total dynamic head (m, > 0)
    /// * `tank_capacity_l` - Storage tank capacity (L, >= 0)
    /// * `daily_demand_l` - Water demand per day (L, >= 0)
    /// * `profile` - Monthly hourly solar resource
    /// * `pump` - Datasheet curve at its reference head
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] for a non-positive head or a negative
    /// or non-finite volume.
    pub fn new(
        head_m: f64,
        tank_capacity_l: f64,
        daily_demand_l: f64,
        profile: MonthlyProfile,
        pump: PumpCurve,
    ) -> Result<Self, ConfigurationError> {
        check_volume("tank_capacity_l", tank_capacity_l)?;
        check_volume("daily_demand_l", daily_demand_l)?;
        let operating_curve = pump.at_head(head_m)?;
        Ok(Self {
            head_m,
            tank_capacity_l,
            daily_demand_l,
            profile,
            pump,
            operating_curve,
        })
    }

    /// Copy of this configuration with a different tank capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidVolume`] for a negative or non-finite capacity.
    pub fn with_tank_capacity(&self, tank_capacity_l: f64) -> Result<Self, ConfigurationError> {
        check_volume("tank_capacity_l", tank_capacity_l)?;
        Ok(Self {
            tank_capacity_l,
            ..self.clone()
        })
    }

    pub fn head_m(&self) -> f64 {
        self.head_m
    }

    pub fn tank_capacity_l(&self) -> f64 {
        self.tank_capacity_l
    }

    pub fn daily_demand_l(&self) -> f64 {
        self.daily_demand_l
    }

    /// Demand withdrawn in each hour.
    pub fn hourly_demand_l(&self) -> f64 {
        self.daily_demand_l / 24.0
    }

    pub fn profile(&self) -> &MonthlyProfile {
        &self.profile
    }

    /// Datasheet curve at its reference head.
    pub fn pump(&self) -> &PumpCurve {
        &self.pump
    }

    /// Curve rescaled to the operating head.
    pub fn operating_curve(&self) -> &PumpCurve {
        &self.operating_curve
    }
}

fn check_volume(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidVolume { field, value })
    }
}

/// Reservoir balance of one simulated hour.
#[derive(Debug, Clone, Serialize)]
pub struct HourRecord {
    pub month: usize,
    pub day: usize,
    pub hour: usize,
    /// Resource value after clamping to the pump's maximum input (W).
    pub power_w: f64,
    pub pumped_l: f64,
    pub demand_l: f64,
    pub deficit_l: f64,
    pub overflow_l: f64,
    /// Stored volume at the end of the hour (L).
    pub stored_l: f64,
    /// `stored_l` as a fraction of capacity (0 for a zero-capacity tank).
    pub fill_fraction: f64,
}

/// Water balance of one simulated day.
#[derive(Debug, Clone, Serialize)]
pub struct DayRecord {
    pub month: usize,
    /// Day of month, 1-based.
    pub day: usize,
    /// Day of year, 0-based.
    pub day_of_year: usize,
    pub pumped_l: f64,
    pub demand_l: f64,
    pub deficit_l: f64,
    pub overflow_l: f64,
    /// Demand actually met: `demand_l - deficit_l`.
    pub delivered_l: f64,
    /// False when the day's deficit exceeds the numerical tolerance.
    pub served: bool,
}

/// Pump output for one hour of a month's average day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub hour: usize,
    /// Profile value before clamping.
    pub resource_w: f64,
    /// Power fed to the pump curve.
    pub power_w: f64,
    pub flow_m3h: f64,
    /// Volume pumped in the hour (L).
    pub volume_l: f64,
}

/// Complete outcome of one run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Twelve entries, January first.
    pub months: Vec<MonthSummary>,
    /// 365 entries in calendar order.
    pub days: Vec<DayRecord>,
    /// 8760 entries in calendar order.
    pub hours: Vec<HourRecord>,
    pub year: YearSummary,
}

impl SimulationResult {
    /// Summary of `month` (1–12).
    pub fn month(&self, month: usize) -> Option<&MonthSummary> {
        self.months.iter().find(|m| m.month == month)
    }

    /// Days whose deficit exceeded the tolerance.
    pub fn unserved_days(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.iter().filter(|d| !d.served)
    }
}
