//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fmt::Write as _;

use solar_pump_sim::profile::MonthlyProfile;
use solar_pump_sim::pump::{PumpCurve, PumpCurvePoint};
use solar_pump_sim::sim::SimulationConfig;

/// Days per month of the simulated (non-leap) year.
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Single-point pump: 2.0 m³/h at 500 W, measured at 150 m.
pub fn single_point_pump() -> PumpCurve {
    PumpCurve::new(&[PumpCurvePoint::new(2.0, 500.0)], 150.0).expect("valid pump curve")
}

/// Constant 500 W from 06:00 through 18:00 (13 hours) in every month.
pub fn flat_profile() -> MonthlyProfile {
    MonthlyProfile::flat(500.0, 6, 18)
}

/// Flat profile, single-point pump, operating head 150 m.
pub fn flat_config(tank_capacity_l: f64, daily_demand_l: f64) -> SimulationConfig {
    SimulationConfig::new(
        150.0,
        tank_capacity_l,
        daily_demand_l,
        flat_profile(),
        single_point_pump(),
    )
    .expect("valid simulation config")
}

/// All-zero profile with the single-point pump.
pub fn zero_config(tank_capacity_l: f64, daily_demand_l: f64) -> SimulationConfig {
    SimulationConfig::new(
        150.0,
        tank_capacity_l,
        daily_demand_l,
        MonthlyProfile::zeros(),
        single_point_pump(),
    )
    .expect("valid simulation config")
}

/// Synthetic PV output (W) for an hour: half-sine between 06:00 and 18:00,
/// scaled by month so that each month has a distinct mean.
pub fn synthetic_power(month: u32, hour: u32) -> f64 {
    if !(6..18).contains(&hour) {
        return 0.0;
    }
    let x = (f64::from(hour - 6) + 0.5) / 12.0;
    (std::f64::consts::PI * x).sin() * (600.0 + 20.0 * f64::from(month))
}

/// Hourly resource file in the layout of a PVGIS series export: a metadata
/// preamble, a `time,P,...` header, `days` days of hourly rows from
/// 1 January 2019 and a legend footer.
pub fn pvgis_text(days: usize) -> String {
    let mut s = String::new();
    s.push_str("Latitude (decimal degrees):\t-1.286\n");
    s.push_str("Longitude (decimal degrees):\t36.817\n");
    s.push_str("Elevation (m):\t1680\n");
    s.push_str("Radiation database:\tPVGIS-SARAH2\n");
    s.push('\n');
    s.push_str("Slope: 15 deg. \n");
    s.push_str("Azimuth: 0 deg. \n");
    s.push_str("Nominal power of the PV system (c-Si) (kWp):\t1.0\n");
    s.push_str("System losses (%):\t14.0\n");
    s.push_str("time,P,G(i),H_sun,T2m,WS10m,Int\n");

    let mut written = 0;
    'outer: for (m, &n) in DAYS_IN_MONTH.iter().enumerate() {
        let month = m as u32 + 1;
        for day in 1..=n {
            if written == days {
                break 'outer;
            }
            for hour in 0..24 {
                let p = synthetic_power(month, hour);
                let _ = writeln!(
                    s,
                    "2019{month:02}{day:02}:{hour:02}10,{p:.2},{:.2},0.0,20.1,1.5,0.0",
                    p * 1.1
                );
            }
            written += 1;
        }
    }

    s.push('\n');
    s.push_str("P: PV system power (W)\n");
    s.push_str("G(i): Global irradiance on the inclined plane (plane of the array) (W/m2)\n");
    s.push_str("PVGIS (c) European Union, 2001-2024\n");
    s
}
