//! Plain-text reports printed by the CLI.

use std::fmt;

use crate::profile::IngestedProfile;
use crate::sim::sweep::SweepPoint;
use crate::sim::types::{HourlyPoint, SimulationConfig, SimulationResult};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Three-letter month name for `month` (1–12), `"???"` otherwise.
pub fn month_abbr(month: usize) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBR.get(i))
        .copied()
        .unwrap_or("???")
}

/// Full run report: inputs, resource provenance, monthly table and annual summary.
pub struct Report<'a> {
    pub config: &'a SimulationConfig,
    pub ingested: Option<&'a IngestedProfile>,
    pub result: &'a SimulationResult,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.config;
        let curve = cfg.operating_curve();

        writeln!(f, "--- Scenario ---")?;
        writeln!(f, "Head:             {:>12.1} m", cfg.head_m())?;
        writeln!(f, "Tank capacity:    {:>12.0} L", cfg.tank_capacity_l())?;
        writeln!(f, "Daily demand:     {:>12.0} L", cfg.daily_demand_l())?;
        writeln!(
            f,
            "Pump:             {:>12.0} W max, {:.2} m³/h at {:.1} m",
            curve.max_power(),
            curve.flow_at(curve.max_power()),
            curve.reference_head()
        )?;

        if let Some(ing) = self.ingested {
            writeln!(f)?;
            writeln!(f, "--- Solar Resource ---")?;
            writeln!(f, "Column:           {} [{}]", ing.column, ing.column_label)?;
            writeln!(
                f,
                "Rows:             {} used, {} skipped, {} empty buckets",
                ing.rows_used, ing.rows_skipped, ing.empty_buckets
            )?;
            let m = &ing.metadata;
            if let (Some(lat), Some(lon)) = (m.latitude, m.longitude) {
                writeln!(f, "Location:         {lat:.3}, {lon:.3}")?;
            }
            if let Some(elev) = m.elevation_m {
                writeln!(f, "Elevation:        {elev:.0} m")?;
            }
            if let Some(kwp) = m.installed_kwp {
                writeln!(f, "Installed PV:     {kwp:.2} kWp")?;
            }
            if let Some(src) = &m.source {
                writeln!(f, "Source:           {src}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "--- Monthly Summary ---")?;
        writeln!(
            f,
            "{:<5}{:>12}{:>14}{:>14}{:>12}{:>12}{:>8}{:>9}",
            "Month", "Sun Wh/day", "Pumped L/day", "Demand L", "Deficit L", "Overflow L", "Unmet",
            "Rel. %"
        )?;
        for m in &self.result.months {
            writeln!(
                f,
                "{:<5}{:>12.0}{:>14.0}{:>14.0}{:>12.0}{:>12.0}{:>8}{:>9.1}",
                month_abbr(m.month),
                cfg.profile().daily_total(m.month),
                m.avg_daily_pumped_l,
                m.demand_l,
                m.deficit_l,
                m.overflow_l,
                m.days_not_served,
                m.reliability_pct
            )?;
        }

        writeln!(f)?;
        write!(f, "{}", self.result.year)
    }
}

/// Tank sizing table.
pub struct SweepTable<'a>(pub &'a [SweepPoint]);

impl fmt::Display for SweepTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Tank Sweep ---")?;
        write!(
            f,
            "{:>12}{:>14}{:>14}{:>9}",
            "Tank L", "Deficit L", "Overflow L", "Rel. %"
        )?;
        for p in self.0 {
            write!(
                f,
                "\n{:>12.0}{:>14.0}{:>14.0}{:>9.1}",
                p.tank_capacity_l, p.year.deficit_l, p.year.overflow_l, p.year.reliability_pct
            )?;
        }
        Ok(())
    }
}

/// Hour-by-hour pump output for one month's average day.
pub struct MonthProfileTable<'a> {
    pub month: usize,
    pub points: &'a [HourlyPoint],
}

impl fmt::Display for MonthProfileTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Hourly Pumping: {} ---", month_abbr(self.month))?;
        write!(
            f,
            "{:>4}{:>12}{:>10}{:>10}{:>10}",
            "Hour", "Resource W", "Power W", "m³/h", "L"
        )?;
        let mut total = 0.0;
        for p in self.points {
            total += p.volume_l;
            write!(
                f,
                "\n{:>4}{:>12.1}{:>10.1}{:>10.3}{:>10.0}",
                p.hour, p.resource_w, p.power_w, p.flow_m3h, p.volume_l
            )?;
        }
        write!(f, "\nDaily total: {total:.0} L")
    }
}
