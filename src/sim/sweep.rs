//! Tank sizing: independent runs over a list of capacities.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use super::engine::simulate;
use super::kpi::YearSummary;
use super::types::SimulationConfig;
use crate::error::ConfigurationError;

/// Annual outcome for one candidate tank size.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub tank_capacity_l: f64,
    pub year: YearSummary,
}

/// Simulates `base` once per entry of `capacities_l`, in parallel.
///
/// Results are returned in the order of `capacities_l`. Every run gets its own
/// configuration and tank; nothing is shared between them.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidVolume`] if any capacity is negative
/// or not finite; no simulation results are returned in that case.
pub fn capacity_sweep(
    base: &SimulationConfig,
    capacities_l: &[f64],
) -> Result<Vec<SweepPoint>, ConfigurationError> {
    let configs = capacities_l
        .iter()
        .map(|&c| base.with_tank_capacity(c))
        .collect::<Result<Vec<_>, _>>()?;

    info!(runs = configs.len(), "starting tank capacity sweep");

    Ok(configs
        .par_iter()
        .map(|cfg| SweepPoint {
            tank_capacity_l: cfg.tank_capacity_l(),
            year: simulate(cfg).year,
        })
        .collect())
}

/// Smallest swept capacity reaching `target_pct` reliability, if any.
pub fn smallest_reliable(points: &[SweepPoint], target_pct: f64) -> Option<&SweepPoint> {
    points
        .iter()
        .filter(|p| p.year.reliability_pct >= target_pct)
        .min_by(|a, b| a.tank_capacity_l.total_cmp(&b.tank_capacity_l))
}
