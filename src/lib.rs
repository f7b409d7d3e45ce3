//! Solar water-pumping simulator: resource ingestion, pump curves and an
//! hourly reservoir balance over a full year.

pub mod cli;
pub mod config;
pub mod error;
/// Result export to CSV and JSON.
pub mod io;
pub mod logging;
/// Monthly hourly solar profiles: file ingestion and synthetic generation.
pub mod profile;
/// Piecewise-linear pump performance model.
pub mod pump;
pub mod reporting;
/// Reservoir simulation engine, calendar, statistics and sweeps.
pub mod sim;
