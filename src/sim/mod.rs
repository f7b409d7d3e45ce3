/// Fixed 365-day calendar and hourly clock.
pub mod calendar;
pub mod engine;
pub mod kpi;
/// Tank storage state and hourly balance.
pub mod reservoir;
/// Parallel tank-capacity sweeps.
pub mod sweep;
pub mod types;

pub use engine::{hourly_profile, simulate};
pub use types::{SimulationConfig, SimulationResult};
