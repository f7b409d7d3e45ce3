//! Pump performance model: datasheet points to a head-corrected power→flow function.

pub mod curve;

pub use curve::{PumpCurve, PumpCurvePoint};

/// Litres in one cubic metre; one hour at `q` m³/h delivers `q * LITRES_PER_M3` L.
pub const LITRES_PER_M3: f64 = 1000.0;
