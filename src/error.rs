//! Error types shared by profile ingestion and model construction.

use thiserror::Error;

/// Resource file could not be turned into a monthly profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedInput {
    #[error("no header row starting with \"time\" found in the first {searched} lines")]
    MissingHeader { searched: usize },

    #[error("no power column (\"P\") or irradiance column ({accepted}) in header: {columns:?}")]
    MissingResourceColumn {
        columns: Vec<String>,
        accepted: String,
    },

    #[error("only {recovered} hourly rows recovered, at least {minimum} required (a full year has 8760)")]
    TooFewRows { recovered: usize, minimum: usize },

    #[error("cannot read \"{path}\": {reason}")]
    Unreadable { path: String, reason: String },
}

/// Model parameters that the pump model or engine refuse to run with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{field} must be > 0, got {value}")]
    NonPositiveHead { field: &'static str, value: f64 },

    #[error("pump curve has no usable (flow, power) points")]
    EmptyPumpCurve,

    #[error("pump point #{index} is invalid: {reason}")]
    InvalidPumpPoint { index: usize, reason: String },

    #[error("{field} must be a finite value >= 0, got {value}")]
    InvalidVolume { field: &'static str, value: f64 },

    #[error("daylight window {sunrise_hour}..{sunset_hour} is empty or runs past hour 24")]
    InvalidDaylight {
        sunrise_hour: usize,
        sunset_hour: usize,
    },
}

/// Failure to turn a scenario file into a runnable configuration.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Profile(#[from] MalformedInput),

    #[error(transparent)]
    Model(#[from] ConfigurationError),

    #[error("profile.path is required when profile.model = \"file\"")]
    MissingProfilePath,
}
