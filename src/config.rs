//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::error::ScenarioError;
use crate::profile::synthetic::{ClearSkyParams, clear_sky};
use crate::profile::{HOURS_PER_DAY, IngestedProfile, MonthlyProfile, ProfileReader};
use crate::pump::{PumpCurve, PumpCurvePoint};
use crate::sim::SimulationConfig;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `village` preset. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or pick a preset with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Head, storage and demand.
    #[serde(default)]
    pub system: SystemConfig,
    /// Pump datasheet.
    #[serde(default)]
    pub pump: PumpConfig,
    /// Where the solar resource comes from.
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Directory relative `profile.path` values are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Hydraulic system parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// Operating total dynamic head (m, > 0).
    pub head_m: f64,
    /// Storage tank capacity (L, >= 0).
    pub tank_capacity_l: f64,
    /// Water demand per day (L, >= 0).
    pub daily_demand_l: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            head_m: 30.0,
            tank_capacity_l: 10_000.0,
            daily_demand_l: 8_000.0,
        }
    }
}

/// Pump datasheet measured at a reference head.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PumpConfig {
    /// Head the datasheet points were measured at (m, > 0).
    pub reference_head_m: f64,
    /// `(flow_m3h, power_w)` points, any order.
    pub points: Vec<PumpCurvePoint>,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            reference_head_m: 30.0,
            points: vec![
                PumpCurvePoint::new(0.5, 150.0),
                PumpCurvePoint::new(1.6, 400.0),
                PumpCurvePoint::new(2.6, 700.0),
                PumpCurvePoint::new(3.3, 1000.0),
            ],
        }
    }
}

/// Solar resource source and its parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// `"file"`, `"synthetic"` or `"flat"`.
    pub model: String,
    /// Resource file for the `file` model.
    pub path: Option<PathBuf>,
    /// Minimum usable rows in the resource file.
    pub min_rows: usize,
    /// Multiplier applied to the profile (array size in kWp for irradiance data).
    pub scale: f64,
    /// Synthetic: noon peak (W).
    pub peak_w: f64,
    /// Synthetic: first daylight hour.
    pub sunrise_hour: usize,
    /// Synthetic: end of daylight (exclusive).
    pub sunset_hour: usize,
    /// Synthetic: winter/summer swing (0.0–1.0).
    pub seasonal_amplitude: f64,
    /// Synthetic: multiplicative noise standard deviation.
    pub noise_std: f64,
    /// Synthetic: random seed.
    pub seed: u64,
    /// Flat: power during the window (W).
    pub flat_power_w: f64,
    /// Flat: first powered hour (inclusive).
    pub flat_first_hour: usize,
    /// Flat: last powered hour (inclusive).
    pub flat_last_hour: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        let clear = ClearSkyParams::default();
        Self {
            model: "synthetic".to_string(),
            path: None,
            min_rows: ProfileReader::default().min_rows,
            scale: 1.0,
            peak_w: 1200.0,
            sunrise_hour: clear.sunrise_hour,
            sunset_hour: clear.sunset_hour,
            seasonal_amplitude: clear.seasonal_amplitude,
            noise_std: clear.noise_std,
            seed: clear.seed,
            flat_power_w: 500.0,
            flat_first_hour: 6,
            flat_last_hour: 18,
        }
    }
}

impl ProfileConfig {
    /// Parameters for the `synthetic` model.
    pub fn clear_sky_params(&self) -> ClearSkyParams {
        ClearSkyParams {
            peak_w: self.peak_w,
            sunrise_hour: self.sunrise_hour,
            sunset_hour: self.sunset_hour,
            seasonal_amplitude: self.seasonal_amplitude,
            noise_std: self.noise_std,
            seed: self.seed,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"system.head_m"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A scenario resolved into a runnable configuration.
#[derive(Debug, Clone)]
pub struct PreparedScenario {
    pub simulation: SimulationConfig,
    /// Ingestion details when the profile came from a file.
    pub ingested: Option<IngestedProfile>,
}

impl ScenarioConfig {
    /// Returns the village preset: shallow well, synthetic clear-sky profile.
    pub fn village() -> Self {
        Self {
            system: SystemConfig::default(),
            pump: PumpConfig::default(),
            profile: ProfileConfig::default(),
            base_dir: None,
        }
    }

    /// Returns the borehole preset: deep borehole, small tank, cloudier sky.
    pub fn borehole() -> Self {
        Self {
            system: SystemConfig {
                head_m: 120.0,
                tank_capacity_l: 5_000.0,
                daily_demand_l: 3_000.0,
            },
            pump: PumpConfig {
                reference_head_m: 100.0,
                points: vec![
                    PumpCurvePoint::new(0.4, 300.0),
                    PumpCurvePoint::new(1.0, 600.0),
                    PumpCurvePoint::new(1.5, 900.0),
                ],
            },
            profile: ProfileConfig {
                peak_w: 900.0,
                seasonal_amplitude: 0.4,
                noise_std: 0.1,
                ..ProfileConfig::default()
            },
            base_dir: None,
        }
    }

    /// Returns the flat-check preset: one pump point and a constant 500 W from 06:00 to 18:00.
    pub fn flat_check() -> Self {
        Self {
            system: SystemConfig {
                head_m: 150.0,
                tank_capacity_l: 5_000.0,
                daily_demand_l: 2_000.0,
            },
            pump: PumpConfig {
                reference_head_m: 150.0,
                points: vec![PumpCurvePoint::new(2.0, 500.0)],
            },
            profile: ProfileConfig {
                model: "flat".to_string(),
                ..ProfileConfig::default()
            },
            base_dir: None,
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["village", "borehole", "flat_check"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "village" => Ok(Self::village()),
            "borehole" => Ok(Self::borehole()),
            "flat_check" => Ok(Self::flat_check()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// Relative `profile.path` values are later resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        cfg.base_dir = path.parent().map(Path::to_path_buf);
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.system;
        if !(s.head_m.is_finite() && s.head_m > 0.0) {
            errors.push(ConfigError::new("system.head_m", "must be > 0"));
        }
        if !(s.tank_capacity_l.is_finite() && s.tank_capacity_l >= 0.0) {
            errors.push(ConfigError::new("system.tank_capacity_l", "must be >= 0"));
        }
        if !(s.daily_demand_l.is_finite() && s.daily_demand_l >= 0.0) {
            errors.push(ConfigError::new("system.daily_demand_l", "must be >= 0"));
        }

        let p = &self.pump;
        if !(p.reference_head_m.is_finite() && p.reference_head_m > 0.0) {
            errors.push(ConfigError::new("pump.reference_head_m", "must be > 0"));
        }
        if !p.points.iter().any(|pt| pt.power_w > 0.0) {
            errors.push(ConfigError::new(
                "pump.points",
                "needs at least one point with power_w > 0",
            ));
        }
        for (i, pt) in p.points.iter().enumerate() {
            let ok = pt.flow_m3h.is_finite()
                && pt.power_w.is_finite()
                && pt.flow_m3h >= 0.0
                && pt.power_w >= 0.0;
            if !ok {
                errors.push(ConfigError::new(
                    &format!("pump.points[{i}]"),
                    "flow_m3h and power_w must be finite and >= 0",
                ));
            }
        }

        let prof = &self.profile;
        match prof.model.as_str() {
            "file" => {
                if prof.path.is_none() {
                    errors.push(ConfigError::new(
                        "profile.path",
                        "required when profile.model = \"file\"",
                    ));
                }
            }
            "synthetic" => {
                if prof.sunrise_hour >= prof.sunset_hour {
                    errors.push(ConfigError::new(
                        "profile.sunrise_hour",
                        "must be < profile.sunset_hour",
                    ));
                }
                if prof.sunset_hour > HOURS_PER_DAY {
                    errors.push(ConfigError::new("profile.sunset_hour", "must be <= 24"));
                }
                if !(0.0..=1.0).contains(&prof.seasonal_amplitude) {
                    errors.push(ConfigError::new(
                        "profile.seasonal_amplitude",
                        "must be in [0.0, 1.0]",
                    ));
                }
                if !(prof.noise_std.is_finite() && prof.noise_std >= 0.0) {
                    errors.push(ConfigError::new("profile.noise_std", "must be >= 0"));
                }
                if !(prof.peak_w.is_finite() && prof.peak_w >= 0.0) {
                    errors.push(ConfigError::new("profile.peak_w", "must be >= 0"));
                }
            }
            "flat" => {
                if prof.flat_first_hour > prof.flat_last_hour {
                    errors.push(ConfigError::new(
                        "profile.flat_first_hour",
                        "must be <= profile.flat_last_hour",
                    ));
                }
                if prof.flat_last_hour >= HOURS_PER_DAY {
                    errors.push(ConfigError::new("profile.flat_last_hour", "must be <= 23"));
                }
                if !(prof.flat_power_w.is_finite() && prof.flat_power_w >= 0.0) {
                    errors.push(ConfigError::new("profile.flat_power_w", "must be >= 0"));
                }
            }
            other => errors.push(ConfigError::new(
                "profile.model",
                format!("must be \"file\", \"synthetic\" or \"flat\", got \"{other}\""),
            )),
        }
        if !(prof.scale.is_finite() && prof.scale >= 0.0) {
            errors.push(ConfigError::new("profile.scale", "must be >= 0"));
        }

        errors
    }

    /// Loads or generates the profile and builds the simulation configuration.
    ///
    /// Call [`ScenarioConfig::validate`] first for field-level messages; this
    /// reports the first error the model constructors raise themselves.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the resource file is malformed or the pump
    /// and system parameters are rejected.
    pub fn prepare(&self) -> Result<PreparedScenario, ScenarioError> {
        let prof = &self.profile;
        let (profile, ingested) = match prof.model.as_str() {
            "file" => {
                let path = prof.path.as_ref().ok_or(ScenarioError::MissingProfilePath)?;
                let path = match &self.base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                info!(path = %path.display(), "reading solar resource file");
                let reader = ProfileReader {
                    min_rows: prof.min_rows,
                };
                let ingested = reader.read_path(&path)?;
                (ingested.profile.clone(), Some(ingested))
            }
            "flat" => (
                MonthlyProfile::flat(prof.flat_power_w, prof.flat_first_hour, prof.flat_last_hour),
                None,
            ),
            _ => (clear_sky(&prof.clear_sky_params())?, None),
        };

        let pump = PumpCurve::new(&self.pump.points, self.pump.reference_head_m)?;
        let simulation = SimulationConfig::new(
            self.system.head_m,
            self.system.tank_capacity_l,
            self.system.daily_demand_l,
            profile.scaled(prof.scale),
            pump,
        )?;

        Ok(PreparedScenario {
            simulation,
            ingested,
        })
    }
}
