use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{HOURS_PER_DAY, MONTHS, MonthlyProfile};
use crate::error::ConfigurationError;

/// Parameters of a generated clear-sky profile.
#[derive(Debug, Clone)]
pub struct ClearSkyParams {
    /// Peak output at solar noon in an average month (W).
    pub peak_w: f64,
    /// First daylight hour (inclusive).
    pub sunrise_hour: usize,
    /// Last daylight hour (exclusive).
    pub sunset_hour: usize,
    /// Relative swing of the noon peak between winter and summer (0.0–1.0).
    pub seasonal_amplitude: f64,
    /// Standard deviation of the per-bucket multiplicative noise.
    pub noise_std: f64,
    /// Seed for reproducible noise.
    pub seed: u64,
}

impl Default for ClearSkyParams {
    fn default() -> Self {
        Self {
            peak_w: 800.0,
            sunrise_hour: 6,
            sunset_hour: 19,
            seasonal_amplitude: 0.3,
            noise_std: 0.05,
            seed: 42,
        }
    }
}

/// Half-sine daylight shape, 0 outside `[sunrise, sunset)`.
///
/// Evaluated at the middle of the hour so the first and last daylight hours
/// carry a small non-zero share.
pub fn daylight_frac(hour: usize, sunrise: usize, sunset: usize) -> f64 {
    if hour < sunrise || hour >= sunset || sunset <= sunrise {
        return 0.0;
    }
    let x = (hour - sunrise) as f64 + 0.5;
    let span = (sunset - sunrise) as f64;
    (std::f64::consts::PI * x / span).sin()
}

/// Noon-peak multiplier for `month` (1–12), highest in late June.
pub fn seasonal_factor(month: usize, amplitude: f64) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * (month as f64 - 6.5) / MONTHS as f64;
    (1.0 + amplitude * phase.cos()).max(0.0)
}

/// Builds a northern-hemisphere clear-sky profile with seeded noise.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidDaylight`] if `sunrise_hour >= sunset_hour`
/// or `sunset_hour > 24`.
pub fn clear_sky(params: &ClearSkyParams) -> Result<MonthlyProfile, ConfigurationError> {
    if params.sunrise_hour >= params.sunset_hour || params.sunset_hour > HOURS_PER_DAY {
        return Err(ConfigurationError::InvalidDaylight {
            sunrise_hour: params.sunrise_hour,
            sunset_hour: params.sunset_hour,
        });
    }
    let mut rng = StdRng::seed_from_u64(params.seed);
    let peak = params.peak_w.max(0.0);
    let mut rows = [[0.0; HOURS_PER_DAY]; MONTHS];

    for (m, row) in rows.iter_mut().enumerate() {
        let season = seasonal_factor(m + 1, params.seasonal_amplitude);
        for (h, v) in row.iter_mut().enumerate() {
            let frac = daylight_frac(h, params.sunrise_hour, params.sunset_hour);
            if frac <= 0.0 {
                continue;
            }
            let noise = 1.0 + gaussian_noise(&mut rng, params.noise_std);
            *v = (peak * season * frac * noise).max(0.0);
        }
    }

    Ok(MonthlyProfile::from_rows(rows))
}

/// Zero-mean Gaussian sample via the Box-Muller transform.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
