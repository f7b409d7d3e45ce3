use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigurationError;

/// One datasheet point, measured at the curve's reference head.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PumpCurvePoint {
    /// Delivered flow (m³/h).
    pub flow_m3h: f64,
    /// Electrical input power (W).
    pub power_w: f64,
}

impl PumpCurvePoint {
    pub fn new(flow_m3h: f64, power_w: f64) -> Self {
        Self { flow_m3h, power_w }
    }
}

/// Linear piece `flow = slope * power + intercept`, valid for `power >= min_power_w`
/// up to the previous segment's lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PiecewiseSegment {
    pub slope: f64,
    pub intercept: f64,
    pub min_power_w: f64,
}

impl PiecewiseSegment {
    fn eval(&self, power_w: f64) -> f64 {
        self.slope * power_w + self.intercept
    }
}

/// Piecewise-linear power→flow curve at a given head.
///
/// Points are kept sorted by descending power. Between points the flow is
/// interpolated; below the lowest point a line through the origin is used;
/// at and above the highest point the flow is held at that point's value.
///
/// # Examples
///
/// ```
/// use solar_pump_sim::pump::{PumpCurve, PumpCurvePoint};
///
/// let curve = PumpCurve::new(&[PumpCurvePoint::new(2.0, 500.0)], 150.0).unwrap();
/// assert!((curve.flow_at(250.0) - 1.0).abs() < 1e-12);
/// assert_eq!(curve.flow_at(900.0), 2.0);
/// assert_eq!(curve.at_head(300.0).unwrap().flow_at(500.0), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PumpCurve {
    points: Vec<PumpCurvePoint>,
    reference_head_m: f64,
    segments: Vec<PiecewiseSegment>,
}

impl PumpCurve {
    /// Builds a curve from datasheet points measured at `reference_head_m`.
    ///
    /// Zero-power points are dropped. Points sharing a power keep the one that
    /// came first in `points`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the head is not positive, a point has
    /// a negative or non-finite value, or no point with positive power remains.
    pub fn new(
        points: &[PumpCurvePoint],
        reference_head_m: f64,
    ) -> Result<Self, ConfigurationError> {
        check_head("reference_head_m", reference_head_m)?;

        let mut kept = Vec::with_capacity(points.len());
        for (index, p) in points.iter().enumerate() {
            if !p.flow_m3h.is_finite() || !p.power_w.is_finite() {
                return Err(ConfigurationError::InvalidPumpPoint {
                    index,
                    reason: "flow and power must be finite".to_string(),
                });
            }
            if p.flow_m3h < 0.0 || p.power_w < 0.0 {
                return Err(ConfigurationError::InvalidPumpPoint {
                    index,
                    reason: format!(
                        "flow ({}) and power ({}) must be >= 0",
                        p.flow_m3h, p.power_w
                    ),
                });
            }
            if p.power_w > 0.0 {
                kept.push(*p);
            }
        }
        if kept.is_empty() {
            return Err(ConfigurationError::EmptyPumpCurve);
        }

        // Stable: among equal powers the first supplied point survives the dedup.
        kept.sort_by(|a, b| b.power_w.total_cmp(&a.power_w));
        kept.dedup_by(|later, earlier| later.power_w == earlier.power_w);

        for pair in kept.windows(2) {
            if pair[1].flow_m3h > pair[0].flow_m3h {
                warn!(
                    higher_power_w = pair[0].power_w,
                    lower_power_w = pair[1].power_w,
                    "pump curve is not monotonic: flow rises as power falls"
                );
            }
        }

        let segments = build_segments(&kept);
        Ok(Self {
            points: kept,
            reference_head_m,
            segments,
        })
    }

    /// Flow (m³/h) at `power_w`.
    ///
    /// Returns 0 for non-positive (or NaN) power and never extrapolates past the
    /// highest datasheet power.
    pub fn flow_at(&self, power_w: f64) -> f64 {
        if power_w.is_nan() || power_w <= 0.0 {
            return 0.0;
        }
        if power_w >= self.max_power() {
            return self.points.first().map_or(0.0, |p| p.flow_m3h);
        }
        self.segments
            .iter()
            .find(|s| power_w >= s.min_power_w)
            .map_or(0.0, |s| s.eval(power_w))
            .max(0.0)
    }

    /// Returns a curve with every flow multiplied by `reference_head_m / actual_head_m`.
    ///
    /// The returned curve's reference head is `actual_head_m`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NonPositiveHead`] if either head is not a
    /// positive finite number.
    pub fn scale_for_head(
        &self,
        reference_head_m: f64,
        actual_head_m: f64,
    ) -> Result<Self, ConfigurationError> {
        check_head("reference_head_m", reference_head_m)?;
        check_head("head_m", actual_head_m)?;
        let ratio = reference_head_m / actual_head_m;
        let points: Vec<PumpCurvePoint> = self
            .points
            .iter()
            .map(|p| PumpCurvePoint::new(p.flow_m3h * ratio, p.power_w))
            .collect();
        let segments = build_segments(&points);
        Ok(Self {
            points,
            reference_head_m: actual_head_m,
            segments,
        })
    }

    /// Rescales this curve from its own reference head to `actual_head_m`.
    ///
    /// # Errors
    ///
    /// See [`PumpCurve::scale_for_head`].
    pub fn at_head(&self, actual_head_m: f64) -> Result<Self, ConfigurationError> {
        self.scale_for_head(self.reference_head_m, actual_head_m)
    }

    /// Highest datasheet power (W); input above this is clamped.
    pub fn max_power(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.power_w)
    }

    /// Datasheet points sorted by descending power.
    pub fn points(&self) -> &[PumpCurvePoint] {
        &self.points
    }

    pub fn reference_head(&self) -> f64 {
        self.reference_head_m
    }
}

fn check_head(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositiveHead { field, value })
    }
}

/// One segment per consecutive pair plus a final segment through the origin.
///
/// `points` must be non-empty, sorted by strictly descending positive power.
fn build_segments(points: &[PumpCurvePoint]) -> Vec<PiecewiseSegment> {
    let mut segments = Vec::with_capacity(points.len());
    for pair in points.windows(2) {
        let (hi, lo) = (pair[0], pair[1]);
        let slope = (hi.flow_m3h - lo.flow_m3h) / (hi.power_w - lo.power_w);
        segments.push(PiecewiseSegment {
            slope,
            intercept: hi.flow_m3h - slope * hi.power_w,
            min_power_w: lo.power_w,
        });
    }
    if let Some(lowest) = points.last() {
        segments.push(PiecewiseSegment {
            slope: lowest.flow_m3h / lowest.power_w,
            intercept: 0.0,
            min_power_w: 0.0,
        });
    }
    segments
}
