use serde::Serialize;

/// Number of leading lines inspected for `key: value` metadata.
pub const METADATA_SCAN_LINES: usize = 25;

/// Site description found in the free-text preamble of a resource file.
///
/// Display only: none of these values feed the simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteMetadata {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation_m: Option<f64>,
    /// Installed (nominal) PV capacity in kWp.
    pub installed_kwp: Option<f64>,
    pub slope_deg: Option<f64>,
    pub azimuth_deg: Option<f64>,
    /// Radiation database or other data source name.
    pub source: Option<String>,
}

impl SiteMetadata {
    /// Scans the first [`METADATA_SCAN_LINES`] lines of `text`.
    pub fn parse(text: &str) -> Self {
        let mut meta = Self::default();
        for line in text.lines().take(METADATA_SCAN_LINES) {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            if key.starts_with("latitude") {
                meta.latitude = meta.latitude.or(first_number(value));
            } else if key.starts_with("longitude") {
                meta.longitude = meta.longitude.or(first_number(value));
            } else if key.starts_with("elevation") {
                meta.elevation_m = meta.elevation_m.or(first_number(value));
            } else if key.starts_with("slope") {
                meta.slope_deg = meta.slope_deg.or(first_number(value));
            } else if key.starts_with("azimuth") {
                meta.azimuth_deg = meta.azimuth_deg.or(first_number(value));
            } else if key.contains("nominal power") || key.contains("installed") {
                meta.installed_kwp = meta.installed_kwp.or(first_number(value));
            } else if key.contains("database") || key == "source" || key == "data source" {
                if meta.source.is_none() {
                    meta.source = Some(value.to_string());
                }
            }
        }
        meta
    }

    /// True when no field was recovered.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn first_number(value: &str) -> Option<f64> {
    value
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .find_map(|tok| tok.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &str = "Latitude (decimal degrees):\t45.812\n\
                            Longitude (decimal degrees):\t-15.977\n\
                            Elevation (m):\t158\n\
                            Radiation database:\tPVGIS-SARAH2\n\
                            \n\
                            Slope: 35 deg. (optimum)\n\
                            Azimuth: 0 deg.\n\
                            Nominal power of the PV system (c-Si) (kWp):\t1.5\n\
                            time,P,G(i),T2m\n";

    #[test]
    fn parses_pvgis_preamble() {
        let meta = SiteMetadata::parse(PREAMBLE);
        assert_eq!(meta.latitude, Some(45.812));
        assert_eq!(meta.longitude, Some(-15.977));
        assert_eq!(meta.elevation_m, Some(158.0));
        assert_eq!(meta.slope_deg, Some(35.0));
        assert_eq!(meta.azimuth_deg, Some(0.0));
        assert_eq!(meta.installed_kwp, Some(1.5));
        assert_eq!(meta.source.as_deref(), Some("PVGIS-SARAH2"));
    }

    #[test]
    fn missing_preamble_is_empty() {
        let meta = SiteMetadata::parse("time,P\n20200101:0010,0.0\n");
        assert!(meta.is_empty());
    }

    #[test]
    fn ignores_lines_past_scan_window() {
        let mut text = "filler\n".repeat(METADATA_SCAN_LINES);
        text.push_str("Latitude: 10.0\n");
        assert_eq!(SiteMetadata::parse(&text).latitude, None);
    }
}
