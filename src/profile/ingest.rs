//! Hourly resource time series to [`MonthlyProfile`].
//!
//! Accepts the line-oriented exports produced by PVGIS-style tools: an optional
//! `key: value` preamble, a header whose first column is `time`, and rows
//! starting with `YYYYMMDD:HHMM`. Values sharing a (month, hour-of-day) key are
//! averaged over the whole file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::metadata::SiteMetadata;
use super::{HOURS_PER_DAY, MONTHS, MonthlyProfile};
use crate::error::MalformedInput;

/// Label of the direct PV output column.
pub const POWER_LABEL: &str = "P";
/// Accepted spellings of the irradiance column.
pub const IRRADIANCE_LABELS: &[&str] = &["G(i)", "G(h)", "GHI"];
/// Default minimum number of usable rows.
pub const DEFAULT_MIN_ROWS: usize = 100;
/// Lines searched for the header row before giving up.
pub const HEADER_SEARCH_LINES: usize = 200;

/// Which kind of column the profile was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceColumn {
    /// PV system output in W.
    Power,
    /// Plane-of-array or horizontal irradiance in W/m², roughly the output in W
    /// of a 1 kWp reference array.
    Irradiance,
}

impl fmt::Display for ResourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power => write!(f, "PV power (W)"),
            Self::Irradiance => write!(f, "irradiance (W/m²)"),
        }
    }
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestedProfile {
    pub profile: MonthlyProfile,
    pub column: ResourceColumn,
    /// Header label of the column that was averaged.
    pub column_label: String,
    pub metadata: SiteMetadata,
    /// Rows that contributed a value.
    pub rows_used: usize,
    /// Data-section rows skipped because the timestamp or value did not parse.
    pub rows_skipped: usize,
    /// (month, hour) buckets without any contributing row; these read as 0.
    pub empty_buckets: usize,
}

/// Resource file parser.
///
/// # Examples
///
/// ```
/// use solar_pump_sim::profile::ProfileReader;
///
/// let reader = ProfileReader { min_rows: 1 };
/// let parsed = reader.read_str("time,P\n20200115:1210,420.0\n").unwrap();
/// assert_eq!(parsed.profile.value(1, 12), 420.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProfileReader {
    /// Fewer recovered rows than this is reported as [`MalformedInput::TooFewRows`].
    pub min_rows: usize,
}

impl Default for ProfileReader {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_MIN_ROWS,
        }
    }
}

/// Parses `text` with the default [`ProfileReader`].
///
/// # Errors
///
/// See [`ProfileReader::read_str`].
pub fn ingest(text: &str) -> Result<IngestedProfile, MalformedInput> {
    ProfileReader::default().read_str(text)
}

impl ProfileReader {
    /// Reads and parses a resource file.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInput::Unreadable`] if the file cannot be read, or any
    /// error of [`ProfileReader::read_str`].
    pub fn read_path(&self, path: &Path) -> Result<IngestedProfile, MalformedInput> {
        let text = fs::read_to_string(path).map_err(|e| MalformedInput::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.read_str(&text)
    }

    /// Parses resource text into a monthly profile.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedInput`] if no header is found, neither resource
    /// column is present, or fewer than `min_rows` rows are usable.
    pub fn read_str(&self, text: &str) -> Result<IngestedProfile, MalformedInput> {
        let metadata = SiteMetadata::parse(text);
        let header = find_header(text)?;
        let (column, column_index) = select_column(&header.columns)?;
        let column_label = header.columns[column_index].clone();
        debug!(
            line = header.line_number,
            column = %column_label,
            delimiter = %(header.delimiter as char).escape_default(),
            "located resource header"
        );

        let mut sums = [[0.0_f64; HOURS_PER_DAY]; MONTHS];
        let mut counts = [[0_usize; HOURS_PER_DAY]; MONTHS];
        let mut rows_used = 0_usize;
        let mut rows_skipped = 0_usize;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(header.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text[header.data_offset..].as_bytes());

        for record in reader.records() {
            let Ok(record) = record else {
                rows_skipped += 1;
                continue;
            };
            if record.iter().all(str::is_empty) {
                continue;
            }
            let key = record.get(0).and_then(parse_timestamp);
            let value = record
                .get(column_index)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite());
            match (key, value) {
                (Some((month, hour)), Some(v)) => {
                    sums[month - 1][hour] += v;
                    counts[month - 1][hour] += 1;
                    rows_used += 1;
                }
                _ => rows_skipped += 1,
            }
        }

        if rows_used < self.min_rows {
            return Err(MalformedInput::TooFewRows {
                recovered: rows_used,
                minimum: self.min_rows,
            });
        }

        let mut means = [[0.0_f64; HOURS_PER_DAY]; MONTHS];
        let mut empty_buckets = 0;
        for m in 0..MONTHS {
            for h in 0..HOURS_PER_DAY {
                if counts[m][h] == 0 {
                    empty_buckets += 1;
                } else {
                    means[m][h] = sums[m][h] / counts[m][h] as f64;
                }
            }
        }

        if empty_buckets > 0 {
            warn!(
                empty_buckets,
                "some (month, hour) buckets had no data and read as 0; the profile is biased low"
            );
        }
        info!(
            rows_used,
            rows_skipped,
            column = %column,
            label = %column_label,
            "ingested solar profile"
        );

        Ok(IngestedProfile {
            profile: MonthlyProfile::from_rows(means),
            column,
            column_label,
            metadata,
            rows_used,
            rows_skipped,
            empty_buckets,
        })
    }
}

struct Header {
    line_number: usize,
    columns: Vec<String>,
    delimiter: u8,
    /// Byte offset of the first line after the header.
    data_offset: usize,
}

fn find_header(text: &str) -> Result<Header, MalformedInput> {
    let mut offset = 0;
    for (line_number, raw) in text.split_inclusive('\n').take(HEADER_SEARCH_LINES).enumerate() {
        let line = raw.trim_end_matches(['\r', '\n']);
        offset += raw.len();

        let delimiter = if line.contains('\t') && !line.contains(',') {
            b'\t'
        } else {
            b','
        };
        let columns: Vec<String> = line
            .split(delimiter as char)
            .map(|c| c.trim().to_string())
            .collect();
        if columns.first().is_some_and(|first| is_time_label(first)) {
            return Ok(Header {
                line_number: line_number + 1,
                columns,
                delimiter,
                data_offset: offset,
            });
        }
    }
    Err(MalformedInput::MissingHeader {
        searched: HEADER_SEARCH_LINES,
    })
}

/// `time`, optionally qualified as in `time(UTC)`, ignoring case.
fn is_time_label(token: &str) -> bool {
    let Some(prefix) = token.get(..4) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case("time") {
        return false;
    }
    let rest = token[4..].trim_start();
    rest.is_empty() || (rest.starts_with('(') && rest.ends_with(')'))
}

fn select_column(columns: &[String]) -> Result<(ResourceColumn, usize), MalformedInput> {
    if let Some(i) = columns.iter().position(|c| c == POWER_LABEL) {
        return Ok((ResourceColumn::Power, i));
    }
    for label in IRRADIANCE_LABELS {
        if let Some(i) = columns.iter().position(|c| c == label) {
            return Ok((ResourceColumn::Irradiance, i));
        }
    }
    Err(MalformedInput::MissingResourceColumn {
        columns: columns.to_vec(),
        accepted: IRRADIANCE_LABELS.join(", "),
    })
}

/// Extracts `(month, hour)` from `YYYYMMDD[:HHMM]`.
fn parse_timestamp(field: &str) -> Option<(usize, usize)> {
    let (date, time) = match field.split_once(':') {
        Some((d, t)) => (d, Some(t)),
        None => (field, None),
    };
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: usize = date[4..6].parse().ok()?;
    let hour: usize = match time {
        Some(t) => {
            let hh = t.get(..2)?;
            if !hh.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            hh.parse().ok()?
        }
        None => 0,
    };
    if !(1..=MONTHS).contains(&month) || hour >= HOURS_PER_DAY {
        return None;
    }
    Some((month, hour))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(min_rows: usize) -> ProfileReader {
        ProfileReader { min_rows }
    }

    #[test]
    fn timestamp_pattern() {
        assert_eq!(parse_timestamp("20200315:1310"), Some((3, 13)));
        assert_eq!(parse_timestamp("20201231:2300"), Some((12, 23)));
        assert_eq!(parse_timestamp("20200701"), Some((7, 0)));
        assert_eq!(parse_timestamp("2020031:1310"), None);
        assert_eq!(parse_timestamp("20201315:1310"), None);
        assert_eq!(parse_timestamp("20200315:2510"), None);
        assert_eq!(parse_timestamp("20200315:x"), None);
        assert_eq!(parse_timestamp("P: PV system power (W)"), None);
    }

    #[test]
    fn averages_same_month_and_hour() {
        let text = "time,P,G(i)\n\
                    20190101:1010,100.0,900\n\
                    20200101:1010,300.0,900\n\
                    20200102:1110,50.0,900\n";
        let parsed = reader(1).read_str(text).ok();
        let p = parsed.as_ref().map(|p| &p.profile);
        assert_eq!(p.map(|p| p.value(1, 10)), Some(200.0));
        assert_eq!(p.map(|p| p.value(1, 11)), Some(50.0));
        assert_eq!(p.map(|p| p.value(2, 10)), Some(0.0));
        assert_eq!(parsed.map(|p| p.column), Some(ResourceColumn::Power));
    }

    #[test]
    fn falls_back_to_irradiance() {
        let text = "time,G(i),T2m\n20200601:1200,812.5,21.0\n";
        let parsed = reader(1).read_str(text).ok();
        assert_eq!(parsed.as_ref().map(|p| p.column), Some(ResourceColumn::Irradiance));
        assert_eq!(parsed.as_ref().map(|p| p.column_label.as_str()), Some("G(i)"));
        assert_eq!(parsed.map(|p| p.profile.value(6, 12)), Some(812.5));
    }

    #[test]
    fn tab_delimited_header_and_rows() {
        let text = "Latitude: 1.0\nTIME\tGHI\n20200601:1200\t700\n";
        let parsed = reader(1).read_str(text).ok();
        assert_eq!(parsed.as_ref().map(|p| p.profile.value(6, 12)), Some(700.0));
        assert_eq!(parsed.and_then(|p| p.metadata.latitude), Some(1.0));
    }

    #[test]
    fn time_label_variants() {
        assert!(is_time_label("time"));
        assert!(is_time_label("Time"));
        assert!(is_time_label("time(UTC)"));
        assert!(is_time_label("TIME (UTC)"));
        assert!(!is_time_label("timestamp"));
        assert!(!is_time_label("time_utc"));
        assert!(!is_time_label("tim"));
        assert!(!is_time_label("date"));
    }

    #[test]
    fn tmy_header_with_utc_qualifier() {
        let mut text = String::from(
            "Latitude (decimal degrees):\t45.000\n\
             Longitude (decimal degrees):\t8.000\n\
             time(UTC),T2m,RH,G(h),Gb(n),Gd(h)\n",
        );
        for day in 1..=10 {
            for hour in 0..24 {
                let g = if (6..18).contains(&hour) { 400.0 } else { 0.0 };
                text.push_str(&format!("200501{day:02}:{hour:02}00,5.0,80,{g},0,0\n"));
            }
        }
        let parsed = reader(200).read_str(&text).ok();
        assert_eq!(parsed.as_ref().map(|p| p.column), Some(ResourceColumn::Irradiance));
        assert_eq!(parsed.as_ref().map(|p| p.column_label.as_str()), Some("G(h)"));
        assert_eq!(parsed.as_ref().map(|p| p.rows_used), Some(240));
        assert_eq!(parsed.as_ref().map(|p| p.profile.value(1, 12)), Some(400.0));
        assert_eq!(parsed.and_then(|p| p.metadata.latitude), Some(45.0));
    }

    #[test]
    fn tab_delimited_tmy_header() {
        let text = "time(UTC)\tT2m\tG(h)\n20050601:1200\t20.0\t650\n";
        let parsed = reader(1).read_str(text).ok();
        assert_eq!(parsed.as_ref().map(|p| p.column_label.as_str()), Some("G(h)"));
        assert_eq!(parsed.map(|p| p.profile.value(6, 12)), Some(650.0));
    }

    #[test]
    fn missing_header_is_malformed() {
        let err = reader(1).read_str("date,P\n20200101:0000,1\n").err();
        assert!(matches!(err, Some(MalformedInput::MissingHeader { .. })));
    }

    #[test]
    fn missing_column_is_malformed() {
        let err = reader(1).read_str("time,T2m\n20200101:0000,1\n").err();
        assert!(matches!(err, Some(MalformedInput::MissingResourceColumn { .. })));
    }

    #[test]
    fn too_few_rows_is_reported() {
        let err = ingest("time,P\n20200101:0000,1\n").err();
        assert_eq!(
            err,
            Some(MalformedInput::TooFewRows {
                recovered: 1,
                minimum: DEFAULT_MIN_ROWS
            })
        );
    }

    #[test]
    fn skips_footer_and_garbage_rows() {
        let text = "time,P\n\
                    20200101:1200,10\n\
                    20200101:1300,n/a\n\
                    \n\
                    P: PV system power (W)\n\
                    PVGIS (c) European Union, 2001-2024\n";
        let parsed = reader(1).read_str(text).ok();
        assert_eq!(parsed.as_ref().map(|p| p.rows_used), Some(1));
        assert_eq!(parsed.as_ref().map(|p| p.rows_skipped), Some(3));
        assert_eq!(
            parsed.map(|p| p.empty_buckets),
            Some(MONTHS * HOURS_PER_DAY - 1)
        );
    }

    #[test]
    fn crlf_line_endings() {
        let text = "time,P\r\n20200301:0910,42\r\n";
        let parsed = reader(1).read_str(text).ok();
        assert_eq!(parsed.map(|p| p.profile.value(3, 9)), Some(42.0));
    }
}
