//! CSV and JSON export for simulation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::kpi::MonthSummary;
use crate::sim::types::{DayRecord, HourRecord};

/// Column header for the hourly CSV export.
const HOURLY_HEADER: &str =
    "month,day,hour,power_w,pumped_l,demand_l,deficit_l,overflow_l,stored_l,fill_fraction";

/// Column header for the daily CSV export.
const DAILY_HEADER: &str =
    "day_of_year,month,day,pumped_l,demand_l,delivered_l,deficit_l,overflow_l,served";

/// Column header for the monthly CSV export.
const MONTHLY_HEADER: &str = "month,days,pumped_l,avg_daily_pumped_l,demand_l,deficit_l,\
                              overflow_l,days_not_served,reliability_pct";

fn volume(v: f64) -> String {
    format!("{v:.3}")
}

fn create(path: &Path) -> io::Result<io::BufWriter<File>> {
    Ok(io::BufWriter::new(File::create(path)?))
}

/// Writes one row per simulated hour as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_hourly_csv(hours: &[HourRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HOURLY_HEADER.split(','))?;

    for h in hours {
        wtr.write_record(&[
            h.month.to_string(),
            h.day.to_string(),
            h.hour.to_string(),
            format!("{:.2}", h.power_w),
            volume(h.pumped_l),
            volume(h.demand_l),
            volume(h.deficit_l),
            volume(h.overflow_l),
            volume(h.stored_l),
            format!("{:.4}", h.fill_fraction),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes one row per simulated day as CSV to any writer.
///
/// `day_of_year` is written 1-based.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_daily_csv(days: &[DayRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DAILY_HEADER.split(','))?;

    for d in days {
        wtr.write_record(&[
            (d.day_of_year + 1).to_string(),
            d.month.to_string(),
            d.day.to_string(),
            volume(d.pumped_l),
            volume(d.demand_l),
            volume(d.delivered_l),
            volume(d.deficit_l),
            volume(d.overflow_l),
            d.served.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the twelve monthly summaries as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_monthly_csv(months: &[MonthSummary], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(MONTHLY_HEADER.split(',').map(str::trim))?;

    for m in months {
        wtr.write_record(&[
            m.month.to_string(),
            m.days.to_string(),
            volume(m.pumped_l),
            volume(m.avg_daily_pumped_l),
            volume(m.demand_l),
            volume(m.deficit_l),
            volume(m.overflow_l),
            m.days_not_served.to_string(),
            format!("{:.3}", m.reliability_pct),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Serializes any result value as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json<T: Serialize + ?Sized>(value: &T, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

/// Exports hourly records to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_hourly_csv(hours: &[HourRecord], path: &Path) -> io::Result<()> {
    write_hourly_csv(hours, create(path)?)
}

/// Exports daily records to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_daily_csv(days: &[DayRecord], path: &Path) -> io::Result<()> {
    write_daily_csv(days, create(path)?)
}

/// Exports monthly summaries to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_monthly_csv(months: &[MonthSummary], path: &Path) -> io::Result<()> {
    write_monthly_csv(months, create(path)?)
}

/// Exports a value as JSON to a file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> io::Result<()> {
    write_json(value, create(path)?)
}
