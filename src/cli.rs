//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Preset used when neither `--scenario` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "village";

/// Solar water-pumping reliability simulator.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML scenario file.
    #[arg(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Built-in scenario: village, borehole or flat_check.
    #[arg(long)]
    pub preset: Option<String>,

    /// Solar resource file; overrides the scenario's profile source.
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Operating head in metres.
    #[arg(long)]
    pub head: Option<f64>,

    /// Tank capacity in litres.
    #[arg(long)]
    pub tank: Option<f64>,

    /// Daily demand in litres.
    #[arg(long)]
    pub demand: Option<f64>,

    /// Write 8760 hourly records as CSV.
    #[arg(long)]
    pub hourly_out: Option<PathBuf>,

    /// Write 365 daily records as CSV.
    #[arg(long)]
    pub daily_out: Option<PathBuf>,

    /// Write the 12 monthly summaries as CSV.
    #[arg(long)]
    pub monthly_out: Option<PathBuf>,

    /// Write the full result as JSON.
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Comma-separated tank capacities (L) to compare.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub sweep: Vec<f64>,

    /// Print the hour-by-hour pump output for one month (1-12).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,

    /// Debug logging for this crate.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Preset to load when no scenario file was given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or(DEFAULT_PRESET)
    }
}
