//! Solar pump simulator entry point: CLI wiring, scenario loading and output.

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use solar_pump_sim::cli::Args;
use solar_pump_sim::config::ScenarioConfig;
use solar_pump_sim::io::export::{
    export_daily_csv, export_hourly_csv, export_json, export_monthly_csv,
};
use solar_pump_sim::logging;
use solar_pump_sim::reporting::{MonthProfileTable, Report, SweepTable};
use solar_pump_sim::sim::sweep::{capacity_sweep, smallest_reliable};
use solar_pump_sim::sim::{hourly_profile, simulate};

/// Reliability a swept tank must reach to be reported as sufficient.
const SWEEP_TARGET_PCT: f64 = 100.0;

/// Loads the scenario named on the command line and applies the overrides.
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    // --scenario takes priority, then --preset, then the village default
    let mut scenario = match &args.scenario {
        Some(path) => ScenarioConfig::from_toml_file(path)?,
        None => ScenarioConfig::from_preset(args.preset_name())?,
    };

    if let Some(path) = &args.profile {
        scenario.profile.model = "file".to_string();
        scenario.profile.path = Some(path.clone());
        scenario.base_dir = None;
    }
    if let Some(head) = args.head {
        scenario.system.head_m = head;
    }
    if let Some(tank) = args.tank {
        scenario.system.tank_capacity_l = tank;
    }
    if let Some(demand) = args.demand {
        scenario.system.daily_demand_l = demand;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("scenario has {} invalid field(s)", errors.len());
    }
    Ok(scenario)
}

fn run(args: &Args) -> Result<()> {
    let scenario = load_scenario(args)?;
    let prepared = scenario.prepare()?;
    let config = &prepared.simulation;

    let result = simulate(config);

    println!(
        "{}",
        Report {
            config,
            ingested: prepared.ingested.as_ref(),
            result: &result,
        }
    );

    if let Some(month) = args.month {
        let month = usize::from(month);
        let points = hourly_profile(config, month);
        println!(
            "\n{}",
            MonthProfileTable {
                month,
                points: &points,
            }
        );
    }

    if !args.sweep.is_empty() {
        let points = capacity_sweep(config, &args.sweep)?;
        println!("\n{}", SweepTable(&points));
        match smallest_reliable(&points, SWEEP_TARGET_PCT) {
            Some(p) => println!(
                "Smallest tank meeting demand every day: {:.0} L",
                p.tank_capacity_l
            ),
            None => println!("No swept tank meets demand every day"),
        }
    }

    if let Some(path) = &args.hourly_out {
        export_hourly_csv(&result.hours, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "hourly records written");
    }
    if let Some(path) = &args.daily_out {
        export_daily_csv(&result.days, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "daily records written");
    }
    if let Some(path) = &args.monthly_out {
        export_monthly_csv(&result.months, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "monthly summaries written");
    }
    if let Some(path) = &args.json_out {
        export_json(&result, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "JSON result written");
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
