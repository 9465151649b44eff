mod cli;

use std::fs::File;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ev_tracegen::config::ConfigError;
use ev_tracegen::domain::Vehicle;
use ev_tracegen::export::write_trace_file;
use ev_tracegen::simulation::{simulate, SummaryFactors, TraceSummary};
use ev_tracegen::telemetry::init_tracing;
use tracing::{info, warn};

use cli::{Cli, Command, GenerateArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<ConfigError>() => {
            eprintln!("Input Error: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Generate(args) => generate(&args),
        Command::Summarize { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("cannot open trace {}", file.display()))?;
            let summary = TraceSummary::from_csv(reader, &SummaryFactors::default())
                .with_context(|| format!("cannot summarize {}", file.display()))?;
            println!("{summary}");
            Ok(())
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let settings = args.settings()?;
    let vehicle = Vehicle::new(&settings.vehicle)?;

    if settings.vehicle.max_soc == settings.vehicle.min_soc {
        warn!("max_soc equals min_soc; every trip will report the same SOC");
    }

    info!(
        days = settings.run.days,
        model = %settings.run.model,
        battery_kwh = vehicle.battery_kwh(),
        "generating EV usage trace"
    );

    let trace = simulate(&vehicle, &settings.run)?;
    write_trace_file(
        &settings.output.path,
        &trace,
        settings.run.model,
        settings.output.format,
    )?;

    let summary = TraceSummary::from_trace(&trace, &SummaryFactors::default());
    info!(
        trips = summary.trip_count,
        total_distance_km = summary.total_distance_km,
        days_without_trips = summary.days_without_trips,
        "trace complete"
    );
    println!("EV usage data saved to {}", settings.output.path.display());
    Ok(())
}
