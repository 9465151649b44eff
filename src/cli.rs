use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use figment::{providers::Serialized, Figment};
use serde::Serialize;

use ev_tracegen::config::{ConfigError, Settings, TripModel};
use ev_tracegen::domain::{DayOverride, Weekday};
use ev_tracegen::export::ExportFormat;

/// Synthetic electric-vehicle usage trace generator.
#[derive(Debug, Parser)]
#[command(name = "ev-tracegen", version, about = "Synthetic EV usage trace generator")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate a multi-day trace and write it to a file
    Generate(GenerateArgs),

    /// Print distance and petrol-equivalent totals of a written CSV trace
    Summarize {
        /// Path to a trace CSV in the standard layout
        file: PathBuf,
    },
}

/// Every flag is optional; unset flags fall back to the configuration file,
/// `EVGEN__` environment variables and finally built-in defaults.
#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file [default: ev_usage.csv]
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Number of days to simulate [default: 365]
    #[arg(long)]
    pub days: Option<u32>,

    /// Battery capacity in kWh [default: 40]
    #[arg(long)]
    pub ev_battery: Option<f64>,

    /// Maximum state of charge as a fraction [default: 0.8]
    #[arg(long)]
    pub max_soc: Option<f64>,

    /// Minimum state of charge as a fraction [default: 0.2]
    #[arg(long)]
    pub min_soc: Option<f64>,

    /// Energy consumption in Wh/km [default: 164]
    #[arg(long)]
    pub consumption: Option<f64>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub wfh_monday: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub wfh_tuesday: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub wfh_wednesday: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub wfh_thursday: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub wfh_friday: Option<u8>,

    /// Typical one-way commute distance in km [default: 20]
    #[arg(long)]
    pub commute_distance: Option<f64>,

    /// Commute departure in fractional hours [default: 7.45]
    #[arg(long)]
    pub commute_departure: Option<f64>,

    /// Commute return in fractional hours [default: 17.30]
    #[arg(long)]
    pub commute_arrival: Option<f64>,

    /// One-way non-commute trips per week [default: 5]
    #[arg(long)]
    pub weekly_trips: Option<u32>,

    #[arg(long, value_enum)]
    pub model: Option<TripModel>,

    /// Fixed trips for a weekday (extended model), repeatable:
    /// <weekday>:<count>:<departure>:<arrival>:<distance_km>
    #[arg(long = "day-trips", value_name = "DAY_TRIPS")]
    pub day_trips: Vec<DayTripsArg>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayTripsArg {
    pub weekday: Weekday,
    pub day_override: DayOverride,
}

impl FromStr for DayTripsArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let &[weekday, count, departure, arrival, distance] = parts.as_slice() else {
            return Err(format!(
                "expected <weekday>:<count>:<departure>:<arrival>:<distance>, got '{s}'"
            ));
        };

        let weekday =
            Weekday::from_str(weekday).map_err(|_| format!("unknown weekday '{weekday}'"))?;
        let number = |field: &str, raw: &str| {
            raw.parse::<f64>()
                .map_err(|_| format!("invalid {field} '{raw}'"))
        };

        Ok(Self {
            weekday,
            day_override: DayOverride {
                count: count
                    .parse()
                    .map_err(|_| format!("invalid trip count '{count}'"))?,
                departure_hour: number("departure", departure)?,
                arrival_hour: number("arrival", arrival)?,
                distance_km: number("distance", distance)?,
            },
        })
    }
}

impl GenerateArgs {
    /// Merge the flags that were given on top of the layered configuration.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut figment = Settings::figment(self.config.as_deref())?;

        figment = layer(figment, "output.path", self.output.as_ref());
        figment = layer(figment, "output.format", self.format);
        figment = layer(figment, "run.days", self.days);
        figment = layer(figment, "vehicle.battery_kwh", self.ev_battery);
        figment = layer(figment, "vehicle.max_soc", self.max_soc);
        figment = layer(figment, "vehicle.min_soc", self.min_soc);
        figment = layer(figment, "vehicle.consumption_wh_per_km", self.consumption);
        figment = layer(figment, "run.commute.distance_km", self.commute_distance);
        figment = layer(figment, "run.commute.departure_hour", self.commute_departure);
        figment = layer(figment, "run.commute.arrival_hour", self.commute_arrival);
        figment = layer(figment, "run.weekly_non_commute_trips", self.weekly_trips);
        figment = layer(figment, "run.model", self.model);

        let wfh = [
            ("monday", self.wfh_monday),
            ("tuesday", self.wfh_tuesday),
            ("wednesday", self.wfh_wednesday),
            ("thursday", self.wfh_thursday),
            ("friday", self.wfh_friday),
        ];
        for (day, flag) in wfh {
            let key = format!("run.work_from_home.{day}");
            figment = layer(figment, &key, flag.map(|f| f == 1));
        }

        for arg in &self.day_trips {
            let key = format!("run.overrides.{}", arg.weekday.to_string().to_lowercase());
            figment = layer(figment, &key, Some(arg.day_override));
        }

        Settings::from_figment(figment)
    }
}

fn layer<T: Serialize>(figment: Figment, key: &str, value: Option<T>) -> Figment {
    match value {
        Some(value) => figment.merge(Serialized::default(key, value)),
        None => figment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["ev-tracegen", "generate"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Generate(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = generate_args(&[
            "--days",
            "30",
            "--ev-battery",
            "60",
            "--wfh-friday",
            "1",
            "--commute-distance",
            "35.5",
        ]);
        let settings = args.settings().unwrap();

        assert_eq!(settings.run.days, 30);
        assert_eq!(settings.vehicle.battery_kwh, 60.0);
        assert!(settings.run.work_from_home.friday);
        assert!(!settings.run.work_from_home.monday);
        assert_eq!(settings.run.commute.distance_km, 35.5);
        assert_eq!(settings.vehicle.max_soc, 0.8);
    }

    #[test]
    fn test_day_trips_with_extended_model() {
        let args = generate_args(&[
            "--model",
            "extended",
            "--day-trips",
            "saturday:2:10:12:30",
            "--day-trips",
            "Sun:1:9.5:11:12",
        ]);
        let settings = args.settings().unwrap();

        assert_eq!(settings.run.model, TripModel::Extended);
        let saturday = settings.run.overrides.get(Weekday::Saturday).unwrap();
        assert_eq!(saturday.count, 2);
        assert_eq!(saturday.distance_km, 30.0);
        let sunday = settings.run.overrides.get(Weekday::Sunday).unwrap();
        assert_eq!(sunday.departure_hour, 9.5);
    }

    #[test]
    fn test_day_trips_rejected_for_standard_model() {
        let args = generate_args(&["--day-trips", "saturday:2:10:12:30"]);
        assert!(matches!(args.settings(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_day_trips_rejected() {
        let args = generate_args(&["--model", "extended", "--day-trips", "sat:1:12:10:5"]);
        assert!(matches!(args.settings(), Err(ConfigError::Invalid(_))));
    }

    #[rstest]
    #[case("1.5")]
    #[case("NaN")]
    fn test_max_soc_rejected(#[case] value: &str) {
        let args = generate_args(&["--max-soc", value]);
        assert!(matches!(args.settings(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let args = generate_args(&["--config", "/nonexistent/ev.toml"]);
        assert!(matches!(args.settings(), Err(ConfigError::MissingFile(_))));
    }

    #[rstest]
    #[case("--wfh-monday", "2")]
    #[case("--format", "xml")]
    #[case("--model", "hybrid")]
    #[case("--day-trips", "saturday:2:10")]
    #[case("--day-trips", "someday:2:10:12:30")]
    fn test_rejected_at_parse(#[case] flag: &str, #[case] value: &str) {
        let result = Cli::try_parse_from(["ev-tracegen", "generate", flag, value]);
        assert!(result.is_err());
    }

    #[test]
    fn test_summarize_subcommand() {
        let cli = Cli::try_parse_from(["ev-tracegen", "--log-json", "summarize", "trace.csv"]).unwrap();
        assert!(cli.log_json);
        assert!(matches!(cli.command, Command::Summarize { ref file } if *file == PathBuf::from("trace.csv")));
    }
}
