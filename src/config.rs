use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::domain::{WeekdayOverrides, WorkFromHome};
use crate::export::ExportFormat;

/// Configuration file read when none is given explicitly. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "config/default.toml";

/// Prefix of environment overrides, e.g. `EVGEN__VEHICLE__BATTERY_KWH=60`
pub const ENV_PREFIX: &str = "EVGEN__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(#[from] validator::ValidationErrors),
    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
}

/// Which flavour of the trip engine to run.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TripModel {
    /// Poisson-drawn non-commute trips every day
    #[default]
    Standard,
    /// Per-weekday fixed non-commute trips, Poisson draw elsewhere
    Extended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_soc_window"))]
pub struct VehicleConfig {
    /// Usable battery capacity (kWh)
    #[validate(range(exclusive_min = 0.0))]
    pub battery_kwh: f64,
    /// Fraction of capacity after an overnight charge
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_soc: f64,
    /// Fraction of capacity the battery never drops below
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_soc: f64,
    /// Energy use (Wh/km)
    #[validate(range(exclusive_min = 0.0))]
    pub consumption_wh_per_km: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            battery_kwh: 40.0,
            max_soc: 0.8,
            min_soc: 0.2,
            consumption_wh_per_km: 164.0,
        }
    }
}

/// Range rules compare, and NaN fails no comparison, so every float field
/// goes through this before any schema check.
pub(crate) fn ensure_finite(fields: &[(&str, f64)]) -> Result<(), ValidationError> {
    if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
        let mut err = ValidationError::new("not_finite");
        err.message = Some(format!("{name} must be a finite number").into());
        return Err(err);
    }
    Ok(())
}

fn validate_soc_window(vehicle: &VehicleConfig) -> Result<(), ValidationError> {
    ensure_finite(&[
        ("battery_kwh", vehicle.battery_kwh),
        ("max_soc", vehicle.max_soc),
        ("min_soc", vehicle.min_soc),
        ("consumption_wh_per_km", vehicle.consumption_wh_per_km),
    ])?;
    if vehicle.max_soc < vehicle.min_soc {
        let mut err = ValidationError::new("soc_window");
        err.message = Some("max_soc must not be below min_soc".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_commute_window"))]
pub struct CommuteConfig {
    /// Typical one-way commute distance (km)
    #[validate(range(exclusive_min = 0.0))]
    pub distance_km: f64,
    /// Usual departure, fractional hours of day
    #[validate(range(min = 0.0, exclusive_max = 24.0))]
    pub departure_hour: f64,
    /// Usual return, fractional hours of day
    #[validate(range(min = 0.0, exclusive_max = 24.0))]
    pub arrival_hour: f64,
}

impl Default for CommuteConfig {
    fn default() -> Self {
        Self {
            distance_km: 20.0,
            departure_hour: 7.45,
            arrival_hour: 17.30,
        }
    }
}

impl CommuteConfig {
    /// Reported travel time of a commute trip: the configured window, not
    /// the sampled one.
    pub fn travel_minutes(&self) -> u32 {
        ((self.arrival_hour - self.departure_hour) * 60.0).round() as u32
    }
}

fn validate_commute_window(commute: &CommuteConfig) -> Result<(), ValidationError> {
    ensure_finite(&[
        ("commute distance_km", commute.distance_km),
        ("commute departure_hour", commute.departure_hour),
        ("commute arrival_hour", commute.arrival_hour),
    ])?;
    if commute.departure_hour >= commute.arrival_hour {
        let mut err = ValidationError::new("commute_window");
        err.message = Some("commute departure must be before arrival".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_overrides_model"))]
pub struct RunConfig {
    /// Number of simulated days; day 1 is a Monday
    #[validate(range(min = 1))]
    pub days: u32,
    #[serde(default)]
    pub work_from_home: WorkFromHome,
    #[validate(nested)]
    pub commute: CommuteConfig,
    /// Weekly number of one-way non-commute trips
    pub weekly_non_commute_trips: u32,
    #[serde(default)]
    pub model: TripModel,
    #[serde(default)]
    #[validate(nested)]
    pub overrides: WeekdayOverrides,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            days: 365,
            work_from_home: WorkFromHome::default(),
            commute: CommuteConfig::default(),
            weekly_non_commute_trips: 5,
            model: TripModel::Standard,
            overrides: WeekdayOverrides::default(),
        }
    }
}

impl RunConfig {
    /// Mean of the daily Poisson draw: half the weekly one-way count spread
    /// over seven days.
    pub fn non_commute_rate_per_day(&self) -> f64 {
        (self.weekly_non_commute_trips as f64 / 2.0) / 7.0
    }
}

fn validate_overrides_model(run: &RunConfig) -> Result<(), ValidationError> {
    if run.model == TripModel::Standard && !run.overrides.is_empty() {
        let mut err = ValidationError::new("overrides_model");
        err.message = Some("weekday overrides require the extended trip model".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub path: PathBuf,
    pub format: ExportFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ev_usage.csv"),
            format: ExportFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub vehicle: VehicleConfig,
    #[validate(nested)]
    pub run: RunConfig,
    pub output: OutputSettings,
}

impl Settings {
    /// Layered sources: built-in defaults, TOML file, `EVGEN__` environment.
    /// Callers may merge further providers (CLI flags) before extracting.
    pub fn figment(file: Option<&Path>) -> Result<Figment, ConfigError> {
        let path = match file {
            Some(path) if !path.exists() => return Err(ConfigError::MissingFile(path.into())),
            Some(path) => path,
            None => Path::new(DEFAULT_CONFIG_FILE),
        };

        Ok(Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(file)?)
    }
}
