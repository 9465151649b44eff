//! # EV usage trace generator
//!
//! Synthesizes plausible daily electric-vehicle usage traces: commute and
//! non-commute trips with departure/arrival clock times, distances and the
//! battery state of charge (kWh) before and after every trip.
//!
//! ```no_run
//! use ev_tracegen::config::{RunConfig, VehicleConfig};
//! use ev_tracegen::domain::Vehicle;
//! use ev_tracegen::simulation::simulate;
//!
//! let vehicle = Vehicle::new(&VehicleConfig::default())?;
//! let trace = simulate(&vehicle, &RunConfig::default())?;
//! assert_eq!(trace.len(), 365);
//! # Ok::<(), ev_tracegen::config::ConfigError>(())
//! ```

pub mod config;
pub mod domain;
pub mod export;
pub mod simulation;
pub mod telemetry;

pub use config::{ConfigError, RunConfig, Settings, TripModel, VehicleConfig};
pub use domain::{Trip, TripKind, Vehicle, Weekday};
pub use simulation::{simulate, simulate_with_rng, Trace, TraceGenerator, TraceSummary};
