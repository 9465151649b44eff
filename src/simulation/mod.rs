//! # Trip and State-of-Charge Simulation
//!
//! Generates synthetic multi-day EV usage traces.
//!
//! ## Components
//!
//! - **Sampler**: uniform draws for commute/non-commute departure, arrival and distance
//! - **Generator**: the per-day state machine (full charge, commute, non-commute trips)
//! - **Trace**: the ordered day-by-day result handed to exporters
//! - **Summary**: distance totals and petrol-car equivalents of a trace
//!
//! ## Usage
//!
//! ```rust
//! use ev_tracegen::config::{RunConfig, VehicleConfig};
//! use ev_tracegen::domain::Vehicle;
//! use ev_tracegen::simulation::TraceGenerator;
//!
//! let vehicle = Vehicle::new(&VehicleConfig::default()).unwrap();
//! let config = RunConfig {
//!     days: 7,
//!     ..Default::default()
//! };
//!
//! let mut generator = TraceGenerator::with_seed(vehicle, config, 42).unwrap();
//! let trace = generator.run();
//! assert_eq!(trace.len(), 7);
//! ```

pub mod generator;
pub mod sampler;
pub mod summary;
pub mod trace;

pub use generator::{simulate, simulate_with_rng, TraceGenerator, AVERAGE_SPEED_KMH};
pub use sampler::TripWindow;
pub use summary::{SummaryError, SummaryFactors, TraceSummary};
pub use trace::{Trace, TraceDay};
