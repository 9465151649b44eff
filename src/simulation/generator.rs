//! # Daily trip and state-of-charge engine
//!
//! Each simulated day walks the same states:
//!
//! - **DayStart**: the battery holds a full overnight charge
//! - **Commute**: present on Monday-Friday unless the day is work-from-home
//! - **NonCommute**: zero or more trips, Poisson-drawn or fixed per weekday
//! - **DayEnd**: an empty day is recorded as a single "No trips" entry
//!
//! SOC depletes sequentially within a day and never carries over to the
//! next one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};
use tracing::{debug, trace};
use validator::Validate;

use super::sampler::{self, TripWindow};
use super::Trace;
use crate::config::{ConfigError, RunConfig, TripModel};
use crate::domain::{clock_time, DayOverride, DaySchedule, Trip, TripKind, Vehicle, Weekday};

/// Average driving speed of non-commute trips (km/h)
pub const AVERAGE_SPEED_KMH: f64 = 50.0;

/// Only a fifth of a standard non-commute outing is spent driving.
const DRIVING_SHARE_DIVISOR: f64 = 5.0;

/// Trace generator for one vehicle and one run configuration.
pub struct TraceGenerator<R = StdRng> {
    vehicle: Vehicle,
    config: RunConfig,
    rng: R,
    daily_trips: Option<Poisson<f64>>,
}

impl TraceGenerator<StdRng> {
    /// Generator backed by a fresh entropy-seeded RNG; every run differs.
    pub fn new(vehicle: Vehicle, config: RunConfig) -> Result<Self, ConfigError> {
        Self::with_rng(vehicle, config, StdRng::from_entropy())
    }

    /// Reproducible generator for tests and debugging.
    pub fn with_seed(vehicle: Vehicle, config: RunConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(vehicle, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TraceGenerator<R> {
    pub fn with_rng(vehicle: Vehicle, config: RunConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        // Poisson needs a strictly positive mean; zero weekly trips means none.
        let daily_trips = Poisson::new(config.non_commute_rate_per_day()).ok();

        Ok(Self {
            vehicle,
            config,
            rng,
            daily_trips,
        })
    }

    /// Simulate every configured day.
    pub fn run(&mut self) -> Trace {
        debug!(
            days = self.config.days,
            model = %self.config.model,
            rate_per_day = self.config.non_commute_rate_per_day(),
            "generating EV usage trace"
        );

        let mut trace = Trace::with_capacity(self.config.days as usize);
        for day in 0..self.config.days {
            let trips = self.simulate_day(day);
            trace!(day = day + 1, trips = trips.len(), "simulated day");
            trace.push(day + 1, trips);
        }
        trace
    }

    /// Trips of zero-based day `day`, starting from a full battery.
    pub fn simulate_day(&mut self, day: u32) -> Vec<Trip> {
        let schedule = DaySchedule::for_day(day, &self.config);
        let mut day_log = DayLog::new(self.vehicle, schedule.weekday);

        if schedule.commutes() {
            let commute = &self.config.commute;
            let window = sampler::sample_commute_window(&mut self.rng, commute);
            let distance_km = sampler::sample_commute_distance(&mut self.rng, commute.distance_km);
            day_log.drive(
                TripKind::Commute,
                window,
                distance_km,
                commute.travel_minutes(),
            );
        }

        match (self.config.model, schedule.day_override) {
            (TripModel::Extended, Some(fixed)) => drive_fixed(&mut day_log, &fixed),
            (model, _) => {
                let count = self.draw_non_commute_count();
                for _ in 0..count {
                    let window =
                        sampler::sample_non_commute_window(&mut self.rng, model == TripModel::Standard);
                    let (distance_km, driving_hours) = non_commute_leg(model, window);
                    day_log.drive(
                        TripKind::NonCommute,
                        window,
                        distance_km,
                        minutes(driving_hours),
                    );
                }
            }
        }

        day_log.finish()
    }

    fn draw_non_commute_count(&mut self) -> u64 {
        match &self.daily_trips {
            Some(poisson) => poisson.sample(&mut self.rng) as u64,
            None => 0,
        }
    }
}

/// Run a full simulation with a fresh unseeded generator.
pub fn simulate(vehicle: &Vehicle, config: &RunConfig) -> Result<Trace, ConfigError> {
    Ok(TraceGenerator::new(*vehicle, config.clone())?.run())
}

/// Run a full simulation drawing from a caller-supplied generator.
pub fn simulate_with_rng<R: Rng>(
    vehicle: &Vehicle,
    config: &RunConfig,
    rng: &mut R,
) -> Result<Trace, ConfigError> {
    Ok(TraceGenerator::with_rng(*vehicle, config.clone(), rng)?.run())
}

/// Distance and driving time of a sampled non-commute trip.
///
/// Standard: only a fifth of the outing is driving, at 50 km/h, halved to
/// a one-way leg. Extended: the whole outing is driven at 50 km/h.
fn non_commute_leg(model: TripModel, window: TripWindow) -> (f64, f64) {
    match model {
        TripModel::Standard => {
            let driving_hours = window.span_hours() / DRIVING_SHARE_DIVISOR;
            (driving_hours * AVERAGE_SPEED_KMH / 2.0, driving_hours)
        }
        TripModel::Extended => {
            let driving_hours = window.span_hours();
            (driving_hours * AVERAGE_SPEED_KMH, driving_hours)
        }
    }
}

fn drive_fixed(day_log: &mut DayLog, fixed: &DayOverride) {
    let window = TripWindow {
        departure_hour: fixed.departure_hour,
        arrival_hour: fixed.arrival_hour,
    };
    for _ in 0..fixed.count {
        day_log.drive(
            TripKind::NonCommute,
            window,
            fixed.distance_km,
            minutes(window.span_hours()),
        );
    }
}

fn minutes(hours: f64) -> u32 {
    (hours * 60.0).round() as u32
}

/// Running state of one day: the SOC carried from trip to trip.
struct DayLog {
    vehicle: Vehicle,
    weekday: Weekday,
    soc_kwh: f64,
    trips: Vec<Trip>,
}

impl DayLog {
    fn new(vehicle: Vehicle, weekday: Weekday) -> Self {
        Self {
            vehicle,
            weekday,
            soc_kwh: vehicle.full_charge_kwh(),
            trips: Vec::new(),
        }
    }

    fn drive(&mut self, kind: TripKind, window: TripWindow, distance_km: f64, duration_min: u32) {
        let soc_start_kwh = self.soc_kwh;
        let soc_end_kwh = self.vehicle.soc_after_trip(distance_km, soc_start_kwh);
        self.trips.push(Trip::Regular {
            weekday: self.weekday,
            kind,
            departure: clock_time(window.departure_hour),
            soc_start_kwh,
            arrival: clock_time(window.arrival_hour),
            soc_end_kwh,
            distance_km,
            duration_min,
        });
        self.soc_kwh = soc_end_kwh;
    }

    fn finish(mut self) -> Vec<Trip> {
        if self.trips.is_empty() {
            self.trips.push(Trip::NoTrips {
                weekday: self.weekday,
                soc_kwh: self.vehicle.full_charge_kwh(),
            });
        }
        self.trips
    }
}
