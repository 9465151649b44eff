//! Stochastic departure/arrival and distance draws.
//!
//! Every sampler takes the random number generator explicitly and keeps no
//! state of its own, so a seeded generator reproduces a trace exactly.

use rand::Rng;
use std::ops::Range;
use tracing::debug;

use crate::config::CommuteConfig;

/// Half-width of the uniform band around configured commute times (hours)
pub const COMMUTE_TIME_JITTER_HOURS: f64 = 0.25;

/// Relative half-width of the commute distance band (±10%)
pub const COMMUTE_DISTANCE_SPREAD: f64 = 0.1;

/// Arrival redraws before falling back to a deterministic arrival
pub const MAX_ARRIVAL_REDRAWS: u32 = 1000;

/// Non-commute trips leave between 08:00 and 20:00
pub const NON_COMMUTE_DEPARTURE_HOURS: Range<f64> = 8.0..20.0;

/// Non-commute trips last between 30 minutes and 2 hours
pub const NON_COMMUTE_DURATION_HOURS: Range<f64> = 0.5..2.0;

/// Departure and arrival as fractional hours of day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripWindow {
    pub departure_hour: f64,
    pub arrival_hour: f64,
}

impl TripWindow {
    pub fn span_hours(&self) -> f64 {
        self.arrival_hour - self.departure_hour
    }
}

/// Draw commute departure and arrival within the jitter band of the
/// configured times, with the arrival strictly after the departure.
///
/// The arrival is redrawn up to [`MAX_ARRIVAL_REDRAWS`] times. If every
/// draw lands before the departure, the arrival is placed halfway between
/// the departure and the top of the arrival band, which is always later
/// because `departure_hour < arrival_hour` is a validated invariant.
pub fn sample_commute_window<R: Rng + ?Sized>(rng: &mut R, commute: &CommuteConfig) -> TripWindow {
    let departure_hour = jittered(rng, commute.departure_hour);
    let latest_arrival = commute.arrival_hour + COMMUTE_TIME_JITTER_HOURS;

    for _ in 0..MAX_ARRIVAL_REDRAWS {
        let arrival_hour = jittered(rng, commute.arrival_hour);
        if arrival_hour > departure_hour {
            return TripWindow {
                departure_hour,
                arrival_hour,
            };
        }
    }

    debug!(
        departure_hour,
        redraws = MAX_ARRIVAL_REDRAWS,
        "commute arrival redraws exhausted, using fallback arrival"
    );
    TripWindow {
        departure_hour,
        arrival_hour: (departure_hour + latest_arrival) / 2.0,
    }
}

fn jittered<R: Rng + ?Sized>(rng: &mut R, hour: f64) -> f64 {
    rng.gen_range(hour - COMMUTE_TIME_JITTER_HOURS..=hour + COMMUTE_TIME_JITTER_HOURS)
}

/// One-way commute distance, uniform in `[0.9, 1.1] * typical_km`.
pub fn sample_commute_distance<R: Rng + ?Sized>(rng: &mut R, typical_km: f64) -> f64 {
    let spread = typical_km * COMMUTE_DISTANCE_SPREAD;
    rng.gen_range(typical_km - spread..=typical_km + spread)
}

/// Departure uniform in 08:00-20:00, duration uniform in 0.5-2 h.
///
/// With `wrap_midnight` an arrival at or past 24:00 is folded back into
/// the same day.
pub fn sample_non_commute_window<R: Rng + ?Sized>(rng: &mut R, wrap_midnight: bool) -> TripWindow {
    let departure_hour = rng.gen_range(NON_COMMUTE_DEPARTURE_HOURS);
    let duration_hours = rng.gen_range(NON_COMMUTE_DURATION_HOURS);
    let mut arrival_hour = departure_hour + duration_hours;
    if wrap_midnight {
        arrival_hour = wrap_past_midnight(arrival_hour);
    }

    TripWindow {
        departure_hour,
        arrival_hour,
    }
}

pub(crate) fn wrap_past_midnight(hour: f64) -> f64 {
    if hour >= 24.0 {
        hour - 24.0
    } else {
        hour
    }
}
