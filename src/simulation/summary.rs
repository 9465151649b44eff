//! Aggregate statistics of a trace: distance driven and what the same
//! distance would cost in a petrol car.

use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;

use super::Trace;
use crate::domain::NO_TRIPS_MARKER;
use crate::export::csv::{DEPARTURE_COLUMN, DISTANCE_COLUMN};

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("column '{0}' not found in trace header")]
    MissingColumn(&'static str),
    #[error("row {row}: invalid distance '{value}'")]
    InvalidDistance { row: usize, value: String },
}

/// Conversion factors for the petrol-car comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryFactors {
    /// Tailpipe emissions of a comparable petrol car (g CO2/km)
    pub co2_g_per_km: f64,
    pub petrol_km_per_litre: f64,
    pub petrol_price_per_litre: f64,
}

impl Default for SummaryFactors {
    fn default() -> Self {
        Self {
            co2_g_per_km: 166.85,
            petrol_km_per_litre: 15.3052,
            petrol_price_per_litre: 1.36,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub total_distance_km: f64,
    pub trip_count: usize,
    pub days_without_trips: usize,
    pub mean_distance_per_trip_km: f64,
    pub co2_kg: f64,
    pub petrol_cost: f64,
}

impl TraceSummary {
    pub fn from_trace(trace: &Trace, factors: &SummaryFactors) -> Self {
        let mut tally = Tally::default();
        for (_, trip) in trace.trips() {
            if trip.is_no_trips() {
                tally.idle_days += 1;
            } else {
                tally.add_trip(trip.distance_km());
            }
        }
        tally.finish(factors)
    }

    /// Summarise a trace previously written in the standard CSV layout.
    pub fn from_csv<R: Read>(reader: R, factors: &SummaryFactors) -> Result<Self, SummaryError> {
        let mut rows = csv::Reader::from_reader(reader);
        let headers = rows.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(SummaryError::MissingColumn(name))
        };
        let departure_idx = column(DEPARTURE_COLUMN)?;
        let distance_idx = column(DISTANCE_COLUMN)?;

        let mut tally = Tally::default();
        for (i, record) in rows.records().enumerate() {
            let record = record?;
            if record.get(departure_idx) == Some(NO_TRIPS_MARKER) {
                tally.idle_days += 1;
                continue;
            }
            let raw = record.get(distance_idx).unwrap_or_default();
            let distance_km = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| SummaryError::InvalidDistance {
                    row: i + 1,
                    value: raw.to_string(),
                })?;
            tally.add_trip(distance_km);
        }
        Ok(tally.finish(factors))
    }
}

impl std::fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Distance (km): {:.2}", self.total_distance_km)?;
        writeln!(f, "Petrol Cost: {:.2}", self.petrol_cost)?;
        writeln!(f, "Total CO2 Emissions (kg): {:.2}", self.co2_kg)?;
        writeln!(f, "Days without trips: {}", self.days_without_trips)?;
        writeln!(f, "Number of Trips: {}", self.trip_count)?;
        write!(f, "Distance per trip: {:.2}", self.mean_distance_per_trip_km)
    }
}

#[derive(Default)]
struct Tally {
    distance_km: f64,
    trips: usize,
    idle_days: usize,
}

impl Tally {
    fn add_trip(&mut self, distance_km: f64) {
        self.distance_km += distance_km;
        self.trips += 1;
    }

    fn finish(self, factors: &SummaryFactors) -> TraceSummary {
        let mean_distance_per_trip_km = if self.trips == 0 {
            0.0
        } else {
            self.distance_km / self.trips as f64
        };

        TraceSummary {
            total_distance_km: self.distance_km,
            trip_count: self.trips,
            days_without_trips: self.idle_days,
            mean_distance_per_trip_km,
            co2_kg: self.distance_km * factors.co2_g_per_km / 1000.0,
            petrol_cost: self.distance_km / factors.petrol_km_per_litre
                * factors.petrol_price_per_litre,
        }
    }
}
