use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::Weekday;

/// Marker written in place of a departure time for a day without trips.
pub const NO_TRIPS_MARKER: &str = "No trips";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripKind {
    Commute,
    NonCommute,
}

/// One record of a daily trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trip {
    /// A trip that was actually driven
    Regular {
        weekday: Weekday,
        kind: TripKind,
        departure: NaiveTime,
        soc_start_kwh: f64,
        arrival: NaiveTime,
        soc_end_kwh: f64,
        distance_km: f64,
        duration_min: u32,
    },
    /// Placeholder for a day on which the vehicle never left; SOC is the
    /// full overnight charge at both ends.
    NoTrips { weekday: Weekday, soc_kwh: f64 },
}

impl Trip {
    pub fn weekday(&self) -> Weekday {
        match self {
            Trip::Regular { weekday, .. } | Trip::NoTrips { weekday, .. } => *weekday,
        }
    }

    pub fn kind(&self) -> Option<TripKind> {
        match self {
            Trip::Regular { kind, .. } => Some(*kind),
            Trip::NoTrips { .. } => None,
        }
    }

    pub fn soc_start_kwh(&self) -> f64 {
        match self {
            Trip::Regular { soc_start_kwh, .. } => *soc_start_kwh,
            Trip::NoTrips { soc_kwh, .. } => *soc_kwh,
        }
    }

    pub fn soc_end_kwh(&self) -> f64 {
        match self {
            Trip::Regular { soc_end_kwh, .. } => *soc_end_kwh,
            Trip::NoTrips { soc_kwh, .. } => *soc_kwh,
        }
    }

    /// Driven distance; zero for the no-trips placeholder.
    pub fn distance_km(&self) -> f64 {
        match self {
            Trip::Regular { distance_km, .. } => *distance_km,
            Trip::NoTrips { .. } => 0.0,
        }
    }

    pub fn is_no_trips(&self) -> bool {
        matches!(self, Trip::NoTrips { .. })
    }
}

/// Convert fractional hours of day into a wall-clock time.
///
/// Hours outside `[0, 24)` wrap around midnight; minutes are truncated,
/// so 7.45 h renders as 07:27.
pub fn clock_time(hour: f64) -> NaiveTime {
    let wrapped = hour.rem_euclid(24.0);
    let hours = wrapped.trunc();
    let minutes = ((wrapped - hours) * 60.0).trunc().min(59.0);
    NaiveTime::from_hms_opt(hours as u32, minutes as u32, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(7.45, "07:27")]
    #[case(17.30, "17:18")]
    #[case(0.0, "00:00")]
    #[case(12.5, "12:30")]
    #[case(25.5, "01:30")]
    fn test_clock_time(#[case] hour: f64, #[case] expected: &str) {
        assert_eq!(clock_time(hour).format("%H:%M").to_string(), expected);
    }

    #[test]
    fn test_no_trips_accessors() {
        let trip = Trip::NoTrips {
            weekday: Weekday::Sunday,
            soc_kwh: 32.0,
        };
        assert!(trip.is_no_trips());
        assert_eq!(trip.kind(), None);
        assert_eq!(trip.soc_start_kwh(), 32.0);
        assert_eq!(trip.soc_end_kwh(), 32.0);
        assert_eq!(trip.distance_km(), 0.0);
        assert_eq!(trip.weekday(), Weekday::Sunday);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let trip = Trip::Regular {
            weekday: Weekday::Monday,
            kind: TripKind::Commute,
            departure: clock_time(7.5),
            soc_start_kwh: 32.0,
            arrival: clock_time(17.5),
            soc_end_kwh: 28.72,
            distance_km: 20.0,
            duration_min: 591,
        };
        let json = serde_json::to_value(&trip).unwrap();
        assert_eq!(json["type"], "regular");
        assert_eq!(json["kind"], "commute");
        assert_eq!(json["weekday"], "monday");
    }
}
