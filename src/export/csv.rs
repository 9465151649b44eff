use std::io::Write;

use super::ExportError;
use crate::config::TripModel;
use crate::domain::{Trip, NO_TRIPS_MARKER};
use crate::simulation::Trace;

pub const DEPARTURE_COLUMN: &str = "Departure Time";
pub const DISTANCE_COLUMN: &str = "Distance (km)";

const BASE_COLUMNS: [&str; 6] = [
    "Day",
    "Weekday",
    DEPARTURE_COLUMN,
    "SOC on Departure",
    "Arrival Time",
    "SOC on Arrival",
];

const TRAVEL_COLUMNS: [&str; 2] = [DISTANCE_COLUMN, "Travel Time (min)"];

/// Header of the CSV layout used for `model`. The extended model drops the
/// distance and travel time columns.
pub fn header(model: TripModel) -> Vec<&'static str> {
    let mut columns = BASE_COLUMNS.to_vec();
    if model == TripModel::Standard {
        columns.extend(TRAVEL_COLUMNS);
    }
    columns
}

/// One row per trip; days without trips get a single "No trips" row whose
/// unused columns are empty, so every row matches the header width.
pub fn write_csv<W: Write>(writer: W, trace: &Trace, model: TripModel) -> Result<(), ExportError> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    let with_travel = model == TripModel::Standard;

    wtr.write_record(header(model))?;

    for (day, trip) in trace.trips() {
        let mut record = vec![day.to_string(), trip.weekday().to_string()];
        match trip {
            Trip::Regular {
                departure,
                soc_start_kwh,
                arrival,
                soc_end_kwh,
                distance_km,
                duration_min,
                ..
            } => {
                record.push(departure.format("%H:%M").to_string());
                record.push(format!("{soc_start_kwh:.2}"));
                record.push(arrival.format("%H:%M").to_string());
                record.push(format!("{soc_end_kwh:.2}"));
                if with_travel {
                    record.push(format!("{distance_km:.2}"));
                    record.push(duration_min.to_string());
                }
            }
            Trip::NoTrips { soc_kwh, .. } => {
                record.push(NO_TRIPS_MARKER.to_string());
                record.push(format!("{soc_kwh:.2}"));
                record.push(String::new());
                record.push(format!("{soc_kwh:.2}"));
                if with_travel {
                    record.push(String::new());
                    record.push(String::new());
                }
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RunConfig, VehicleConfig};
    use crate::domain::{clock_time, TripKind, Vehicle, Weekday};
    use crate::simulation::{SummaryFactors, TraceGenerator, TraceSummary};
    use rstest::rstest;

    fn handmade_trace() -> Trace {
        let mut trace = Trace::default();
        trace.push(
            1,
            vec![Trip::Regular {
                weekday: Weekday::Monday,
                kind: TripKind::Commute,
                departure: clock_time(7.45),
                soc_start_kwh: 32.0,
                arrival: clock_time(17.30),
                soc_end_kwh: 28.72,
                distance_km: 20.0,
                duration_min: 591,
            }],
        );
        trace.push(
            2,
            vec![Trip::NoTrips {
                weekday: Weekday::Tuesday,
                soc_kwh: 32.0,
            }],
        );
        trace
    }

    fn render(trace: &Trace, model: TripModel) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, trace, model).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_standard_layout() {
        let text = render(&handmade_trace(), TripModel::Standard);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Day,Weekday,Departure Time,SOC on Departure,Arrival Time,SOC on Arrival,Distance (km),Travel Time (min)"
        );
        assert_eq!(lines[1], "1,Monday,07:27,32.00,17:18,28.72,20.00,591");
        assert_eq!(lines[2], "2,Tuesday,No trips,32.00,,32.00,,");
    }

    #[test]
    fn test_extended_layout() {
        let text = render(&handmade_trace(), TripModel::Extended);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Day,Weekday,Departure Time,SOC on Departure,Arrival Time,SOC on Arrival"
        );
        assert_eq!(lines[1], "1,Monday,07:27,32.00,17:18,28.72");
        assert_eq!(lines[2], "2,Tuesday,No trips,32.00,,32.00");
    }

    #[rstest]
    #[case(TripModel::Standard, 8)]
    #[case(TripModel::Extended, 6)]
    fn test_rows_match_header_width(#[case] model: TripModel, #[case] width: usize) {
        let vehicle = Vehicle::new(&VehicleConfig::default()).unwrap();
        let config = RunConfig {
            days: 28,
            model,
            ..Default::default()
        };
        let trace = TraceGenerator::with_seed(vehicle, config, 5).unwrap().run();
        let text = render(&trace, model);

        let mut reader = ::csv::Reader::from_reader(text.as_bytes());
        assert_eq!(reader.headers().unwrap().len(), width);
        let mut rows = 0;
        for record in reader.records() {
            assert_eq!(record.unwrap().len(), width);
            rows += 1;
        }
        assert_eq!(rows, trace.trips().count());
    }

    #[test]
    fn test_summary_from_written_csv() {
        let text = render(&handmade_trace(), TripModel::Standard);
        let factors = SummaryFactors::default();
        let from_csv = TraceSummary::from_csv(text.as_bytes(), &factors).unwrap();
        let from_trace = TraceSummary::from_trace(&handmade_trace(), &factors);

        assert_eq!(from_csv.trip_count, from_trace.trip_count);
        assert_eq!(from_csv.days_without_trips, from_trace.days_without_trips);
        assert!((from_csv.total_distance_km - from_trace.total_distance_km).abs() < 1e-9);
    }
}
