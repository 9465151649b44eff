use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::Weekday;
use crate::config::{ensure_finite, RunConfig, TripModel};

/// Fixed non-commute trips for one weekday (extended trip model).
///
/// Every one of the `count` trips departs and arrives at the same hours
/// and covers `distance_km`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_override_window"))]
pub struct DayOverride {
    pub count: u32,
    #[validate(range(min = 0.0, exclusive_max = 24.0))]
    pub departure_hour: f64,
    #[validate(range(min = 0.0, exclusive_max = 24.0))]
    pub arrival_hour: f64,
    #[validate(range(min = 0.0))]
    pub distance_km: f64,
}

fn validate_override_window(day: &DayOverride) -> Result<(), ValidationError> {
    ensure_finite(&[
        ("override departure_hour", day.departure_hour),
        ("override arrival_hour", day.arrival_hour),
        ("override distance_km", day.distance_km),
    ])?;
    if day.departure_hour >= day.arrival_hour {
        let mut err = ValidationError::new("override_window");
        err.message = Some("override departure must be before arrival".into());
        return Err(err);
    }
    Ok(())
}

/// Optional per-weekday overrides, keyed by weekday name in configuration
/// files (`[run.overrides.saturday]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WeekdayOverrides {
    #[validate(nested)]
    pub monday: Option<DayOverride>,
    #[validate(nested)]
    pub tuesday: Option<DayOverride>,
    #[validate(nested)]
    pub wednesday: Option<DayOverride>,
    #[validate(nested)]
    pub thursday: Option<DayOverride>,
    #[validate(nested)]
    pub friday: Option<DayOverride>,
    #[validate(nested)]
    pub saturday: Option<DayOverride>,
    #[validate(nested)]
    pub sunday: Option<DayOverride>,
}

impl WeekdayOverrides {
    pub fn get(&self, weekday: Weekday) -> Option<&DayOverride> {
        self.slot(weekday).as_ref()
    }

    pub fn set(&mut self, weekday: Weekday, day_override: DayOverride) {
        *self.slot_mut(weekday) = Some(day_override);
    }

    pub fn is_empty(&self) -> bool {
        Weekday::ALL.iter().all(|day| self.get(*day).is_none())
    }

    fn slot(&self, weekday: Weekday) -> &Option<DayOverride> {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    fn slot_mut(&mut self, weekday: Weekday) -> &mut Option<DayOverride> {
        match weekday {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }
}

/// Work-from-home flags; weekends never commute so only Mon-Fri exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkFromHome {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
}

impl WorkFromHome {
    pub fn is_wfh(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
            Weekday::Saturday | Weekday::Sunday => false,
        }
    }

    pub fn set(&mut self, weekday: Weekday, wfh: bool) {
        match weekday {
            Weekday::Monday => self.monday = wfh,
            Weekday::Tuesday => self.tuesday = wfh,
            Weekday::Wednesday => self.wednesday = wfh,
            Weekday::Thursday => self.thursday = wfh,
            Weekday::Friday => self.friday = wfh,
            Weekday::Saturday | Weekday::Sunday => {}
        }
    }
}

/// What a single simulated day looks like before any sampling happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySchedule {
    pub weekday: Weekday,
    pub work_from_home: bool,
    pub weekend: bool,
    /// Only populated under [`TripModel::Extended`]
    pub day_override: Option<DayOverride>,
}

impl DaySchedule {
    /// Derive the schedule of zero-based simulated day `day`.
    pub fn for_day(day: u32, config: &RunConfig) -> Self {
        let weekday = Weekday::from_day_index(day);
        let day_override = match config.model {
            TripModel::Extended => config.overrides.get(weekday).copied(),
            TripModel::Standard => None,
        };

        Self {
            weekday,
            work_from_home: config.work_from_home.is_wfh(weekday),
            weekend: weekday.is_weekend(),
            day_override,
        }
    }

    pub fn commutes(&self) -> bool {
        !self.work_from_home && !self.weekend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saturday_override() -> DayOverride {
        DayOverride {
            count: 2,
            departure_hour: 10.0,
            arrival_hour: 12.0,
            distance_km: 30.0,
        }
    }

    #[test]
    fn test_weekday_commutes_by_default() {
        let config = RunConfig::default();
        for day in 0..5 {
            assert!(DaySchedule::for_day(day, &config).commutes());
        }
        assert!(!DaySchedule::for_day(5, &config).commutes());
        assert!(!DaySchedule::for_day(6, &config).commutes());
        assert!(DaySchedule::for_day(7, &config).commutes());
    }

    #[test]
    fn test_wfh_suppresses_commute() {
        let mut config = RunConfig::default();
        config.work_from_home.set(Weekday::Tuesday, true);
        config.work_from_home.set(Weekday::Thursday, true);

        let tuesday = DaySchedule::for_day(1, &config);
        assert!(tuesday.work_from_home);
        assert!(!tuesday.commutes());
        assert!(DaySchedule::for_day(2, &config).commutes());
        assert!(!DaySchedule::for_day(10, &config).commutes());
    }

    #[test]
    fn test_weekend_is_never_wfh() {
        let mut wfh = WorkFromHome::default();
        wfh.set(Weekday::Saturday, true);
        assert!(!wfh.is_wfh(Weekday::Saturday));
    }

    #[test]
    fn test_override_only_applies_to_extended_model() {
        let mut config = RunConfig::default();
        config.overrides.set(Weekday::Saturday, saturday_override());

        assert_eq!(DaySchedule::for_day(5, &config).day_override, None);

        config.model = TripModel::Extended;
        assert_eq!(
            DaySchedule::for_day(5, &config).day_override,
            Some(saturday_override())
        );
        assert_eq!(DaySchedule::for_day(6, &config).day_override, None);
    }

    #[test]
    fn test_overrides_get_set() {
        let mut overrides = WeekdayOverrides::default();
        assert!(overrides.is_empty());
        overrides.set(Weekday::Sunday, saturday_override());
        assert!(!overrides.is_empty());
        assert_eq!(overrides.get(Weekday::Sunday), Some(&saturday_override()));
        assert_eq!(overrides.get(Weekday::Monday), None);
    }

    #[test]
    fn test_override_validation() {
        let valid = saturday_override();
        assert!(valid.validate().is_ok());

        let late = DayOverride {
            arrival_hour: 24.0,
            ..valid
        };
        assert!(late.validate().is_err());

        let negative = DayOverride {
            distance_km: -1.0,
            ..valid
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_override_window_must_be_ordered() {
        let valid = saturday_override();

        let inverted = DayOverride {
            departure_hour: 12.0,
            arrival_hour: 10.0,
            ..valid
        };
        assert!(inverted.validate().is_err());

        let empty = DayOverride {
            arrival_hour: valid.departure_hour,
            ..valid
        };
        assert!(empty.validate().is_err());

        let nan = DayOverride {
            distance_km: f64::NAN,
            ..valid
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_inverted_override_rejects_run_config() {
        let mut config = RunConfig {
            model: TripModel::Extended,
            ..Default::default()
        };
        config.overrides.set(
            Weekday::Saturday,
            DayOverride {
                departure_hour: 12.0,
                arrival_hour: 10.0,
                ..saturday_override()
            },
        );
        assert!(config.validate().is_err());
    }
}
