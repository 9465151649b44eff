use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::{ConfigError, VehicleConfig};

/// Static battery and consumption parameters of the simulated EV.
///
/// All state-of-charge values handled here are energies in kWh, bounded by
/// `[min_soc * battery_kwh, max_soc * battery_kwh]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    battery_kwh: f64,
    max_soc: f64,
    min_soc: f64,
    consumption_wh_per_km: f64,
}

impl Vehicle {
    /// Build a vehicle from validated parameters.
    pub fn new(config: &VehicleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            battery_kwh: config.battery_kwh,
            max_soc: config.max_soc,
            min_soc: config.min_soc,
            consumption_wh_per_km: config.consumption_wh_per_km,
        })
    }

    pub fn battery_kwh(&self) -> f64 {
        self.battery_kwh
    }

    pub fn consumption_wh_per_km(&self) -> f64 {
        self.consumption_wh_per_km
    }

    /// Energy after a full overnight charge (kWh)
    pub fn full_charge_kwh(&self) -> f64 {
        self.max_soc * self.battery_kwh
    }

    /// Lowest energy the battery is allowed to reach (kWh)
    pub fn floor_kwh(&self) -> f64 {
        self.min_soc * self.battery_kwh
    }

    /// Energy drawn from the battery for a distance (Wh/km -> kWh)
    pub fn energy_for_distance_kwh(&self, distance_km: f64) -> f64 {
        distance_km * self.consumption_wh_per_km / 1000.0
    }

    /// Deplete a running SOC by one trip, never going below the floor.
    pub fn soc_after_trip(&self, distance_km: f64, soc_before_kwh: f64) -> f64 {
        (soc_before_kwh - self.energy_for_distance_kwh(distance_km)).max(self.floor_kwh())
    }

    /// SOC after driving `distance_km` starting from a full charge.
    ///
    /// Unlike [`Vehicle::soc_after_trip`] the baseline is fixed, so this is
    /// only useful for a-priori checks of a single trip.
    pub fn soc_for_commute_distance(&self, distance_km: f64) -> f64 {
        self.soc_after_trip(distance_km, self.full_charge_kwh())
    }
}
