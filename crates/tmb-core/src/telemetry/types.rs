//! Typed views of TeslaMate API responses.
//!
//! Every response is wrapped as `{ "data": { ... } }`. TeslaMate emits `null`
//! for sensors that have no reading (e.g. temperatures while asleep), so scalar
//! fields decode `null` to their zero value instead of failing.

use serde::{Deserialize, Deserializer};

fn nullable<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// `{ "data": T }`
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Units {
    #[serde(deserialize_with = "nullable")]
    pub unit_of_length: String,
    #[serde(deserialize_with = "nullable")]
    pub unit_of_temperature: String,
    #[serde(deserialize_with = "nullable")]
    pub unit_of_pressure: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CarRef {
    #[serde(deserialize_with = "nullable")]
    pub car_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub car_name: String,
}

// ============== Car details ==============

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CarsData {
    #[serde(deserialize_with = "nullable")]
    pub cars: Vec<Car>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Car {
    #[serde(deserialize_with = "nullable")]
    pub car_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub car_details: CarDetails,
    pub car_exterior: CarExterior,
    pub teslamate_stats: TeslaMateStats,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CarDetails {
    #[serde(deserialize_with = "nullable")]
    pub vin: String,
    #[serde(deserialize_with = "nullable")]
    pub model: String,
    #[serde(deserialize_with = "nullable")]
    pub trim_badging: String,
    /// kWh per km, as stored by TeslaMate.
    #[serde(deserialize_with = "nullable")]
    pub efficiency: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CarExterior {
    #[serde(deserialize_with = "nullable")]
    pub exterior_color: String,
    #[serde(deserialize_with = "nullable")]
    pub spoiler_type: String,
    #[serde(deserialize_with = "nullable")]
    pub wheel_type: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeslaMateStats {
    #[serde(deserialize_with = "nullable")]
    pub total_charges: i64,
    #[serde(deserialize_with = "nullable")]
    pub total_drives: i64,
    #[serde(deserialize_with = "nullable")]
    pub total_updates: i64,
}

// ============== Live status ==============

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub car: CarRef,
    pub status: CarStatus,
    pub units: Units,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CarStatus {
    #[serde(deserialize_with = "nullable")]
    pub display_name: String,
    #[serde(deserialize_with = "nullable")]
    pub state: String,
    #[serde(deserialize_with = "nullable")]
    pub state_since: String,
    #[serde(deserialize_with = "nullable")]
    pub odometer: f64,
    #[serde(rename = "car_status")]
    pub flags: CarStatusFlags,
    pub car_details: StatusCarDetails,
    pub climate_details: ClimateDetails,
    pub battery_details: BatteryDetails,
    pub charging_details: ChargingDetails,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CarStatusFlags {
    #[serde(deserialize_with = "nullable")]
    pub healthy: bool,
    #[serde(deserialize_with = "nullable")]
    pub locked: bool,
    #[serde(deserialize_with = "nullable")]
    pub sentry_mode: bool,
    #[serde(deserialize_with = "nullable")]
    pub windows_open: bool,
    #[serde(deserialize_with = "nullable")]
    pub doors_open: bool,
    #[serde(deserialize_with = "nullable")]
    pub trunk_open: bool,
    #[serde(deserialize_with = "nullable")]
    pub frunk_open: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_user_present: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusCarDetails {
    #[serde(deserialize_with = "nullable")]
    pub model: String,
    #[serde(deserialize_with = "nullable")]
    pub trim_badging: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClimateDetails {
    #[serde(deserialize_with = "nullable")]
    pub is_climate_on: bool,
    #[serde(deserialize_with = "nullable")]
    pub inside_temp: f64,
    #[serde(deserialize_with = "nullable")]
    pub outside_temp: f64,
    #[serde(deserialize_with = "nullable")]
    pub is_preconditioning: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BatteryDetails {
    #[serde(deserialize_with = "nullable")]
    pub est_battery_range: f64,
    #[serde(deserialize_with = "nullable")]
    pub rated_battery_range: f64,
    #[serde(deserialize_with = "nullable")]
    pub ideal_battery_range: f64,
    #[serde(deserialize_with = "nullable")]
    pub battery_level: i64,
    #[serde(deserialize_with = "nullable")]
    pub usable_battery_level: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChargingDetails {
    #[serde(deserialize_with = "nullable")]
    pub plugged_in: bool,
    #[serde(deserialize_with = "nullable")]
    pub charging_state: String,
    #[serde(deserialize_with = "nullable")]
    pub charge_energy_added: f64,
    #[serde(deserialize_with = "nullable")]
    pub charge_limit_soc: i64,
    #[serde(deserialize_with = "nullable")]
    pub charger_power: i64,
    #[serde(deserialize_with = "nullable")]
    pub time_to_full_charge: f64,
}

// ============== Battery health ==============

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BatteryHealthSnapshot {
    pub car: CarRef,
    pub battery_health: BatteryHealth,
    pub units: Units,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BatteryHealth {
    #[serde(deserialize_with = "nullable")]
    pub max_range: f64,
    #[serde(deserialize_with = "nullable")]
    pub current_range: f64,
    #[serde(deserialize_with = "nullable")]
    pub max_capacity: f64,
    #[serde(deserialize_with = "nullable")]
    pub current_capacity: f64,
    #[serde(deserialize_with = "nullable")]
    pub rated_efficiency: f64,
    #[serde(deserialize_with = "nullable")]
    pub battery_health_percentage: f64,
}

// ============== Charges ==============

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChargesData {
    pub car: CarRef,
    #[serde(deserialize_with = "nullable")]
    pub charges: Vec<Charge>,
    pub units: Units,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Charge {
    #[serde(deserialize_with = "nullable")]
    pub charge_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(deserialize_with = "nullable")]
    pub end_date: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub charge_energy_added: f64,
    #[serde(deserialize_with = "nullable")]
    pub charge_energy_used: f64,
    #[serde(deserialize_with = "nullable")]
    pub cost: f64,
    #[serde(deserialize_with = "nullable")]
    pub duration_min: i64,
    #[serde(deserialize_with = "nullable")]
    pub duration_str: String,
    pub battery_details: ChargeBatteryDetails,
    pub range_rated: RangeSpan,
    #[serde(deserialize_with = "nullable")]
    pub outside_temp_avg: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChargeBatteryDetails {
    #[serde(deserialize_with = "nullable")]
    pub start_battery_level: i64,
    #[serde(deserialize_with = "nullable")]
    pub end_battery_level: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RangeSpan {
    #[serde(deserialize_with = "nullable")]
    pub start_range: f64,
    #[serde(deserialize_with = "nullable")]
    pub end_range: f64,
}

/// Most recent charge plus the units of the response it came from.
#[derive(Clone, Debug, Default)]
pub struct ChargeSnapshot {
    pub charge: Charge,
    pub units: Units,
}

// ============== Drives ==============

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DrivesData {
    pub car: CarRef,
    #[serde(deserialize_with = "nullable")]
    pub drives: Vec<Drive>,
    pub units: Units,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Drive {
    #[serde(deserialize_with = "nullable")]
    pub drive_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(deserialize_with = "nullable")]
    pub end_date: String,
    #[serde(deserialize_with = "nullable")]
    pub start_address: String,
    #[serde(deserialize_with = "nullable")]
    pub end_address: String,
    pub odometer_details: OdometerDetails,
    #[serde(deserialize_with = "nullable")]
    pub duration_min: i64,
    #[serde(deserialize_with = "nullable")]
    pub duration_str: String,
    #[serde(deserialize_with = "nullable")]
    pub speed_max: f64,
    #[serde(deserialize_with = "nullable")]
    pub speed_avg: f64,
    pub battery_details: DriveBatteryDetails,
    pub range_rated: RangeSpan,
    #[serde(deserialize_with = "nullable")]
    pub outside_temp_avg: f64,
    #[serde(deserialize_with = "nullable")]
    pub inside_temp_avg: f64,
    #[serde(deserialize_with = "nullable")]
    pub energy_consumed_net: f64,
    #[serde(deserialize_with = "nullable")]
    pub consumption_net: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OdometerDetails {
    #[serde(deserialize_with = "nullable")]
    pub odometer_start: f64,
    #[serde(deserialize_with = "nullable")]
    pub odometer_end: f64,
    #[serde(deserialize_with = "nullable")]
    pub odometer_distance: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DriveBatteryDetails {
    #[serde(deserialize_with = "nullable")]
    pub start_battery_level: i64,
    #[serde(deserialize_with = "nullable")]
    pub end_battery_level: i64,
}

/// Most recent drive plus the units of the response it came from.
#[derive(Clone, Debug, Default)]
pub struct DriveSnapshot {
    pub drive: Drive,
    pub units: Units,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_status_envelope_with_nulls() {
        let raw = r#"{
          "data": {
            "car": { "car_id": 1, "car_name": "Red" },
            "status": {
              "display_name": "Red",
              "state": "asleep",
              "state_since": "2024-01-15T10:30:00Z",
              "odometer": 12345.6,
              "car_status": { "locked": true, "sentry_mode": null },
              "climate_details": { "inside_temp": null, "outside_temp": 3.5 },
              "battery_details": { "battery_level": 80, "rated_battery_range": 300.25 },
              "charging_details": { "plugged_in": false, "charging_state": null }
            },
            "units": { "unit_of_length": "km", "unit_of_temperature": "C" }
          }
        }"#;

        let env: Envelope<StatusSnapshot> = serde_json::from_str(raw).unwrap();
        let s = env.data;
        assert_eq!(s.car.car_name, "Red");
        assert_eq!(s.status.state, "asleep");
        assert!(s.status.flags.locked);
        assert!(!s.status.flags.sentry_mode);
        assert_eq!(s.status.climate_details.inside_temp, 0.0);
        assert_eq!(s.status.climate_details.outside_temp, 3.5);
        assert_eq!(s.status.battery_details.battery_level, 80);
        assert_eq!(s.status.charging_details.charging_state, "");
        assert_eq!(s.units.unit_of_length, "km");
        assert_eq!(s.units.unit_of_pressure, "");
    }

    #[test]
    fn decodes_empty_and_null_record_lists() {
        let env: Envelope<ChargesData> =
            serde_json::from_str(r#"{"data":{"charges":[]}}"#).unwrap();
        assert!(env.data.charges.is_empty());

        let env: Envelope<DrivesData> =
            serde_json::from_str(r#"{"data":{"drives":null}}"#).unwrap();
        assert!(env.data.drives.is_empty());
    }

    #[test]
    fn missing_data_key_is_an_error() {
        let res: serde_json::Result<Envelope<CarsData>> = serde_json::from_str(r#"{"cars":[]}"#);
        assert!(res.is_err());
    }
}
