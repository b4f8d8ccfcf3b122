//! Read-only vehicle telemetry (TeslaMate API) port.
//!
//! The HTTP implementation lives in `tmb-teslamate`; the dispatcher only sees
//! this trait.

pub mod types;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::Result;

use types::{BatteryHealthSnapshot, Car, ChargeSnapshot, DriveSnapshot, StatusSnapshot};

/// How far back `latest_drive` looks.
pub const DRIVE_LOOKBACK_DAYS: i64 = 7;

/// Query endpoints, relative to the API base URL.
pub mod paths {
    use crate::domain::CarId;

    pub fn car(car: CarId) -> String {
        format!("/api/v1/cars/{}", car.0)
    }

    pub fn status(car: CarId) -> String {
        format!("/api/v1/cars/{}/status", car.0)
    }

    pub fn battery_health(car: CarId) -> String {
        format!("/api/v1/cars/{}/battery-health", car.0)
    }

    pub fn charges(car: CarId) -> String {
        format!("/api/v1/cars/{}/charges", car.0)
    }

    pub fn drives(car: CarId) -> String {
        format!("/api/v1/cars/{}/drives", car.0)
    }
}

/// Lower bound for the drive query: `now - 7 days`, RFC3339 in UTC.
pub fn drive_window_start(now: DateTime<Utc>) -> String {
    (now - Duration::days(DRIVE_LOOKBACK_DAYS)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One operation per query kind. Each call is a single GET; no retries.
///
/// "Latest" records are element 0 of what the API returns (the API sorts
/// newest first; the client does not re-sort).
#[async_trait]
pub trait TelemetryClient: Send + Sync {
    async fn car_details(&self) -> Result<Car>;
    async fn car_status(&self) -> Result<StatusSnapshot>;
    async fn battery_health(&self) -> Result<BatteryHealthSnapshot>;
    async fn latest_charge(&self) -> Result<ChargeSnapshot>;
    /// Most recent drive within the last [`DRIVE_LOOKBACK_DAYS`].
    async fn latest_drive(&self) -> Result<DriveSnapshot>;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::CarId;

    #[test]
    fn builds_paths_for_car() {
        let car = CarId(3);
        assert_eq!(paths::car(car), "/api/v1/cars/3");
        assert_eq!(paths::status(car), "/api/v1/cars/3/status");
        assert_eq!(paths::battery_health(car), "/api/v1/cars/3/battery-health");
        assert_eq!(paths::charges(car), "/api/v1/cars/3/charges");
        assert_eq!(paths::drives(car), "/api/v1/cars/3/drives");
    }

    #[test]
    fn drive_window_is_seven_days_back_in_utc() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(drive_window_start(now), "2024-01-08T10:30:00Z");
    }
}
