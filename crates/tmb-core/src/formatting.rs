//! Plain-text rendering of telemetry snapshots.
//!
//! Everything here is pure. Timestamps are sliced, never parsed, so output
//! does not depend on the host timezone or locale.

use crate::telemetry::types::{
    BatteryHealthSnapshot, Car, ChargeSnapshot, ChargingDetails, DriveSnapshot, StatusSnapshot,
};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Length of `YYYY-MM-DDTHH:MM:SS`.
const TIMESTAMP_LEN: usize = 19;

// ============== Timestamp Helpers ==============

/// Split an ISO-8601-like timestamp into `(date, time)`.
///
/// Only the first 19 bytes are considered. Shorter input, or a prefix that
/// does not split on `T` into exactly two parts, comes back as `(input, "")`.
pub fn split_date_time(datetime: &str) -> (&str, &str) {
    if datetime.len() < TIMESTAMP_LEN {
        return (datetime, "");
    }
    let Some(head) = datetime.get(..TIMESTAMP_LEN) else {
        return (datetime, "");
    };
    let mut parts = head.split('T');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(date), Some(time), None) => (date, time),
        _ => (datetime, ""),
    }
}

/// Time-of-day part of a timestamp, or `""`.
pub fn extract_time(datetime: &str) -> &str {
    split_date_time(datetime).1
}

/// First 19 bytes of a timestamp, or the input unchanged when shorter.
pub fn format_timestamp(datetime: &str) -> &str {
    datetime.get(..TIMESTAMP_LEN).unwrap_or(datetime)
}

// ============== Tiers ==============

pub fn state_glyph(state: &str) -> &'static str {
    match state {
        "online" => "🟢",
        "asleep" => "🟡",
        _ => "🔴",
    }
}

/// ≥95, [90,95), [85,90), <85.
pub fn battery_health_glyph(percentage: f64) -> &'static str {
    if percentage < 85.0 {
        "❤️"
    } else if percentage < 90.0 {
        "🧡"
    } else if percentage < 95.0 {
        "💛"
    } else {
        "💚"
    }
}

pub fn charging_status(charging: &ChargingDetails) -> String {
    if !charging.plugged_in {
        return "Not charging".to_string();
    }
    if charging.charging_state.is_empty() {
        return "Plugged in, not charging".to_string();
    }
    format!("Charging ({:.1} kW)", charging.charger_power as f64)
}

// ============== Views ==============

pub fn format_car_details(car: &Car) -> String {
    format!(
        "📋 Vehicle details\n\
         {RULE}\n\
         🚗 Name: {}\n\
         📱 Model: Model {} {}\n\
         🔢 VIN: {}\n\
         🎨 Color: {}\n\
         🛞 Wheels: {}\n\
         📊 Efficiency: {:.2} kWh/km\n\
         {RULE}\n\
         📈 Statistics:\n\
         \u{20}\u{20}🔌 Total charges: {}\n\
         \u{20}\u{20}🚙 Total drives: {}\n\
         \u{20}\u{20}📲 Software updates: {}",
        car.name,
        car.car_details.model,
        car.car_details.trim_badging,
        car.car_details.vin,
        car.car_exterior.exterior_color,
        car.car_exterior.wheel_type,
        car.car_details.efficiency,
        car.teslamate_stats.total_charges,
        car.teslamate_stats.total_drives,
        car.teslamate_stats.total_updates,
    )
}

pub fn format_status(snapshot: &StatusSnapshot) -> String {
    let status = &snapshot.status;
    let units = &snapshot.units;
    let flags = &status.flags;

    let doors = if flags.locked {
        "🔒 Locked"
    } else {
        "🔓 Unlocked"
    };
    let windows = if flags.windows_open {
        "⚠️ Open"
    } else {
        "Closed"
    };
    let sentry = if flags.sentry_mode { "✅ On" } else { "Off" };

    format!(
        "🚗 {} (Model {})\n\
         {RULE}\n\
         {} State: {}\n\
         🔋 Battery: {}% ({:.2} {})\n\
         🔌 Charging: {}\n\
         🌡️ Inside: {:.1}°{}\n\
         🌡️ Outside: {:.1}°{}\n\
         {}\n\
         🪟 Windows: {}\n\
         🚨 Sentry mode: {}\n\
         📏 Odometer: {:.2} {}\n\
         ⏰ Since: {}",
        status.display_name,
        status.car_details.model,
        state_glyph(&status.state),
        status.state,
        status.battery_details.battery_level,
        status.battery_details.rated_battery_range,
        units.unit_of_length,
        charging_status(&status.charging_details),
        status.climate_details.inside_temp,
        units.unit_of_temperature,
        status.climate_details.outside_temp,
        units.unit_of_temperature,
        doors,
        windows,
        sentry,
        status.odometer,
        units.unit_of_length,
        format_timestamp(&status.state_since),
    )
}

pub fn format_battery_health(snapshot: &BatteryHealthSnapshot) -> String {
    let b = &snapshot.battery_health;
    let len = &snapshot.units.unit_of_length;

    format!(
        "🔋 Battery health\n\
         {RULE}\n\
         {} Health: {:.2}%\n\
         📊 Current capacity: {:.2} kWh\n\
         📊 Max capacity: {:.2} kWh\n\
         📏 Current range: {:.2} {len}\n\
         📏 Max range: {:.2} {len}\n\
         ⚡ Rated efficiency: {:.0} Wh/{len}",
        battery_health_glyph(b.battery_health_percentage),
        b.battery_health_percentage,
        b.current_capacity,
        b.max_capacity,
        b.current_range,
        b.max_range,
        b.rated_efficiency,
    )
}

pub fn format_charge(snapshot: &ChargeSnapshot) -> String {
    let c = &snapshot.charge;
    let len = &snapshot.units.unit_of_length;
    let temp = &snapshot.units.unit_of_temperature;
    let (date, start) = split_date_time(&c.start_date);
    let end = extract_time(&c.end_date);

    format!(
        "🔌 Latest charge\n\
         {RULE}\n\
         📅 Date: {date}\n\
         🕐 Start: {start}\n\
         🕐 End: {end}\n\
         ⏱️ Duration: {}\n\
         ⚡ Energy added: {:.2} kWh\n\
         🔋 Battery: {}% → {}%\n\
         📏 Range: {:.0} {len} → {:.0} {len}\n\
         💰 Cost: {:.2}\n\
         🌡️ Avg outside: {:.0}°{temp}",
        c.duration_str,
        c.charge_energy_added,
        c.battery_details.start_battery_level,
        c.battery_details.end_battery_level,
        c.range_rated.start_range,
        c.range_rated.end_range,
        c.cost,
        c.outside_temp_avg,
    )
}

pub fn format_drive(snapshot: &DriveSnapshot) -> String {
    let d = &snapshot.drive;
    let len = &snapshot.units.unit_of_length;
    let temp = &snapshot.units.unit_of_temperature;
    let (date, start) = split_date_time(&d.start_date);
    let end = extract_time(&d.end_date);

    format!(
        "🚗 Latest drive\n\
         {RULE}\n\
         📅 Date: {date}\n\
         🕐 Start: {start}\n\
         🕐 End: {end}\n\
         ⏱️ Duration: {}\n\
         📏 Distance: {:.2} {len}\n\
         📊 Odometer: {:.2} → {:.2} {len}\n\
         🔋 Battery: {}% → {}%\n\
         📏 Range: {:.0} → {:.0} {len}\n\
         ⚡ Energy: {:.2} kWh ({:.0} Wh/{len})\n\
         🌡️ Outside/inside: {:.1}°{temp} / {:.1}°{temp}\n\
         🚀 Top speed: {:.0} {len}/h | Avg: {:.0} {len}/h",
        d.duration_str,
        d.odometer_details.odometer_distance,
        d.odometer_details.odometer_start,
        d.odometer_details.odometer_end,
        d.battery_details.start_battery_level,
        d.battery_details.end_battery_level,
        d.range_rated.start_range,
        d.range_rated.end_range,
        d.energy_consumed_net,
        d.consumption_net,
        d.outside_temp_avg,
        d.inside_temp_avg,
        d.speed_max,
        d.speed_avg,
    )
}
