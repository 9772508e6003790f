//! ETA estimation and its user-facing rendering.
//!
//! The rendered string is returned verbatim to the conversational agent,
//! so the format is a contract:
//! - under one minute renders as "1 minute" (never "0 minutes")
//! - under one hour renders as whole minutes
//! - otherwise whole hours plus remaining minutes, minutes omitted when zero

use std::time::Duration;

/// Default drone cruise speed (43.2 km/h)
pub const DEFAULT_CRUISE_SPEED_MS: f64 = 12.0;

/// Flight time for a great-circle distance at a constant cruise speed
pub fn travel_time(distance_km: f64, cruise_speed_ms: f64) -> Duration {
    let seconds = (distance_km * 1000.0) / cruise_speed_ms;
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}

pub fn format_eta(travel_time: Duration) -> String {
    format_minutes(travel_time.as_secs_f64() / 60.0)
}

/// Render fractional minutes, truncating to whole units
pub fn format_minutes(minutes: f64) -> String {
    if minutes.is_nan() || minutes < 1.0 {
        return "1 minute".to_string();
    }

    let total = minutes.floor() as u64;
    if total < 60 {
        return pluralize(total, "minute");
    }

    let hours = total / 60;
    let remainder = total % 60;
    if remainder == 0 {
        pluralize(hours, "hour")
    } else {
        format!(
            "{} {}",
            pluralize(hours, "hour"),
            pluralize(remainder, "minute")
        )
    }
}

fn pluralize(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_minute_floors_to_one_minute() {
        assert_eq!(format_minutes(0.5), "1 minute");
        assert_eq!(format_minutes(0.0), "1 minute");
        assert_eq!(format_minutes(0.999), "1 minute");
    }

    #[test]
    fn test_minutes_under_an_hour() {
        assert_eq!(format_minutes(1.0), "1 minute");
        assert_eq!(format_minutes(1.9), "1 minute");
        assert_eq!(format_minutes(45.0), "45 minutes");
        assert_eq!(format_minutes(59.99), "59 minutes");
    }

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(format_minutes(125.0), "2 hours 5 minutes");
        assert_eq!(format_minutes(125.7), "2 hours 5 minutes");
        assert_eq!(format_minutes(61.0), "1 hour 1 minute");
    }

    #[test]
    fn test_whole_hours_omit_minutes() {
        assert_eq!(format_minutes(120.0), "2 hours");
        assert_eq!(format_minutes(60.0), "1 hour");
    }

    #[test]
    fn test_travel_time_at_default_speed() {
        // 12 m/s covers 7.2 km in exactly ten minutes
        let t = travel_time(7.2, DEFAULT_CRUISE_SPEED_MS);
        assert!((t.as_secs_f64() - 600.0).abs() < 1e-6);
        assert_eq!(format_eta(t), "10 minutes");
    }

    #[test]
    fn test_zero_distance() {
        let t = travel_time(0.0, DEFAULT_CRUISE_SPEED_MS);
        assert_eq!(t, Duration::ZERO);
        assert_eq!(format_eta(t), "1 minute");
    }
}
