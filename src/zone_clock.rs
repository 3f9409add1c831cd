//! Wall-clock time in a delivery zone, for display only.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Resolves a city to its timezone; unknown cities fall back to UTC
pub fn timezone_for(city: &str) -> Tz {
    match city.trim().to_lowercase().as_str() {
        "new york" => chrono_tz::America::New_York,
        "barcelona" | "madrid" => chrono_tz::Europe::Madrid,
        "london" => chrono_tz::Europe::London,
        "paris" => chrono_tz::Europe::Paris,
        "rome" => chrono_tz::Europe::Rome,
        "berlin" => chrono_tz::Europe::Berlin,
        _ => chrono_tz::UTC,
    }
}

/// `HH:MM` in the zone's timezone at the given instant
pub fn local_time(city: &str, instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&timezone_for(city))
        .format("%H:%M")
        .to_string()
}
