use crate::models::{LoadEstimate, LoadLevel};

/// Classifies expected delivery volume for the given hour of day (0-23).
///
/// Lunch is the busiest window, followed by dinner and breakfast. Every
/// other hour is quiet.
pub fn estimate(hour: u32) -> LoadEstimate {
    let (level, details) = match hour {
        11..=14 => (LoadLevel::High, "10+ deliveries expected between 11:00 - 14:00"),
        17..=20 => (LoadLevel::Medium, "5-10 deliveries expected between 17:00 - 20:00"),
        8..=10 => (LoadLevel::Medium, "5-8 deliveries expected between 8:00 - 10:00"),
        _ => (LoadLevel::Low, "Less than 5 deliveries expected in the next hour"),
    };

    LoadEstimate {
        level,
        details: details.to_string(),
        icon: level.icon().to_string(),
    }
}
