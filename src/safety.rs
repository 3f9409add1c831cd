use crate::models::{SafetyTip, WeatherReport};

const HEAT_THRESHOLD_CELSIUS: f64 = 30.0;
const COLD_THRESHOLD_CELSIUS: f64 = 5.0;

/// Derives driving advice from current conditions.
///
/// At most one condition tip (first match on the description) and at most
/// one temperature tip are produced. Without weather, or when nothing
/// matches, the all-clear tip is returned on its own.
pub fn advise(weather: Option<&WeatherReport>) -> Vec<SafetyTip> {
    let Some(weather) = weather else {
        return vec![SafetyTip::AllClear];
    };

    let mut tips = Vec::new();
    let description = weather.description.to_lowercase();

    if description.contains("rain") || description.contains("shower") {
        tips.push(SafetyTip::SlipperyRoads);
    } else if description.contains("snow") {
        tips.push(SafetyTip::WinterConditions);
    } else if description.contains("fog") {
        tips.push(SafetyTip::ReducedVisibility);
    } else if description.contains("storm") || description.contains("thunder") {
        tips.push(SafetyTip::Storm);
    }

    if weather.temperature_celsius >= HEAT_THRESHOLD_CELSIUS {
        tips.push(SafetyTip::Heat);
    } else if weather.temperature_celsius <= COLD_THRESHOLD_CELSIUS {
        tips.push(SafetyTip::Cold);
    }

    if tips.is_empty() {
        tips.push(SafetyTip::AllClear);
    }
    tips
}
