use chrono::{DateTime, Utc};

use crate::models::{BriefingReport, SafetyTip, Severity};
use crate::refresh::RefreshState;

/// Formats a briefing as the full zone dashboard
pub fn format_briefing(report: &BriefingReport) -> String {
    let mut output = format!(
        "COURIER ZONE BRIEFING: {} ({})\nLast updated: {}\nZone local time: {}\n\n",
        report.location.name(),
        report.location.country_code().to_uppercase(),
        report.generated_at.format("%H:%M:%S"),
        report.zone_local_time
    );

    output.push_str("Weather:\n");
    match &report.weather {
        Ok(weather) => {
            output.push_str(&format!(
                "  {} {}\u{00b0}C, {}\n  Humidity: {}%\n  Wind Speed: {} m/s\n  Coordinates: {:.4}, {:.4}\n",
                weather.severity().marker(),
                weather.temperature_celsius,
                weather.description,
                weather.humidity_percent,
                weather.wind_speed_mps,
                weather.latitude,
                weather.longitude
            ));
        }
        Err(err) => output.push_str(&format!("  {} {}\n", Severity::Danger.marker(), err)),
    }

    output.push_str(&format!(
        "\nDelivery Load:\n  {} {} {}\n  {}\n",
        report.load.level.severity().marker(),
        report.load.icon,
        report.load.level,
        report.load.details
    ));

    output.push_str("\nLocal News:\n");
    match &report.news {
        Ok(items) => {
            for item in items {
                output.push_str(&format!(
                    "  - {}\n    Source: {}\n    {}\n",
                    item.title, item.source, item.url
                ));
            }
        }
        Err(_) => output.push_str("  News data unavailable\n"),
    }

    output.push_str("\nSafety Tips:\n");
    if report.weather.is_ok() {
        output.push_str(&format_tips(&report.tips));
    } else {
        output.push_str("  Safety tips unavailable: Weather data not accessible\n");
    }
    output
}

/// Formats a briefing as a short numbered summary
pub fn format_compact_briefing(report: &BriefingReport) -> String {
    let mut output = format!("Zone: {}\n", title_case(report.location.name()));

    match &report.weather {
        Ok(weather) => output.push_str(&format!(
            "Weather: {}, {}\u{00b0}C\n",
            weather.description, weather.temperature_celsius
        )),
        Err(err) => output.push_str(&format!("Weather: {err}\n")),
    }

    output.push_str(&format!(
        "Delivery Load: {}\n  {}\n",
        report.load.level, report.load.details
    ));
    output.push_str(&format!("Current Time: {} local time\n", report.zone_local_time));

    output.push_str("Local News:\n");
    match &report.news {
        Ok(items) => {
            for (i, item) in items.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, item.title));
            }
        }
        Err(err) => output.push_str(&format!("  {}\n", err.as_item().title)),
    }

    output.push_str("Safety Tips:\n");
    output.push_str(&format_tips(&report.tips));
    output
}

/// Formats the auto-refresh status line
pub fn format_refresh_status(state: &RefreshState, now: DateTime<Utc>) -> String {
    match state.minutes_until_next(now) {
        None => "Auto-refresh is disabled.".to_string(),
        Some(_) if state.should_refresh(now) => format!(
            "Refresh due now (interval {} minutes, {} refreshes so far).",
            state.interval_minutes, state.refresh_count
        ),
        Some(minutes) => format!(
            "Next refresh in approximately {} minutes ({:.0}% of {} minute interval elapsed).",
            minutes,
            state.progress(now) * 100.0,
            state.interval_minutes
        ),
    }
}

fn format_tips(tips: &[SafetyTip]) -> String {
    tips.iter()
        .map(|tip| format!("  {} {}\n", tip.severity().marker(), tip))
        .collect()
}

/// Uppercases every letter that follows a non-letter, lowercases the rest
fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut after_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if after_letter {
                output.extend(c.to_lowercase());
            } else {
                output.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            output.push(c);
            after_letter = false;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NewsError, WeatherError};
    use crate::load;
    use crate::models::{Location, NewsItem, WeatherReport};
    use chrono::{Duration, Local, TimeZone};

    fn report(weather: Result<WeatherReport, WeatherError>) -> BriefingReport {
        let tips = crate::safety::advise(weather.as_ref().ok());
        BriefingReport {
            location: Location::new("new york", "us").unwrap(),
            generated_at: Local.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap(),
            zone_local_time: "06:00".to_string(),
            weather,
            news: Ok(vec![NewsItem {
                title: "Bridge closure on FDR Drive".to_string(),
                url: "https://news.example/fdr".to_string(),
                source: "Metro Desk".to_string(),
            }]),
            load: load::estimate(12),
            tips,
        }
    }

    fn rainy() -> WeatherReport {
        WeatherReport {
            description: "Moderate rain".to_string(),
            temperature_celsius: 14.5,
            icon: "10d".to_string(),
            humidity_percent: 88,
            wind_speed_mps: 6.2,
            latitude: 40.7143,
            longitude: -74.006,
        }
    }

    #[test]
    fn test_dashboard_sections() {
        let text = format_briefing(&report(Ok(rainy())));
        assert!(text.contains("COURIER ZONE BRIEFING: new york (US)"));
        assert!(text.contains("[!] 14.5\u{00b0}C, Moderate rain"));
        assert!(text.contains("[!!] 🔴 High"));
        assert!(text.contains("Bridge closure on FDR Drive"));
        assert!(text.contains("[!] Roads may be slippery"));
    }

    #[test]
    fn test_dashboard_with_failed_weather() {
        let text = format_briefing(&report(Err(WeatherError::Auth)));
        assert!(text.contains("API key error"));
        assert!(text.contains("Safety tips unavailable"));
        assert!(text.contains("Delivery Load"));
    }

    #[test]
    fn test_compact_briefing() {
        let mut briefing = report(Ok(rainy()));
        briefing.news = Err(NewsError::new("timed out"));
        let text = format_compact_briefing(&briefing);

        assert!(text.starts_with("Zone: New York\n"));
        assert!(text.contains("Current Time: 06:00 local time"));
        assert!(text.contains("Error fetching news: timed out"));
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("saint-denis"), "Saint-Denis");
        assert_eq!(title_case("l'hospitalet DE llobregat"), "L'Hospitalet De Llobregat");
        assert_eq!(title_case("08001 barcelona"), "08001 Barcelona");
    }

    #[test]
    fn test_refresh_status() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let disabled = RefreshState::new(now, 0);
        assert_eq!(format_refresh_status(&disabled, now), "Auto-refresh is disabled.");

        let state = RefreshState::new(now, 15);
        assert!(format_refresh_status(&state, now + Duration::minutes(5))
            .contains("Next refresh in approximately 10 minutes"));
        assert!(format_refresh_status(&state, now + Duration::minutes(15)).starts_with("Refresh due now"));
    }
}
