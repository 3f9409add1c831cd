use std::fmt;

use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{BriefingError, NewsError, WeatherError};

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
    pub wind: WindReadings,
    pub coord: Coordinates,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: i64,
}

#[derive(Debug, Deserialize)]
pub struct WindReadings {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

// ============================================================================
// News API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HeadlinesResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<ArticleSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleSource {
    pub name: Option<String>,
}

// ============================================================================
// Briefing Domain Models
// ============================================================================

/// A delivery zone: a city or postal code plus a two-letter country code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    name: String,
    country_code: String,
}

impl Location {
    pub fn new(name: &str, country_code: &str) -> Result<Self, BriefingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BriefingError::validation("location name must not be empty"));
        }

        let country_code = country_code.trim().to_ascii_lowercase();
        if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BriefingError::validation(format!(
                "country code must be two letters, got '{country_code}'"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            country_code,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

/// Display tier for a briefing panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn marker(self) -> &'static str {
        match self {
            Severity::Success => "[ok]",
            Severity::Info => "[i]",
            Severity::Warning => "[!]",
            Severity::Danger => "[!!]",
        }
    }
}

/// Current conditions normalized from the weather API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub description: String,
    #[serde(rename = "temp")]
    pub temperature_celsius: f64,
    pub icon: String,
    #[serde(rename = "humidity")]
    pub humidity_percent: i64,
    #[serde(rename = "wind_speed")]
    pub wind_speed_mps: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl WeatherReport {
    /// Wet or snowy conditions are highlighted as a warning
    pub fn severity(&self) -> Severity {
        let description = self.description.to_lowercase();
        if description.contains("rain") || description.contains("snow") {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

impl TryFrom<CurrentWeatherResponse> for WeatherReport {
    type Error = WeatherError;

    fn try_from(response: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Decode {
                detail: "response has no weather entry".to_string(),
            })?;

        Ok(Self {
            description: capitalize(&condition.description),
            temperature_celsius: response.main.temp,
            icon: condition.icon,
            humidity_percent: response.main.humidity,
            wind_speed_mps: response.wind.speed,
            latitude: response.coord.lat,
            longitude: response.coord.lon,
        })
    }
}

/// Uppercases the first character and lowercases the rest
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub source: String,
}

impl From<&Article> for NewsItem {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone().unwrap_or_default(),
            url: article.url.clone().unwrap_or_else(|| "#".to_string()),
            source: article
                .source
                .as_ref()
                .and_then(|source| source.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadLevel {
    Low,
    Medium,
    High,
}

impl LoadLevel {
    pub fn severity(self) -> Severity {
        match self {
            LoadLevel::Low => Severity::Success,
            LoadLevel::Medium => Severity::Warning,
            LoadLevel::High => Severity::Danger,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            LoadLevel::Low => "🟢",
            LoadLevel::Medium => "🟡",
            LoadLevel::High => "🔴",
        }
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadLevel::Low => "Low",
            LoadLevel::Medium => "Medium",
            LoadLevel::High => "High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadEstimate {
    pub level: LoadLevel,
    pub details: String,
    pub icon: String,
}

/// Fixed catalog of weather safety advice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyTip {
    SlipperyRoads,
    WinterConditions,
    ReducedVisibility,
    Storm,
    Heat,
    Cold,
    AllClear,
}

impl SafetyTip {
    pub fn message(self) -> &'static str {
        match self {
            SafetyTip::SlipperyRoads => {
                "Roads may be slippery. Maintain safe distance and reduce speed."
            }
            SafetyTip::WinterConditions => {
                "Snow conditions reported. Use winter equipment and drive cautiously."
            }
            SafetyTip::ReducedVisibility => "Reduced visibility. Use fog lights and reduce speed.",
            SafetyTip::Storm => "Stormy conditions. Seek shelter if lightning intensifies.",
            SafetyTip::Heat => "High temperature. Stay hydrated and avoid prolonged sun exposure.",
            SafetyTip::Cold => "Cold temperature. Wear appropriate clothing and watch for ice.",
            SafetyTip::AllClear => "No specific weather-related safety concerns. Proceed normally.",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            SafetyTip::SlipperyRoads | SafetyTip::WinterConditions | SafetyTip::ReducedVisibility => {
                Severity::Warning
            }
            SafetyTip::Storm => Severity::Danger,
            SafetyTip::Heat | SafetyTip::Cold | SafetyTip::AllClear => Severity::Info,
        }
    }
}

impl fmt::Display for SafetyTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for SafetyTip {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// One complete zone briefing, built once per request
#[derive(Debug, Clone)]
pub struct BriefingReport {
    pub location: Location,
    pub generated_at: DateTime<Local>,
    /// Wall-clock time in the zone, `HH:MM`
    pub zone_local_time: String,
    pub weather: Result<WeatherReport, WeatherError>,
    pub news: Result<Vec<NewsItem>, NewsError>,
    pub load: LoadEstimate,
    pub tips: Vec<SafetyTip>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetBriefingRequest {
    /// City or postal code of the delivery zone
    pub location: String,
    /// Two-letter country code, e.g. "es"
    pub country: String,
    /// Render the short numbered briefing instead of the full dashboard
    #[serde(default)]
    pub compact: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SaveSnapshotRequest {
    /// Where to write the snapshot; defaults to the configured path
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CheckRefreshRequest {
    /// New auto-refresh interval in minutes (0 disables auto-refresh)
    #[serde(default)]
    pub interval_minutes: Option<u32>,
}
