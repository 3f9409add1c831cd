//! Runtime configuration, read from `COURIER_*` environment variables.
//!
//! API keys are never compiled in; the server refuses to start without them.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_REFRESH_INTERVAL_MINUTES, DEFAULT_SNAPSHOT_PATH, MAX_REFRESH_INTERVAL_MINUTES,
    NEWS_API_BASE, OPENWEATHER_API_BASE, REQUEST_TIMEOUT,
};
use crate::error::BriefingError;

const ENV_WEATHER_API_KEY: &str = "COURIER_WEATHER_API_KEY";
const ENV_NEWS_API_KEY: &str = "COURIER_NEWS_API_KEY";
const ENV_WEATHER_API_BASE: &str = "COURIER_WEATHER_API_BASE";
const ENV_NEWS_API_BASE: &str = "COURIER_NEWS_API_BASE";
const ENV_REQUEST_TIMEOUT_SECS: &str = "COURIER_REQUEST_TIMEOUT_SECS";
const ENV_SNAPSHOT_PATH: &str = "COURIER_SNAPSHOT_PATH";
const ENV_REFRESH_INTERVAL_MINUTES: &str = "COURIER_REFRESH_INTERVAL_MINUTES";

const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct BriefingConfig {
    pub weather_api_key: String,
    pub news_api_key: String,
    pub weather_api_base: String,
    pub news_api_base: String,
    pub request_timeout: Duration,
    pub snapshot_path: PathBuf,
    pub refresh_interval_minutes: u32,
}

impl BriefingConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, BriefingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BriefingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let weather_api_key = value(ENV_WEATHER_API_KEY)
            .ok_or_else(|| BriefingError::config(format!("{ENV_WEATHER_API_KEY} is not set")))?;
        let news_api_key = value(ENV_NEWS_API_KEY)
            .ok_or_else(|| BriefingError::config(format!("{ENV_NEWS_API_KEY} is not set")))?;

        let request_timeout = match value(ENV_REQUEST_TIMEOUT_SECS) {
            Some(raw) => Duration::from_secs(parse_number(ENV_REQUEST_TIMEOUT_SECS, &raw)?),
            None => REQUEST_TIMEOUT,
        };

        let refresh_interval_minutes = match value(ENV_REFRESH_INTERVAL_MINUTES) {
            Some(raw) => parse_number(ENV_REFRESH_INTERVAL_MINUTES, &raw)?,
            None => DEFAULT_REFRESH_INTERVAL_MINUTES,
        };

        let config = Self {
            weather_api_key,
            news_api_key,
            weather_api_base: value(ENV_WEATHER_API_BASE)
                .unwrap_or_else(|| OPENWEATHER_API_BASE.to_string()),
            news_api_base: value(ENV_NEWS_API_BASE).unwrap_or_else(|| NEWS_API_BASE.to_string()),
            request_timeout,
            snapshot_path: value(ENV_SNAPSHOT_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
            refresh_interval_minutes,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BriefingError> {
        let timeout_secs = self.request_timeout.as_secs();
        if timeout_secs == 0 || timeout_secs > MAX_TIMEOUT_SECS {
            return Err(BriefingError::config(format!(
                "request timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds"
            )));
        }

        if self.refresh_interval_minutes > MAX_REFRESH_INTERVAL_MINUTES {
            return Err(BriefingError::config(format!(
                "refresh interval must be at most {MAX_REFRESH_INTERVAL_MINUTES} minutes"
            )));
        }

        for base in [&self.weather_api_base, &self.news_api_base] {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(BriefingError::config(format!(
                    "API base URL must start with http:// or https://, got '{base}'"
                )));
            }
        }

        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, BriefingError> {
    raw.parse()
        .map_err(|_| BriefingError::config(format!("{key} must be a number, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = BriefingConfig::from_lookup(lookup_from(&[
            (ENV_WEATHER_API_KEY, " weather-key \n"),
            (ENV_NEWS_API_KEY, "news-key"),
        ]))
        .unwrap();

        assert_eq!(config.weather_api_key, "weather-key");
        assert_eq!(config.weather_api_base, OPENWEATHER_API_BASE);
        assert_eq!(config.news_api_base, NEWS_API_BASE);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.snapshot_path, PathBuf::from("last_briefing.json"));
        assert_eq!(config.refresh_interval_minutes, 15);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let err = BriefingConfig::from_lookup(lookup_from(&[(ENV_WEATHER_API_KEY, "key")]))
            .unwrap_err();
        assert!(matches!(err, BriefingError::Config { .. }));
        assert!(err.to_string().contains(ENV_NEWS_API_KEY));

        let blank = BriefingConfig::from_lookup(lookup_from(&[
            (ENV_WEATHER_API_KEY, "   "),
            (ENV_NEWS_API_KEY, "key"),
        ]));
        assert!(blank.is_err());
    }

    #[test]
    fn test_overrides_and_validation() {
        let config = BriefingConfig::from_lookup(lookup_from(&[
            (ENV_WEATHER_API_KEY, "w"),
            (ENV_NEWS_API_KEY, "n"),
            (ENV_REQUEST_TIMEOUT_SECS, "5"),
            (ENV_REFRESH_INTERVAL_MINUTES, "0"),
            (ENV_SNAPSHOT_PATH, "/tmp/zone.json"),
            (ENV_WEATHER_API_BASE, "http://localhost:8080"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.refresh_interval_minutes, 0);
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/zone.json"));
        assert_eq!(config.weather_api_base, "http://localhost:8080");

        let too_long = BriefingConfig::from_lookup(lookup_from(&[
            (ENV_WEATHER_API_KEY, "w"),
            (ENV_NEWS_API_KEY, "n"),
            (ENV_REFRESH_INTERVAL_MINUTES, "90"),
        ]));
        assert!(too_long.is_err());

        let not_a_number = BriefingConfig::from_lookup(lookup_from(&[
            (ENV_WEATHER_API_KEY, "w"),
            (ENV_NEWS_API_KEY, "n"),
            (ENV_REQUEST_TIMEOUT_SECS, "soon"),
        ]));
        assert!(not_a_number.is_err());
    }
}
