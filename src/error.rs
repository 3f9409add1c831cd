//! Error types for the briefing pipeline

use thiserror::Error;

use crate::models::NewsItem;

/// Crate-level error for configuration, input validation and snapshot I/O
#[derive(Error, Debug)]
pub enum BriefingError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Snapshot serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl BriefingError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            BriefingError::Config { .. } => {
                "Configuration error. Please check your environment and API keys.".to_string()
            }
            BriefingError::Validation { message } => format!("Invalid input: {message}"),
            BriefingError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            BriefingError::Serialization { .. } => {
                "Briefing data could not be encoded or decoded.".to_string()
            }
        }
    }
}

/// Failure of a single weather lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherError {
    #[error("API key error. Please check your OpenWeatherMap API key.")]
    Auth,

    #[error("City '{location}' not found. Please check spelling.")]
    NotFound { location: String },

    #[error("Weather API error (Status: {status})")]
    Api { status: u16 },

    #[error("Network error while fetching weather data: {detail}")]
    Network { detail: String },

    #[error("Unexpected weather API response: {detail}")]
    Decode { detail: String },
}

impl WeatherError {
    /// Maps a non-200 status to the matching error variant
    pub fn from_status(status: u16, location: &str) -> Self {
        match status {
            401 => WeatherError::Auth,
            404 => WeatherError::NotFound {
                location: location.to_string(),
            },
            status => WeatherError::Api { status },
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WeatherError::Decode {
                detail: err.to_string(),
            }
        } else {
            WeatherError::Network {
                detail: err.to_string(),
            }
        }
    }
}

/// Hard failure of a news lookup
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Error fetching news: {detail}")]
pub struct NewsError {
    pub detail: String,
}

impl NewsError {
    pub fn new<S: Into<String>>(detail: S) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// The single error-flavored headline shown in place of real news
    pub fn as_item(&self) -> NewsItem {
        NewsItem {
            title: self.to_string(),
            url: "#".to_string(),
            source: "Error".to_string(),
        }
    }
}

impl From<reqwest::Error> for NewsError {
    fn from(err: reqwest::Error) -> Self {
        NewsError::new(err.to_string())
    }
}
