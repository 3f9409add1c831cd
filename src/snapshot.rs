//! Flat JSON dump of the most recent briefing.

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::BriefingError;
use crate::models::{BriefingReport, LoadLevel, NewsItem, WeatherReport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefingSnapshot {
    pub zone: String,
    pub country: String,
    pub timestamp: DateTime<FixedOffset>,
    /// `null` when the weather lookup failed
    pub weather: Option<WeatherReport>,
    /// `null` when the news lookup failed hard
    pub news: Option<Vec<NewsItem>>,
    pub delivery_load: DeliveryLoad,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryLoad {
    pub level: LoadLevel,
    pub details: String,
}

impl From<&BriefingReport> for BriefingSnapshot {
    fn from(report: &BriefingReport) -> Self {
        Self {
            zone: report.location.name().to_string(),
            country: report.location.country_code().to_string(),
            timestamp: report.generated_at.fixed_offset(),
            weather: report.weather.as_ref().ok().cloned(),
            news: report.news.as_ref().ok().cloned(),
            delivery_load: DeliveryLoad {
                level: report.load.level,
                details: report.load.details.clone(),
            },
        }
    }
}

impl BriefingSnapshot {
    /// Writes the snapshot as pretty JSON, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<(), BriefingError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!("Briefing data saved to '{}'", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, BriefingError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
