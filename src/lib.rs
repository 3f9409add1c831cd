//! Courier zone briefings: weather, delivery-relevant news, expected load
//! and safety tips for a delivery zone, served over MCP.

pub mod briefing;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod load;
pub mod models;
pub mod news;
pub mod refresh;
pub mod safety;
pub mod service;
pub mod snapshot;
pub mod weather;
pub mod zone_clock;

pub use briefing::{BriefingAggregator, HttpBriefingAggregator};
pub use config::BriefingConfig;
pub use error::{BriefingError, NewsError, WeatherError};
pub use models::{BriefingReport, LoadEstimate, LoadLevel, Location, NewsItem, SafetyTip, WeatherReport};
pub use news::{NewsProvider, NewsSource};
pub use service::ZoneBriefing;
pub use snapshot::BriefingSnapshot;
pub use weather::{OpenWeatherClient, WeatherSource};
