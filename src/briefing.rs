use anyhow::{Context, Result};
use chrono::{DateTime, Local, Timelike, Utc};

use crate::config::BriefingConfig;
use crate::load;
use crate::models::{BriefingReport, Location};
use crate::news::{NewsApiFeed, NewsProvider, NewsSource};
use crate::safety;
use crate::weather::{OpenWeatherClient, WeatherSource};
use crate::zone_clock;

/// Aggregator wired to the live weather and news APIs
pub type HttpBriefingAggregator = BriefingAggregator<OpenWeatherClient, NewsProvider<NewsApiFeed>>;

/// Composes weather, news, load and safety advice into one report.
///
/// Provider failures stay local to their field of the report; a briefing is
/// always produced.
#[derive(Debug, Clone)]
pub struct BriefingAggregator<W, N> {
    weather: W,
    news: N,
}

impl HttpBriefingAggregator {
    pub fn from_config(config: &BriefingConfig) -> Result<Self> {
        let weather = OpenWeatherClient::new(
            &config.weather_api_base,
            &config.weather_api_key,
            config.request_timeout,
        )
        .context("Failed to build weather client")?;

        let feed = NewsApiFeed::new(
            &config.news_api_base,
            &config.news_api_key,
            config.request_timeout,
        )
        .context("Failed to build news client")?;

        Ok(BriefingAggregator::new(weather, NewsProvider::new(feed)))
    }
}

impl<W, N> BriefingAggregator<W, N>
where
    W: WeatherSource + Sync,
    N: NewsSource + Sync,
{
    pub fn new(weather: W, news: N) -> Self {
        Self { weather, news }
    }

    /// Builds a briefing using the process's local clock
    pub async fn build(&self, location: &Location) -> BriefingReport {
        self.build_at(location, Local::now()).await
    }

    /// Builds a briefing as of `now`
    pub async fn build_at(&self, location: &Location, now: DateTime<Local>) -> BriefingReport {
        tracing::info!(
            "Generating briefing for {} ({})",
            location.name(),
            location.country_code()
        );

        let (weather, news) = tokio::join!(
            self.weather.current_weather(location),
            self.news.headlines(location)
        );

        // Delivery load follows the server's clock, not the zone's
        let load = load::estimate(now.hour());
        let tips = safety::advise(weather.as_ref().ok());
        let zone_local_time = zone_clock::local_time(location.name(), now.with_timezone(&Utc));

        BriefingReport {
            location: location.clone(),
            generated_at: now,
            zone_local_time,
            weather,
            news,
            load,
            tips,
        }
    }
}
