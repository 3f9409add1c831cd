use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::constants::USER_AGENT;
use crate::error::WeatherError;
use crate::models::{CurrentWeatherResponse, Location, WeatherReport};

/// Anything that can report current conditions for a zone
pub trait WeatherSource {
    fn current_weather(
        &self,
        location: &Location,
    ) -> impl Future<Output = Result<WeatherReport, WeatherError>> + Send;
}

/// OpenWeatherMap current-weather client
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    /// Makes the current-weather request and normalizes the response
    async fn make_request(&self, location: &Location) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location.name()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WeatherError::from_status(status.as_u16(), location.name()));
        }

        let body = response.json::<CurrentWeatherResponse>().await?;
        WeatherReport::try_from(body)
    }
}

impl WeatherSource for OpenWeatherClient {
    async fn current_weather(&self, location: &Location) -> Result<WeatherReport, WeatherError> {
        tracing::info!("Fetching weather data for {}", location.name());

        let result = self.make_request(location).await;
        if let Err(err) = &result {
            tracing::warn!("Weather lookup for {} failed: {}", location.name(), err);
        }
        result
    }
}
