use crate::{Config, FetchError, Query, WeatherResult, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &Query) -> Result<WeatherResult, FetchError>;
}

/// Construct the provider from config. Fails when no API key is available.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.require_api_key()?;
    Ok(OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url.clone()))
}
