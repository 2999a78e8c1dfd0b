use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::DEFAULT_BASE_URL,
    error::{FetchError, MalformedResponse},
    model::{Query, WeatherResult},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// `base_url` is the API root, e.g. `https://api.openweathermap.org/data/2.5`.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let endpoint = format!("{}/weather", base_url.trim_end_matches('/'));
        Self { api_key, endpoint, http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip_all, fields(city = %query))]
    async fn fetch_current(&self, query: &Query) -> Result<WeatherResult, FetchError> {
        info!("Fetching current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query.city()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "Failed to send request to OpenWeather");
                FetchError::Transport(err)
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "OpenWeather request failed");
            return Err(FetchError::Provider { status });
        }

        let body = res.text().await.map_err(|err| {
            error!(error = %err, "Failed to read OpenWeather response body");
            FetchError::Transport(err)
        })?;

        let result = parse_current(&body).map_err(|err| {
            error!(error = %err, "Failed to parse OpenWeather current JSON");
            FetchError::MalformedResponse(err)
        })?;

        debug!(?result, "Weather data fetched");
        Ok(result)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

fn parse_current(body: &str) -> Result<WeatherResult, MalformedResponse> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let condition = parsed.weather.into_iter().next().ok_or(MalformedResponse::NoConditions)?;

    Ok(WeatherResult {
        location_name: parsed.name,
        category: condition.main,
        description: condition.description,
        temperature_c: parsed.main.temp,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
        observed_at: parsed.dt.and_then(unix_to_utc),
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &Query) -> Result<WeatherResult, FetchError> {
        self.fetch_current(query).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "name": "London",
        "dt": 1700000000,
        "weather": [
            { "main": "Clear", "description": "clear sky" },
            { "main": "Mist", "description": "mist" }
        ],
        "main": { "temp": 18.2, "feels_like": 17.0, "humidity": 55 },
        "wind": { "speed": 3.1, "deg": 250 }
    }"#;

    #[test]
    fn parses_first_condition_and_keeps_precision() {
        let result = parse_current(LONDON).expect("valid body");

        assert_eq!(result.location_name, "London");
        assert_eq!(result.category, "Clear");
        assert_eq!(result.description, "clear sky");
        assert_eq!(result.temperature_c, 18.2);
        assert_eq!(result.humidity_pct, 55);
        assert_eq!(result.wind_speed_mps, 3.1);
        assert_eq!(result.observed_at, DateTime::from_timestamp(1_700_000_000, 0));
    }

    #[test]
    fn missing_dt_is_tolerated() {
        let body = r#"{"name":"X","weather":[{"main":"Rain","description":"light rain"}],
            "main":{"temp":1.0,"humidity":90},"wind":{"speed":0}}"#;

        let result = parse_current(body).expect("valid body");
        assert!(result.observed_at.is_none());
    }

    #[test]
    fn empty_weather_list_is_malformed() {
        let body = r#"{"name":"X","weather":[],"main":{"temp":1.0,"humidity":90},"wind":{"speed":0}}"#;
        assert!(matches!(parse_current(body), Err(MalformedResponse::NoConditions)));
    }

    #[test]
    fn missing_fields_are_malformed() {
        assert!(matches!(parse_current(r#"{"name":"X"}"#), Err(MalformedResponse::Json(_))));
        assert!(matches!(parse_current("not json"), Err(MalformedResponse::Json(_))));
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let provider = OpenWeatherProvider::with_base_url("KEY".into(), "http://x/".into());
        assert_eq!(provider.endpoint(), "http://x/weather");
        assert_eq!(
            OpenWeatherProvider::new("KEY".into()).endpoint(),
            "https://api.openweathermap.org/data/2.5/weather"
        );
    }
}
