use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated city lookup. Never empty, never padded with whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    city: String,
}

impl Query {
    /// Trims `input`; returns `None` when nothing is left.
    pub fn new(input: &str) -> Option<Self> {
        let city = input.trim();
        if city.is_empty() {
            return None;
        }

        Some(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.city)
    }
}

/// Current conditions for one location, as reported by the provider.
///
/// Temperature keeps full precision; rounding happens at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub location_name: String,
    /// Coarse provider category, e.g. "Clear" or "Rain".
    pub category: String,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

/// What the dashboard currently shows. Exactly one case is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Loaded(WeatherResult),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        match self {
            ViewState::Loaded(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_trims_surrounding_whitespace() {
        let q = Query::new("  New York \t").expect("non-empty query");
        assert_eq!(q.city(), "New York");
        assert_eq!(q.to_string(), "New York");
    }

    #[test]
    fn query_rejects_blank_input() {
        assert!(Query::new("").is_none());
        assert!(Query::new("   \n").is_none());
    }

    #[test]
    fn view_state_defaults_to_idle() {
        let state = ViewState::default();
        assert_eq!(state, ViewState::Idle);
        assert!(!state.is_loading());
        assert!(state.result().is_none());
    }
}
