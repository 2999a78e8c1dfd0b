//! Text rendering of the dashboard.
//!
//! [`render`] is a pure function of the [`ViewState`]: the same state always
//! produces the same text.

use std::fmt::Write as _;

use crate::model::{ViewState, WeatherResult};

pub const TITLE: &str = "Weather Dashboard 🌤️";
pub const INPUT_PLACEHOLDER: &str = "Enter city name...";
pub const LOADING_TEXT: &str = "Loading weather data...";
pub const RETRY_HINT: &str = "Please check the city name and try again.";

/// Icon for a provider condition category. Case-sensitive; unknown
/// categories get the globe.
pub fn icon_for(category: &str) -> &'static str {
    match category {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        // Shares the snow icon.
        "Mist" | "Smoke" | "Haze" | "Fog" => "❄️",
        _ => "🌍",
    }
}

/// Rounds half up, so `-2.5` becomes `-2` and `15.5` becomes `16`.
pub fn display_temperature(temp_c: f64) -> i64 {
    (temp_c + 0.5).floor() as i64
}

/// Upper-cases the first letter of every word, leaving the rest untouched.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if at_word_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }

    out
}

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "[ {INPUT_PLACEHOLDER} ] (Search)");

    match state {
        ViewState::Idle => {}
        ViewState::Loading => {
            let _ = writeln!(out);
            let _ = writeln!(out, "{LOADING_TEXT}");
        }
        ViewState::Error(message) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Error: {message}");
            let _ = writeln!(out, "{RETRY_HINT}");
        }
        ViewState::Loaded(result) => {
            let _ = writeln!(out);
            render_result(&mut out, result);
        }
    }

    out
}

fn render_result(out: &mut String, result: &WeatherResult) {
    let _ = writeln!(out, "{}", result.location_name);
    let _ = writeln!(out, "{}", icon_for(&result.category));
    let _ = writeln!(out, "{}°C", display_temperature(result.temperature_c));
    let _ = writeln!(out, "{}", capitalize_words(&result.description));
    let _ = writeln!(out, "Humidity: {}%", result.humidity_pct);
    let _ = writeln!(out, "Wind Speed: {} m/s", result.wind_speed_mps);

    if let Some(observed_at) = result.observed_at {
        let _ = writeln!(out, "Observed at {} UTC", observed_at.format("%H:%M"));
    }
}
