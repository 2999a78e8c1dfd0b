//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap fetcher behind the [`WeatherProvider`] trait
//! - The view state, its single writer ([`Session`]) and the text renderer
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod session;

pub use config::Config;
pub use error::FetchError;
pub use model::{Query, ViewState, WeatherResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use render::{icon_for, render};
pub use session::{Session, Ticket};
