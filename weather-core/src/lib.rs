//! Core library for the `weather` lookup app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The Visual Crossing client behind the `WeatherProvider` trait
//! - View state, its reducer and the controller that drives lookups
//! - Card text shared by every front end
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;
pub mod state;
pub mod view;

pub use config::Config;
pub use controller::{WeatherController, run_effect};
pub use error::FetchError;
pub use model::WeatherResult;
pub use provider::{WeatherProvider, provider_from_config};
pub use state::{Action, Effect, ViewState, reducer};
