use crate::{Config, FetchError, WeatherResult, provider::visualcrossing::VisualCrossingProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod visualcrossing;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-text location.
    async fn current_conditions(&self, location: &str) -> Result<WeatherResult, FetchError>;
}

/// Construct the Visual Crossing provider from config.
///
/// A missing API key is not an error here; the request goes out with an empty
/// key and the API rejects it.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    let api_key = match config.api_key() {
        Some(key) => key.to_owned(),
        None => {
            tracing::warn!("no API key configured; requests will be rejected by the API");
            String::new()
        }
    };

    Arc::new(VisualCrossingProvider::with_base_url(
        api_key,
        config.timeline_base_url().to_owned(),
    ))
}
