use reqwest::StatusCode;
use thiserror::Error;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a city name.";
pub const NOT_FOUND_MESSAGE: &str = "City not found. Please try again.";
pub const FAILURE_MESSAGE: &str = "Error fetching weather data. Please try again later.";

/// Why a weather lookup failed.
///
/// Only [`FetchError::NotFound`] is shown differently to the user; every other
/// variant falls into the generic "try again later" category.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("location not found")]
    NotFound,

    #[error("weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected weather response shape: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound)
    }

    /// Text for the error banner.
    pub fn user_message(&self) -> &'static str {
        if self.is_not_found() {
            NOT_FOUND_MESSAGE
        } else {
            FAILURE_MESSAGE
        }
    }
}
