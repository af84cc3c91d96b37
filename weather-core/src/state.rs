//! View state and the reducer that owns every mutation of it.
//!
//! The four fields are independent: a card from an earlier success
//! stays visible when a later lookup fails.

use crate::{FetchError, WeatherResult, error::EMPTY_QUERY_MESSAGE};

/// Everything the screen needs to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Text currently in the input box.
    pub query: String,

    /// A lookup is in flight.
    pub loading: bool,

    /// Banner text from the last failed submit.
    pub error: Option<String>,

    /// Last successful lookup.
    pub weather: Option<WeatherResult>,
}

impl ViewState {
    /// Submitting is a UI affordance only; the reducer itself never refuses a submit.
    pub fn can_submit(&self) -> bool {
        !self.loading
    }
}

#[derive(Debug)]
pub enum Action {
    /// The input text changed.
    QueryChange(String),

    /// The user submitted the current query.
    Submit,

    /// Result: lookup succeeded.
    FetchDidLoad(WeatherResult),

    /// Result: lookup failed.
    FetchDidFail(FetchError),
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchWeather { location: String },
}

pub fn reducer(state: &mut ViewState, action: Action) -> Option<Effect> {
    match action {
        Action::QueryChange(text) => {
            state.query = text;
            None
        }

        Action::Submit => {
            if state.query.trim().is_empty() {
                state.error = Some(EMPTY_QUERY_MESSAGE.to_string());
                return None;
            }

            state.error = None;
            state.loading = true;
            Some(Effect::FetchWeather {
                location: state.query.clone(),
            })
        }

        Action::FetchDidLoad(result) => {
            state.weather = Some(result);
            state.error = None;
            state.query.clear();
            state.loading = false;
            None
        }

        Action::FetchDidFail(err) => {
            state.error = Some(err.user_message().to_string());
            state.loading = false;
            None
        }
    }
}
