use std::sync::Arc;

use crate::{
    WeatherProvider,
    state::{Action, Effect, ViewState, reducer},
};

/// Perform a reducer effect and turn its outcome into the result action.
pub async fn run_effect(provider: &dyn WeatherProvider, effect: Effect) -> Action {
    match effect {
        Effect::FetchWeather { location } => {
            match provider.current_conditions(&location).await {
                Ok(result) => Action::FetchDidLoad(result),
                Err(err) => Action::FetchDidFail(err),
            }
        }
    }
}

/// Owns a [`ViewState`] and drives lookups to completion one at a time.
///
/// Front ends that need overlapping requests use [`reducer`] and [`run_effect`]
/// directly and feed result actions back themselves.
#[derive(Debug)]
pub struct WeatherController {
    state: ViewState,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherController {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            state: ViewState::default(),
            provider,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn provider(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.provider)
    }

    /// Apply an action and return the effect it requests, without running it.
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        reducer(&mut self.state, action)
    }

    pub fn input_change(&mut self, text: impl Into<String>) {
        self.dispatch(Action::QueryChange(text.into()));
    }

    /// Submit the current query and wait for the lookup to resolve.
    pub async fn submit(&mut self) {
        let Some(effect) = self.dispatch(Action::Submit) else {
            return;
        };

        tracing::info!(query = %self.state.query, "submitting weather lookup");
        let outcome = run_effect(self.provider.as_ref(), effect).await;
        self.dispatch(outcome);
    }
}
