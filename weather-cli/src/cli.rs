use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{
    Config, ViewState, WeatherController, config::API_KEY_ENV, provider_from_config,
    view::card_lines,
};

use crate::{app, logging};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather for a city, powered by Visual Crossing"
)]
pub struct Cli {
    /// Log filter for the log file, e.g. "debug" or "weather_core=trace".
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Without a subcommand the interactive screen opens.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Visual Crossing API key in the config file.
    Configure,

    /// Print current conditions for a city and exit.
    Show {
        /// City or address, passed to the API as typed.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?.with_env_api_key(std::env::var(API_KEY_ENV).ok());

        let level = self.log_level.as_deref().unwrap_or(config.log_level());
        logging::init_tracing(level)?;

        match self.command {
            None => app::run(provider_from_config(&config)).await,
            Some(Command::Show { city }) => show(&config, city).await,
            Some(Command::Configure) => configure(),
        }
    }
}

async fn show(config: &Config, city: String) -> anyhow::Result<()> {
    let mut controller = WeatherController::new(provider_from_config(config));
    controller.input_change(city);
    controller.submit().await;

    for line in report(controller.state())? {
        println!("{line}");
    }

    Ok(())
}

/// Card lines for a finished lookup, or its banner text as an error.
fn report(state: &ViewState) -> anyhow::Result<[String; 3]> {
    if let Some(error) = state.error.as_deref() {
        bail!("{error}");
    }

    match state.weather.as_ref() {
        Some(weather) => Ok(card_lines(weather)),
        None => bail!("No weather data received."),
    }
}

fn configure() -> anyhow::Result<()> {
    // Start from the file alone so an environment key is never persisted.
    let mut config = Config::load()?;

    let key = Password::new("Visual Crossing API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(key.to_string());
    config.save()?;
    tracing::info!("API key updated");

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}
