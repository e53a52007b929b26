use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use tracing::{info, warn};
use weather_tools_core::{
    Config, OpenWeatherClient, WeatherTools, provider_from_config, tool_definitions,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-tools", version, about = "Weather lookup tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key in the config file.
    Configure,

    /// Show current conditions for a city.
    Current {
        city: String,
    },

    /// Show a multi-day forecast for a city.
    Forecast {
        city: String,

        /// Number of days, 1 to 5.
        #[arg(long, short, default_value_t = 3, allow_negative_numbers = true)]
        days: i64,
    },

    /// Show active weather alerts for a city.
    Alerts {
        city: String,
    },

    /// Dispatch a raw tool call, e.g. '{"name":"GetCurrentWeather","arguments":{"city":"Oslo"}}'.
    Call {
        json: String,
    },

    /// Print the tool definitions as JSON.
    Tools,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = config_or_default(Config::load());

        let output = match self.command {
            Command::Configure => return configure(config),
            Command::Tools => serde_json::to_string_pretty(&tool_definitions())?,
            Command::Current { city } => tools(&config).get_current_weather(&city).await,
            Command::Forecast { city, days } => {
                tools(&config).get_weather_forecast(&city, days).await
            }
            Command::Alerts { city } => tools(&config).get_weather_alerts(&city).await,
            Command::Call { json } => tools(&config).call_json(&json).await,
        };

        println!("{output}");
        Ok(())
    }
}

/// A broken config file must not turn tool calls into hard failures: the
/// tools then report the missing key themselves.
fn config_or_default(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|e| {
        warn!(error = %format!("{e:#}"), "ignoring unreadable config file");
        Config::default()
    })
}

fn tools(config: &Config) -> WeatherTools<OpenWeatherClient> {
    WeatherTools::new(provider_from_config(config))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    config.save()?;

    info!(path = %Config::config_file_path()?.display(), "saved API key");
    println!("API key saved.");

    Ok(())
}
