use anyhow::Context;
use assistant_core::{
    AssistantApi, Config, FetchOrchestrator, InputController, RequestStatus, StalePolicy, SubmitOutcome,
    api_from_config, input::is_iso_date_shape, view,
};
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, Select, Text, validator::Validation};
use std::process::ExitCode;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "assistant", version, about = "Personal weather assistant")]
pub struct Cli {
    /// Log requests and state changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the configured backend origin.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the stored configuration interactively.
    Configure,

    /// Fetch the forecast and recommendation once and print them.
    Show {
        /// City name; falls back to the configured default city.
        #[arg(short, long)]
        city: Option<String>,

        /// Date as YYYY-MM-DD; defaults to today.
        #[arg(short, long)]
        date: Option<String>,

        /// Print the raw result state as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for city and date repeatedly.
    Interactive,

    /// Check that the backend is up.
    Health,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let mut config = Config::load()?;
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        tracing::debug!(base_url = %config.base_url, stale_policy = %config.stale_policy, "configuration loaded");

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, date, json } => show(&config, city, date, json).await,
            Command::Interactive => interactive(&config).await,
            Command::Health => health(&config).await,
        }
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

async fn show(
    config: &Config,
    city: Option<String>,
    date: Option<String>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let city = config.city_or_default(city)?;
    let input = InputController::new(city, date.unwrap_or_else(today));

    let orchestrator = FetchOrchestrator::new(api_from_config(config)?, config.stale_policy);
    if let SubmitOutcome::Rejected = orchestrator.submit(&input).await {
        anyhow::bail!(
            "Nothing submitted: the city must not be blank and the date must look like YYYY-MM-DD (got '{}').",
            input.date()
        );
    }

    let snapshot = orchestrator.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render::to_text(&view::render(&snapshot)));
    }

    Ok(exit_code(&snapshot.status))
}

async fn interactive(config: &Config) -> anyhow::Result<ExitCode> {
    let orchestrator = FetchOrchestrator::new(api_from_config(config)?, config.stale_policy);
    let mut input = InputController::new(config.default_city.clone().unwrap_or_default(), today());

    loop {
        let city = Text::new("City:")
            .with_default(input.location())
            .with_validator(|s: &str| {
                Ok(if s.trim().is_empty() {
                    Validation::Invalid("Enter a city.".into())
                } else {
                    Validation::Valid
                })
            })
            .prompt();
        let Some(city) = cancelled_to_none(city)? else { break };
        input.set_location(city);

        let date = Text::new("Date (YYYY-MM-DD):")
            .with_default(input.date())
            .with_validator(|s: &str| {
                Ok(if is_iso_date_shape(s) {
                    Validation::Valid
                } else {
                    Validation::Invalid("Use the YYYY-MM-DD format.".into())
                })
            })
            .prompt();
        let Some(date) = cancelled_to_none(date)? else { break };
        input.set_date(date);

        eprintln!("Working…");
        orchestrator.submit(&input).await;
        println!("\n{}", render::to_text(&view::render(&orchestrator.snapshot())));

        let again = Confirm::new("Look up another?").with_default(true).prompt();
        if !cancelled_to_none(again)?.unwrap_or(false) {
            break;
        }
    }

    Ok(exit_code(&orchestrator.snapshot().status))
}

async fn health(config: &Config) -> anyhow::Result<ExitCode> {
    let api = api_from_config(config)?;
    let health = api
        .health()
        .await
        .with_context(|| format!("Health check against {} failed", config.base_url))?;

    println!("{}: {}", config.base_url, health.status);
    Ok(if health.status == "ok" { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn configure(mut config: Config) -> anyhow::Result<ExitCode> {
    let base_url = Text::new("Backend URL:").with_default(&config.base_url).prompt()?;
    config.base_url = base_url.trim().to_string();

    let city = Text::new("Default city (empty for Zagreb):")
        .with_default(config.default_city.as_deref().unwrap_or(""))
        .prompt()?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let timeout = Text::new("Request timeout in seconds (empty for none):")
        .with_default(&config.timeout_secs.map(|t| t.to_string()).unwrap_or_default())
        .with_validator(|s: &str| {
            Ok(if s.trim().is_empty() || s.trim().parse::<u64>().is_ok() {
                Validation::Valid
            } else {
                Validation::Invalid("Enter a whole number of seconds.".into())
            })
        })
        .prompt()?;
    config.timeout_secs = timeout.trim().parse().ok();

    let current = StalePolicy::all().iter().position(|p| *p == config.stale_policy).unwrap_or(0);
    config.stale_policy = Select::new(
        "When an older lookup finishes after a newer one started:",
        StalePolicy::all().to_vec(),
    )
    .with_starting_cursor(current)
    .prompt()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn cancelled_to_none<T>(answer: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn exit_code(status: &RequestStatus) -> ExitCode {
    if failed(status) { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn failed(status: &RequestStatus) -> bool {
    status.error_message().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_flags() {
        let cli = Cli::try_parse_from([
            "assistant", "--base-url", "http://localhost:9000", "show", "-c", "Zagreb", "-d", "2025-12-20", "--json",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Command::Show { city, date, json } => {
                assert_eq!(city.as_deref(), Some("Zagreb"));
                assert_eq!(date.as_deref(), Some("2025-12-20"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn today_has_iso_shape() {
        assert!(is_iso_date_shape(&today()));
    }

    #[test]
    fn only_errors_fail_the_process() {
        assert!(!failed(&RequestStatus::Success));
        assert!(!failed(&RequestStatus::Idle));
        assert!(failed(&RequestStatus::Error("x".into())));
    }
}
