use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::{debug, info};
use weather_core::{
    Config, FetchError, Session, Ticket, ViewState, WeatherResult, provider_from_config, render,
};

const QUIT: &str = ":q";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and the default city.
    Configure,

    /// Show current weather for one city and exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Prompt for city names until EOF or `:q` (the default).
    Interactive {
        /// City loaded on start; defaults to the configured default city.
        #[arg(long)]
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Some(Command::Configure) => configure(config),
            Some(Command::Show { city }) => show(&config, &city).await,
            Some(Command::Interactive { city }) => interactive(&config, city).await,
            None => interactive(&config, None).await,
        }
    }
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.api_key = Some(api_key.trim().to_string());
    if !default_city.trim().is_empty() {
        config.default_city = default_city.trim().to_string();
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn show(config: &Config, city: &str) -> Result<()> {
    let provider = provider_from_config(config)?;
    let mut session = Session::new(Arc::new(provider));

    print_view(session.search(city).await)
}

type Completion = (Ticket, Result<WeatherResult, FetchError>);

/// Prompt loop. This task is the only writer of the session; fetches run on
/// spawned tasks and report back over a channel.
async fn interactive(config: &Config, city: Option<String>) -> Result<()> {
    let provider = provider_from_config(config)?;
    let mut session = Session::new(Arc::new(provider));

    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut in_flight: Option<JoinHandle<()>> = None;

    let seed = city.unwrap_or_else(|| config.default_city.clone());
    submit(&mut session, &seed, &tx, &mut in_flight);
    print_view(session.state())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if line.trim() == QUIT {
                    break;
                }

                submit(&mut session, &line, &tx, &mut in_flight);
                print_view(session.state())?;
            }
            Some((ticket, outcome)) = rx.recv() => {
                if session.complete(&ticket, outcome) {
                    print_view(session.state())?;
                }
            }
        }
    }

    if let Some(handle) = in_flight.take() {
        handle.abort();
    }

    Ok(())
}

/// Starts a lookup for `input`, cancelling whatever was still running.
fn submit(
    session: &mut Session,
    input: &str,
    tx: &mpsc::UnboundedSender<Completion>,
    in_flight: &mut Option<JoinHandle<()>>,
) {
    if let Some(handle) = in_flight.take() {
        handle.abort();
    }

    let Some(ticket) = session.submit(input) else {
        debug!("Empty query, back to idle");
        return;
    };

    info!(city = %ticket.query(), generation = ticket.generation(), "Starting lookup");

    let fetcher = session.fetcher();
    let tx = tx.clone();
    *in_flight = Some(tokio::spawn(async move {
        let outcome = fetcher.current_weather(ticket.query()).await;
        // The receiver only goes away on shutdown.
        let _ = tx.send((ticket, outcome));
    }));
}

fn print_view(state: &ViewState) -> Result<()> {
    let mut stdout = std::io::stdout().lock();

    writeln!(stdout, "{}", render(state)).context("Failed to write to stdout")?;
    if !state.is_loading() {
        write!(stdout, "> ").context("Failed to write to stdout")?;
    }
    stdout.flush().context("Failed to flush stdout")?;

    Ok(())
}
