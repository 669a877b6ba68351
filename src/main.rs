use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use travelplanner::api::AppState;
use travelplanner::{
    ItineraryNormalizer, ItineraryPlanner, PersistentCache, PlannerSettings, Result,
    TravelAiConfig, TravelAiError, TripDuration, TripRequest, llm, logging, web,
};

#[derive(Parser)]
#[command(
    name = "travelplanner",
    version,
    about = "AI-assisted trip itinerary generation and normalization"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the trip length and the number of days requested from the model
    Days {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
    /// Normalize raw itinerary text from a file or stdin
    Parse {
        /// File with the model output; reads stdin when omitted
        file: Option<PathBuf>,
        /// Fail when no day sections with activities are found
        #[arg(long)]
        strict: bool,
        /// Print a plain-text layout instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// Generate an itinerary with the configured provider
    Plan {
        #[arg(long)]
        location: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value = "")]
        start_time: String,
        #[arg(long, default_value = "")]
        end_time: String,
        #[arg(long, default_value_t = 0)]
        budget: i64,
        #[arg(long, default_value_t = 1)]
        participants: u32,
        /// Kind of trip (leisure, adventure, business, ...)
        #[arg(long = "type", default_value = "")]
        trip_type: String,
        /// Travel range (local, domestic, international, ...)
        #[arg(long, default_value = "")]
        range: String,
        /// Skip the itinerary cache
        #[arg(long)]
        no_cache: bool,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the JSON HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
        /// Skip the itinerary cache
        #[arg(long)]
        no_cache: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match TravelAiConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging, cli.verbose) {
        eprintln!("Warning: {e:#}");
    }

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {e}");
            eprintln!("Error: {}", e.user_message());
            if cli.verbose {
                eprintln!("Details: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: TravelAiConfig) -> Result<()> {
    match command {
        Commands::Days { start, end } => {
            let duration = TripDuration::from_dates(start.as_deref(), end.as_deref());
            println!("Trip length: {} day(s)", duration.diff_days);
            println!("Days requested: {}", duration.total_days);
            Ok(())
        }
        Commands::Parse { file, strict, text } => {
            let raw = match file {
                Some(path) => tokio::fs::read_to_string(&path).await?,
                None => {
                    let mut buffer = String::new();
                    tokio::io::stdin().read_to_string(&mut buffer).await?;
                    buffer
                }
            };

            let normalizer = normalizer_for(&config);
            let parsed = if strict {
                normalizer.normalize_strict(&raw)?
            } else {
                normalizer.normalize(&raw)
            };

            if text {
                print!("{}", parsed.format_text());
            } else {
                println!("{}", to_json(&parsed)?);
            }
            Ok(())
        }
        Commands::Plan {
            location,
            start,
            end,
            start_time,
            end_time,
            budget,
            participants,
            trip_type,
            range,
            no_cache,
            json,
        } => {
            let request = TripRequest {
                location,
                start_date: start,
                end_date: end,
                start_time,
                end_time,
                budget,
                participants,
                trip_type,
                range,
            };
            let planner = build_planner(&config, no_cache)?;
            let generated = planner.plan(&request).await?;

            if json {
                println!("{}", to_json(&generated)?);
            } else {
                println!(
                    "Itinerary for {} ({} of {} day(s){})",
                    generated.request.location,
                    generated.itinerary.days.len(),
                    generated.total_days,
                    if generated.cached { ", cached" } else { "" }
                );
                print!("{}", generated.itinerary.format_text());
            }
            Ok(())
        }
        Commands::Serve { port, no_cache } => {
            let planner = match build_planner(&config, no_cache) {
                Ok(planner) => Some(Arc::new(planner)),
                Err(e) => {
                    warn!("Itinerary generation disabled: {e}");
                    None
                }
            };
            let mut state = AppState::new(planner);
            state.normalizer = normalizer_for(&config);

            let port = port.unwrap_or(config.defaults.server_port);
            web::run(port, state).await?;
            Ok(())
        }
    }
}

fn normalizer_for(config: &TravelAiConfig) -> ItineraryNormalizer {
    let normalizer = ItineraryNormalizer::new();
    match config.defaults.currency_symbol.chars().next() {
        Some(marker) => normalizer.with_currency_marker(marker),
        None => normalizer,
    }
}

fn build_planner(config: &TravelAiConfig, no_cache: bool) -> Result<ItineraryPlanner> {
    let client = llm::build_client(&config.llm)?;

    let cache = if config.cache.enabled && !no_cache {
        match config
            .cache
            .resolve_location()
            .and_then(|path| PersistentCache::open(path))
        {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!("Continuing without itinerary cache: {e:#}");
                None
            }
        }
    } else {
        None
    };

    info!(
        "Using {} ({}), cache {}",
        client.provider(),
        config.llm.effective_model(),
        if cache.is_some() { "enabled" } else { "disabled" }
    );
    Ok(ItineraryPlanner::new(client, cache, PlannerSettings::from(config)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| TravelAiError::general(format!("Failed to encode output: {e}")))
}
