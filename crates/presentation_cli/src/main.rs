//! Trail Finder CLI
//!
//! Finds hiking trails within a radius of a ZIP code or address.

#![allow(clippy::print_stdout)]

mod output;
mod pipeline;

use std::path::PathBuf;

use anyhow::Context;
use application::SearchError;
use application::services::{SearchRequest, TrailLoadState};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, MapPage, MapPageRenderer, init_logging};
use tracing::{info, warn};

/// Trail Finder CLI
#[derive(Parser)]
#[command(name = "trailfinder")]
#[command(author, version, about = "Find hiking trails near a location", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./trailfinder.toml if present)
    #[arg(short, long, env = "TRAILFINDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for trails near a location
    ///
    /// Example: trailfinder search --location 19103 --radius 15
    /// Example: trailfinder search -l "123 Main St, Springfield" -r 10 --html map.html
    Search {
        /// ZIP code or address
        #[arg(short, long)]
        location: String,

        /// Search radius in miles
        #[arg(short, long)]
        radius: f64,

        /// Write the map and result list as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,

        /// Focus the Nth result (1-based) on the map
        #[arg(long)]
        focus: Option<usize>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the trail dataset
    Trails,

    /// Print the effective configuration as TOML
    Config,

    /// Great-circle distance in miles between two coordinates
    Distance {
        /// Latitude of the first point
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// Longitude of the first point
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        /// Latitude of the second point
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Longitude of the second point
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let logging = if cli.verbose > 0 {
        config
            .logging
            .clone()
            .with_filter(log_filter_from_verbosity(cli.verbose))
    } else {
        config.logging.clone()
    };
    init_logging(&logging)?;

    match cli.command {
        Commands::Search {
            location,
            radius,
            html,
            focus,
            json,
        } => {
            let pipeline = pipeline::Pipeline::build(&config)?;
            let load_state = pipeline.service.trails().wait_until_settled().await;
            if let TrailLoadState::Failed(reason) = load_state {
                warn!(%reason, "Trail data unavailable");
            }

            let request = SearchRequest::new(location, radius);
            let outcome = match pipeline.service.search(&request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    println!("❌ {}", e.user_message());
                    std::process::exit(1);
                },
            };

            let region = pipeline.service.results();
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", output::render_results(&outcome, &region));
            }

            if let Some(n) = focus {
                let selected = match n.checked_sub(1) {
                    Some(index) => pipeline.service.select_result(index).await,
                    None => Err(SearchError::UnknownResult(n)),
                };
                match selected {
                    Ok(marker) => info!(%marker, "Focused result {n}"),
                    Err(e) => println!("⚠️  {}", e.user_message()),
                }
            }

            if let Some(path) = html {
                let title = format!("Trails within {} of {}", outcome.radius, request.location);
                let page = MapPage::new(title, pipeline.widget.snapshot())
                    .with_entries(region.entries())
                    .with_no_results(region.shows_no_results())
                    .with_hover_tooltips(config.device.supports_hover)
                    .with_bounce_ms(config.map.bounce_ms);
                MapPageRenderer::new()?.write(&page, &path).await?;
                println!("🗺️  Map written to {}", path.display());
            }
        },

        Commands::Trails => {
            let pipeline = pipeline::Pipeline::build(&config)?;
            match pipeline.service.trails().wait_until_settled().await {
                TrailLoadState::Failed(reason) => {
                    println!(
                        "❌ Failed to load trails from {}: {reason}",
                        config.trails.source
                    );
                    std::process::exit(1);
                },
                _ => print!("{}", output::render_trails(&pipeline.service.trails().all())),
            }
        },

        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        },

        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            println!("{}", output::render_distance(lat1, lon1, lat2, lon2));
        },
    }

    Ok(())
}
