//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "trailfinder")]
#[command(author, version, about = "Find hiking trails near a location", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Search {
        #[arg(short, long)]
        location: String,
        #[arg(short, long)]
        radius: f64,
        #[arg(long)]
        html: Option<PathBuf>,
        #[arg(long)]
        focus: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    Trails,
    Config,
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_search_command() {
    let cli = parse_args(&["trailfinder", "search", "--location", "19103", "--radius", "15"]).unwrap();
    if let Commands::Search {
        location,
        radius,
        html,
        focus,
        json,
    } = cli.command
    {
        assert_eq!(location, "19103");
        assert!((radius - 15.0).abs() < f64::EPSILON);
        assert!(html.is_none());
        assert!(focus.is_none());
        assert!(!json);
    } else {
        panic!("Expected Search command");
    }
}

#[test]
fn cli_parses_search_short_flags() {
    let cli = parse_args(&[
        "trailfinder",
        "search",
        "-l",
        "123 Fake St, Springfield",
        "-r",
        "10.5",
    ])
    .unwrap();
    if let Commands::Search {
        location, radius, ..
    } = cli.command
    {
        assert_eq!(location, "123 Fake St, Springfield");
        assert!((radius - 10.5).abs() < f64::EPSILON);
    } else {
        panic!("Expected Search command");
    }
}

#[test]
fn cli_parses_search_with_outputs() {
    let cli = parse_args(&[
        "trailfinder",
        "search",
        "-l",
        "19103",
        "-r",
        "5",
        "--html",
        "map.html",
        "--focus",
        "2",
        "--json",
    ])
    .unwrap();
    if let Commands::Search {
        html, focus, json, ..
    } = cli.command
    {
        assert_eq!(html, Some(PathBuf::from("map.html")));
        assert_eq!(focus, Some(2));
        assert!(json);
    } else {
        panic!("Expected Search command");
    }
}

#[test]
fn cli_search_requires_location_and_radius() {
    assert!(parse_args(&["trailfinder", "search", "--radius", "10"]).is_err());
    assert!(parse_args(&["trailfinder", "search", "--location", "19103"]).is_err());
}

#[test]
fn cli_rejects_non_numeric_radius() {
    let result = parse_args(&["trailfinder", "search", "-l", "19103", "-r", "ten"]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_trails_command() {
    let cli = parse_args(&["trailfinder", "trails"]).unwrap();
    assert!(matches!(cli.command, Commands::Trails));
}

#[test]
fn cli_parses_config_command() {
    let cli = parse_args(&["trailfinder", "config"]).unwrap();
    assert!(matches!(cli.command, Commands::Config));
}

#[test]
fn cli_parses_distance_with_negative_coordinates() {
    let cli = parse_args(&["trailfinder", "distance", "40.0", "-75.0", "40.05", "-75.05"]).unwrap();
    if let Commands::Distance {
        lat1,
        lon1,
        lat2,
        lon2,
    } = cli.command
    {
        assert!((lat1 - 40.0).abs() < f64::EPSILON);
        assert!((lon1 + 75.0).abs() < f64::EPSILON);
        assert!((lat2 - 40.05).abs() < f64::EPSILON);
        assert!((lon2 + 75.05).abs() < f64::EPSILON);
    } else {
        panic!("Expected Distance command");
    }
}

#[test]
fn cli_distance_requires_four_values() {
    assert!(parse_args(&["trailfinder", "distance", "40.0", "-75.0", "40.05"]).is_err());
}

#[test]
fn cli_parses_verbosity_and_config() {
    let cli = parse_args(&["trailfinder", "-vv", "--config", "custom.toml", "trails"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["trailfinder"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(parse_args(&["trailfinder", "chat", "hello"]).is_err());
}
