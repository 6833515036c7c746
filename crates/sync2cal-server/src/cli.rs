//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sync2cal_core::TracingOutputFormat;

/// sync2cal - Third-party events as calendar feeds
#[derive(Debug, Parser)]
#[command(name = "sync2cal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "SYNC2CAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log format: pretty, compact or json
    #[arg(long, value_parser = parse_log_format)]
    pub log_format: Option<TracingOutputFormat>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind, overriding the config file
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on, overriding the config file
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Fetch events from one integration and print them
    Fetch {
        /// Integration id, e.g. daily-weather-forecast
        integration: String,

        /// Integration parameter as key=value (can be repeated)
        #[arg(long = "param", short = 'P', value_parser = parse_key_value, action = clap::ArgAction::Append)]
        params: Vec<(String, String)>,

        /// Print a JSON array instead of ICS
        #[arg(long)]
        json: bool,
    },

    /// List registered integrations and their parameters
    Integrations,
}

fn parse_log_format(raw: &str) -> Result<TracingOutputFormat, String> {
    raw.parse().map_err(|e: sync2cal_core::TracingError| e.to_string())
}

/// Parses `key=value`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.trim().is_empty() {
        return Err(format!("empty parameter name in '{}'", raw));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
