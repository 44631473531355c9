//! route-bridge command line.
//!
//! ```text
//! route-bridge.toml
//!     → config (parse, validate)
//!     → Router::from_config (autoload templates, explicit routes)
//!     → check | match | routes | dispatch | request
//! ```
//!
//! Template output goes to stdout, logs go to stderr.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use route_bridge::config::{load_config, BridgeConfig};
use route_bridge::observability::logging::init_logging;
use route_bridge::routing::path::prepare_pathname;
use route_bridge::routing::{dynamic_match, validate_route};
use route_bridge::{Environment, Router};

const DEFAULT_CONFIG: &str = "route-bridge.toml";

#[derive(Parser)]
#[command(name = "route-bridge")]
#[command(about = "Register template routes and dispatch requests against them", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./route-bridge.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request header, repeatable (`-H Bridge=1`)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route or endpoint
    Check {
        route: String,
        /// Require this prefix as the first segment
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Match a path against a pattern and print the captures
    Match { pattern: String, path: String },
    /// List registered routes
    Routes,
    /// Dispatch a path below the prefix
    Dispatch {
        path: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
    },
    /// Admit a full request URI through the router prefix
    Request {
        uri: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let config = resolve_config(cli.config.as_deref())?;
    init_logging(&config.observability.log_level);

    tracing::debug!(
        prefix = %config.prefix,
        location = %config.templates.location,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Check { route, prefix } => {
            let prefix = prefix.as_deref().map(prepare_pathname).unwrap_or_default();
            match validate_route(&route, &prefix) {
                Ok(()) => {
                    println!("valid");
                    Ok(true)
                }
                Err(reason) => {
                    println!("invalid: {reason}");
                    Ok(false)
                }
            }
        }
        Commands::Match { pattern, path } => {
            let pattern = prepare_pathname(&pattern);
            let path = prepare_pathname(&path);
            match dynamic_match(&pattern, &path) {
                Some(captures) => {
                    println!("{}", serde_json::to_string_pretty(&captures)?);
                    Ok(true)
                }
                None => {
                    println!("null");
                    Ok(false)
                }
            }
        }
        Commands::Routes => {
            let router = Router::from_config(&config);
            let routes: Vec<_> = router
                .patterns()
                .filter_map(|pattern| {
                    let handler = router.handler(pattern)?;
                    Some(json!({
                        "pattern": pattern,
                        "identifier": handler.identifier(),
                        "methods": handler.methods(),
                    }))
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&routes)?);
            Ok(true)
        }
        Commands::Dispatch { path, method } => {
            let router = Router::from_config(&config);
            let env = environment(&config, &cli.headers);
            Ok(router.dispatch(&path, &method, &env))
        }
        Commands::Request { uri, method } => {
            let router = Router::from_config(&config);
            let env = environment(&config, &cli.headers);
            Ok(router.route(&uri, &method, &env).is_handled())
        }
    }
}

/// Explicit config must load; the default file is optional.
fn resolve_config(path: Option<&Path>) -> Result<BridgeConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None if Path::new(DEFAULT_CONFIG).is_file() => Ok(load_config(Path::new(DEFAULT_CONFIG))?),
        None => Ok(BridgeConfig::default()),
    }
}

/// Configured environment with command line headers on top.
fn environment(config: &BridgeConfig, headers: &[(String, String)]) -> Environment {
    let mut env = config.environment.to_environment();
    for (name, value) in headers {
        env.set_header(name, value.clone());
    }
    env
}

fn parse_header(value: &str) -> Result<(String, String), String> {
    let (name, value) = value
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{value}`"))?;

    if name.trim().is_empty() {
        return Err("header name is empty".to_string());
    }

    Ok((name.trim().to_string(), value.to_string()))
}
