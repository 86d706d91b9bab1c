// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Fleet Console CLI
//!
//! The `fleet-console` binary serves the endpoint listing API and offers
//! operator tooling around it.
//!
//! ## Commands
//!
//! - `fleet-console serve` - Run the HTTP API
//! - `fleet-console endpoints list` - Query a running console
//! - `fleet-console token issue` - Mint a bearer token with the configured secret
//! - `fleet-console config show|validate|generate` - Configuration management
//! - `fleet-console update` - Apply database migrations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use fleet_console::commands::{self, ConfigCommand, EndpointsCommand, TokenCommand};
use fleet_console::server;

/// Fleet Console - list and scope Docker environments across a fleet
#[derive(Parser)]
#[command(name = "fleet-console")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "FLEET_CONSOLE_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "FLEET_CONSOLE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[command(name = "serve")]
    Serve {
        #[command(flatten)]
        args: server::ServeArgs,
    },

    /// Query endpoints on a running console
    #[command(name = "endpoints")]
    Endpoints {
        #[command(subcommand)]
        command: EndpointsCommand,
    },

    /// Bearer token tooling
    #[command(name = "token")]
    Token {
        #[command(subcommand)]
        command: TokenCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Update the console database
    #[command(name = "update")]
    Update {
        #[command(flatten)]
        command: commands::UpdateCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Serve { args }) => server::start_server(cli.config, args).await,
        Some(Commands::Endpoints { command }) => commands::endpoints::handle_command(command).await,
        Some(Commands::Token { command }) => commands::token::handle_command(command, cli.config).await,
        Some(Commands::Config { command }) => commands::config::handle_command(command, cli.config).await,
        Some(Commands::Update { command }) => commands::update::execute(command, cli.config).await,
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
