// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use fleet_core::domain::config::{ConsoleConfig, StorageBackendKind};

const MINIMAL_TEMPLATE: &str = include_str!("../../templates/config-minimal.yaml");
const EXAMPLES_TEMPLATE: &str = include_str!("../../templates/config-with-examples.yaml");
const SEED_TEMPLATE: &str = include_str!("../../templates/fleet-seed.yaml");

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./fleet-console.yaml)
        #[arg(short, long, default_value = "./fleet-console.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,

        /// Also write a sample fixture next to the configuration
        #[arg(long)]
        seed: bool,
    },
}

pub async fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate {
            output,
            examples,
            seed,
        } => generate(output, examples, seed).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = ConsoleConfig::load_or_default(config_override.clone()).context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. FLEET_CONSOLE_CONFIG_PATH: {}",
            std::env::var("FLEET_CONSOLE_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./fleet-console.yaml");
        println!("  4. ~/.fleet-console/config.yaml");
        println!("  5. /etc/fleet-console/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Console:".bold());
    println!("  Name: {}", config.metadata.name);
    if let Some(version) = &config.metadata.version {
        println!("  Version: {}", version);
    }
    println!();

    let server = &config.spec.server;
    println!("{}", "Server:".bold());
    println!("  Listen: {}:{}", server.host, server.port);
    println!("  Request timeout: {}s", server.request_timeout_seconds);
    println!();

    let storage = &config.spec.storage;
    println!("{}", "Storage:".bold());
    match storage.backend {
        StorageBackendKind::InMemory => println!("  Backend: in-memory"),
        StorageBackendKind::Postgres => {
            println!("  Backend: postgres");
            println!(
                "  Database: {}",
                if storage.database_url.is_some() {
                    "(set)".normal()
                } else {
                    "(not set)".red()
                }
            );
            println!("  Max connections: {}", storage.max_connections);
        }
    }
    if let Some(seed) = &storage.seed_file {
        println!("  Seed file: {}", seed.display());
    }
    println!();

    println!("{}", "Auth:".bold());
    println!(
        "  Token secret: {}",
        if config.spec.auth.jwt_secret.is_empty() {
            "(not set)".red()
        } else {
            "(set)".normal()
        }
    );
    println!("  Issuer: {}", config.spec.auth.issuer.as_deref().unwrap_or("(unchecked)"));
    println!();

    println!("{}", "Observability:".bold());
    println!("  Log level: {}", config.spec.observability.log_level);
    match config.spec.observability.metrics_port {
        Some(port) => println!("  Metrics port: {}", port),
        None => println!("  Metrics port: {}", "(disabled)".dimmed()),
    }
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ConsoleConfig::load_or_default(config_path).context("Failed to load configuration")?;

    config.validate().context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf, with_examples: bool, with_seed: bool) -> Result<()> {
    let sample = if with_examples {
        EXAMPLES_TEMPLATE
    } else {
        MINIMAL_TEMPLATE
    };

    std::fs::write(&output, sample).with_context(|| format!("Failed to write config to {:?}", output))?;

    println!("{}", format!("✓ Configuration generated: {}", output.display()).green());

    if with_seed {
        let seed_path = output.with_file_name("fleet-seed.yaml");
        std::fs::write(&seed_path, SEED_TEMPLATE)
            .with_context(|| format!("Failed to write fixture to {:?}", seed_path))?;
        println!("{}", format!("✓ Fixture generated: {}", seed_path.display()).green());
    }

    Ok(())
}
