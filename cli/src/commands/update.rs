// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Database Update Command
//!
//! Implements `fleet-console update`, which applies pending migrations so
//! the PostgreSQL schema matches the console version.
//!
//! # Usage
//!
//! ```bash
//! # Apply all pending migrations
//! fleet-console update
//!
//! # Preview migrations without applying
//! fleet-console update --dry-run
//! ```
//!
//! The database URL comes from `FLEET_CONSOLE_DATABASE_URL` or
//! `spec.storage.database_url`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;

use fleet_core::domain::config::{resolve_env_value, ConsoleConfig};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Args)]
pub struct UpdateCommand {
    /// Perform a dry run without applying changes
    #[arg(long)]
    dry_run: bool,
}

pub async fn execute(cmd: UpdateCommand, config_override: Option<PathBuf>) -> Result<()> {
    println!("{}", "Fleet Console Update".bold().green());

    let config = ConsoleConfig::load_or_default(config_override).context("Failed to load configuration")?;
    let database_url = config
        .spec
        .storage
        .database_url
        .as_deref()
        .context("No database configured. Set FLEET_CONSOLE_DATABASE_URL or spec.storage.database_url.")?;
    let database_url = resolve_env_value(database_url)?;

    println!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let applied_count = sqlx::query("SELECT version FROM _sqlx_migrations")
        .fetch_all(&pool)
        .await
        .map(|rows| rows.len())
        .unwrap_or(0);

    let total_migrations = MIGRATOR.iter().count();

    println!(
        "Migration status: {} applied, {} total available.",
        applied_count, total_migrations
    );

    if applied_count < total_migrations {
        if cmd.dry_run {
            println!("Pending migrations found (Dry Run):");
            for migration in MIGRATOR.iter().skip(applied_count) {
                println!(" - {} {}", migration.version, migration.description);
            }
            println!("Skipping application due to --dry-run");
            return Ok(());
        }

        println!("Applying pending migrations...");
        MIGRATOR.run(&pool).await.context("Failed to apply migrations")?;
        println!("{}", "✓ Database updated successfully.".green());
    } else {
        println!("{}", "✓ Database is up to date.".green());
    }

    Ok(())
}
