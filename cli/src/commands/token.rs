// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Bearer token tooling
//!
//! Tokens are signed with the configured `spec.auth.jwt_secret`, so a console
//! started from the same configuration accepts them.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use fleet_core::domain::access::UserId;
use fleet_core::domain::config::ConsoleConfig;
use fleet_core::infrastructure::auth::{TokenIssuer, TokenRole};

#[derive(Subcommand)]
pub enum TokenCommand {
    /// Issue a signed token for a user
    Issue {
        #[arg(long)]
        user_id: u32,

        #[arg(long)]
        username: String,

        /// Grant administrator visibility
        #[arg(long)]
        admin: bool,

        /// Token lifetime in hours
        #[arg(long, default_value_t = 8)]
        ttl_hours: i64,
    },
}

pub async fn handle_command(command: TokenCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        TokenCommand::Issue {
            user_id,
            username,
            admin,
            ttl_hours,
        } => {
            let config = ConsoleConfig::load_or_default(config_override).context("Failed to load configuration")?;
            let token = issue(&config, UserId(user_id), &username, admin, ttl_hours)?;
            println!("{}", token);
            Ok(())
        }
    }
}

pub fn issue(config: &ConsoleConfig, user_id: UserId, username: &str, admin: bool, ttl_hours: i64) -> Result<String> {
    if ttl_hours <= 0 {
        anyhow::bail!("--ttl-hours must be positive");
    }

    let secret = config.resolved_jwt_secret()?;
    let issuer = TokenIssuer::new(&secret, config.spec.auth.issuer.clone())
        .context("Cannot issue tokens without spec.auth.jwt_secret")?;

    let role = if admin {
        TokenRole::Administrator
    } else {
        TokenRole::Standard
    };
    issuer.issue(user_id, username, role, chrono::Duration::hours(ttl_hours))
}
