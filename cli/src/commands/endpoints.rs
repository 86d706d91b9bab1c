// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Endpoint queries against a running console
//!
//! Commands: list

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use fleet_core::domain::endpoint::{Endpoint, EndpointStatus};
use fleet_sdk::{EndpointListRequest, FleetConsoleClient};

#[derive(Subcommand)]
pub enum EndpointsCommand {
    /// List endpoints visible to the token's principal
    List {
        /// Console base URL
        #[arg(long, env = "FLEET_CONSOLE_URL", default_value = "http://127.0.0.1:9000")]
        server: String,

        /// Bearer token (see `fleet-console token issue`)
        #[arg(long, env = "FLEET_CONSOLE_TOKEN")]
        token: Option<String>,

        /// 1-based position of the first endpoint
        #[arg(long)]
        start: Option<usize>,

        /// Page size (0 = unlimited)
        #[arg(long)]
        limit: Option<usize>,

        /// Case-insensitive search on name, URL, tags, status and group
        #[arg(long)]
        filter: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_command(command: EndpointsCommand) -> Result<()> {
    match command {
        EndpointsCommand::List {
            server,
            token,
            start,
            limit,
            filter,
            json,
        } => {
            let request = EndpointListRequest { start, limit, filter };
            list(&server, token, &request, json).await
        }
    }
}

async fn list(server: &str, token: Option<String>, request: &EndpointListRequest, json: bool) -> Result<()> {
    let mut client = FleetConsoleClient::new(server);
    if let Some(token) = token {
        client = client.with_token(token);
    }

    let page = client
        .list_endpoints(request)
        .await
        .with_context(|| format!("Failed to list endpoints from {}", server))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page.endpoints)?);
        return Ok(());
    }

    if page.endpoints.is_empty() {
        println!("{}", "No endpoints found".yellow());
    } else {
        println!(
            "{:<6} {:<28} {:<16} {:<6} {:<8} {}",
            "ID".bold(),
            "NAME".bold(),
            "TYPE".bold(),
            "GROUP".bold(),
            "STATUS".bold(),
            "URL".bold()
        );
        for endpoint in &page.endpoints {
            println!("{}", format_row(endpoint));
        }
    }

    println!();
    println!(
        "{} of {} total",
        page.endpoints.len().to_string().bold(),
        page.total_count
    );
    Ok(())
}

fn format_row(endpoint: &Endpoint) -> String {
    let status = match endpoint.status {
        EndpointStatus::Up => endpoint.status.as_str().green(),
        EndpointStatus::Down => endpoint.status.as_str().red(),
    };
    let endpoint_type = serde_json::to_value(endpoint.endpoint_type)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    format!(
        "{:<6} {:<28} {:<16} {:<6} {:<8} {}",
        endpoint.id, endpoint.name, endpoint_type, endpoint.group_id, status, endpoint.url
    )
}
