// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! API server bootstrap for `fleet-console serve`.

use anyhow::{Context, Result};
use clap::Args;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use fleet_core::application::list_endpoints::StandardListEndpointsUseCase;
use fleet_core::application::repository_factory::create_repositories;
use fleet_core::domain::config::ConsoleConfig;
use fleet_core::infrastructure::auth::JwtSecurityContextResolver;
use fleet_core::infrastructure::seed::FleetSeed;
use fleet_core::presentation::api::app;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind address (overrides spec.server.host)
    #[arg(long, env = "FLEET_CONSOLE_HOST")]
    pub host: Option<String>,

    /// HTTP port (overrides spec.server.port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Fixture to load into the store before serving (overrides spec.storage.seed_file)
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,
}

/// Resolve the effective configuration for `serve`.
pub fn resolve_config(config_path: Option<PathBuf>, args: &ServeArgs) -> Result<ConsoleConfig> {
    let mut config = ConsoleConfig::load_or_default(config_path).context("Failed to load configuration")?;

    if let Some(host) = &args.host {
        config.spec.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.spec.server.port = port;
    }
    if let Some(seed) = &args.seed {
        config.spec.storage.seed_file = Some(seed.clone());
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

pub async fn start_server(config_path: Option<PathBuf>, args: ServeArgs) -> Result<()> {
    let config = resolve_config(config_path, &args)?;
    info!(
        console = %config.metadata.name,
        backend = ?config.spec.storage.backend,
        "Fleet console starting"
    );

    if let Some(metrics_port) = config.spec.observability.metrics_port {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()
            .context("Failed to install Prometheus exporter")?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }

    let repositories = create_repositories(&config.storage_backend()?).await?;

    if let Some(seed_file) = &config.spec.storage.seed_file {
        FleetSeed::from_yaml_file(seed_file)?
            .apply(&repositories)
            .await
            .context("Failed to seed the store")?;
    }

    let secret = config.resolved_jwt_secret()?;
    let resolver = JwtSecurityContextResolver::new(
        &secret,
        config.spec.auth.issuer.as_deref(),
        repositories.memberships.clone(),
    )
    .context("Failed to initialize token verification")?;

    let list_endpoints = Arc::new(StandardListEndpointsUseCase::new(
        repositories.endpoints.clone(),
        repositories.groups.clone(),
        Arc::new(resolver),
    ));

    let router = app(
        list_endpoints,
        Duration::from_secs(config.spec.server.request_timeout_seconds),
    );

    let addr = format!("{}:{}", config.spec.server.host, config.spec.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Fleet console listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Fleet console shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
apiVersion: fleet-console/v1
kind: ConsoleConfig
metadata:
  name: console-test
spec:
  server:
    port: 9100
  auth:
    jwt_secret: test-secret
"#;

    #[test]
    fn test_cli_arguments_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.yaml");
        std::fs::write(&path, CONFIG).unwrap();

        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(9200),
            seed: Some(PathBuf::from("fleet.yaml")),
        };
        let config = resolve_config(Some(path), &args).unwrap();

        assert_eq!(config.spec.server.host, "0.0.0.0");
        assert_eq!(config.spec.server.port, 9200);
        assert_eq!(config.spec.storage.seed_file, Some(PathBuf::from("fleet.yaml")));
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.yaml");
        std::fs::write(&path, CONFIG.replace("jwt_secret: test-secret", "jwt_secret: \"\"")).unwrap();

        assert!(resolve_config(Some(path), &ServeArgs::default()).is_err());
    }
}
