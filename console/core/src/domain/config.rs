// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Console Configuration Types
//
// Defines the configuration schema for a fleet console node:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - HTTP server binding and request timeout
// - Storage backend selection (in-memory or PostgreSQL) and fixture seeding
// - Token verification settings
// - Logging and metrics settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::repository::{PostgresConfig, StorageBackend};

pub const API_VERSION: &str = "fleet-console/v1";
pub const KIND: &str = "ConsoleConfig";

/// Top-level Kubernetes-style console configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// API version (must be "fleet-console/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "ConsoleConfig")
    pub kind: String,

    pub metadata: ConfigMetadata,

    #[serde(default)]
    pub spec: ConsoleSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Human-readable console name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleSpec {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Requests still running after this many seconds are aborted
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackendKind {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,

    /// PostgreSQL connection string (supports "env:VAR_NAME")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// YAML fixture of groups, endpoints and team memberships loaded at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::InMemory,
            database_url: None,
            max_connections: default_max_connections(),
            seed_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to verify bearer tokens (supports "env:VAR_NAME")
    #[serde(default)]
    pub jwt_secret: String,

    /// Expected `iss` claim; unchecked when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Port for the Prometheus scrape listener; disabled when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics_port: None,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ConfigMetadata {
                name: "fleet-console".to_string(),
                version: None,
            },
            spec: ConsoleSpec::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. FLEET_CONSOLE_CONFIG_PATH environment variable
    /// 2. ./fleet-console.yaml (working directory)
    /// 3. ~/.fleet-console/config.yaml (user home)
    /// 4. /etc/fleet-console/config.yaml (system, Unix) or C:\ProgramData\FleetConsole\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("FLEET_CONSOLE_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./fleet-console.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".fleet-console").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/fleet-console/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\FleetConsole\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load from an explicit path, else discovery, else defaults. Environment
    /// overrides are applied in every case.
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FLEET_CONSOLE_DATABASE_URL") {
            self.spec.storage.database_url = Some(url);
            self.spec.storage.backend = StorageBackendKind::Postgres;
        }

        if let Ok(secret) = std::env::var("FLEET_CONSOLE_JWT_SECRET") {
            self.spec.auth.jwt_secret = secret;
        }

        if let Ok(port) = std::env::var("FLEET_CONSOLE_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.spec.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid FLEET_CONSOLE_PORT value: {}", port),
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        if self.resolved_jwt_secret()?.is_empty() {
            anyhow::bail!("spec.auth.jwt_secret cannot be empty");
        }

        if self.spec.storage.backend == StorageBackendKind::Postgres
            && self.spec.storage.database_url.as_deref().map_or(true, str::is_empty)
        {
            anyhow::bail!("spec.storage.database_url is required for the postgres backend");
        }

        if self.spec.server.request_timeout_seconds == 0 {
            anyhow::bail!("spec.server.request_timeout_seconds must be greater than zero");
        }

        Ok(())
    }

    pub fn resolved_jwt_secret(&self) -> anyhow::Result<String> {
        resolve_env_value(&self.spec.auth.jwt_secret)
    }

    /// Storage backend selected by this configuration
    pub fn storage_backend(&self) -> anyhow::Result<StorageBackend> {
        match self.spec.storage.backend {
            StorageBackendKind::InMemory => Ok(StorageBackend::InMemory),
            StorageBackendKind::Postgres => {
                let url = self
                    .spec
                    .storage
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("spec.storage.database_url is not set"))?;
                Ok(StorageBackend::PostgreSQL(PostgresConfig {
                    connection_string: resolve_env_value(url)?,
                    max_connections: self.spec.storage.max_connections,
                }))
            }
        }
    }
}

/// Resolve "env:VAR_NAME" references; other values are returned unchanged.
pub fn resolve_env_value(value: &str) -> anyhow::Result<String> {
    match value.strip_prefix("env:") {
        Some(var) => std::env::var(var)
            .map_err(|_| anyhow::anyhow!("Environment variable {} is not set", var)),
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
apiVersion: fleet-console/v1
kind: ConsoleConfig
metadata:
  name: console-eu
spec:
  server:
    port: 9443
  storage:
    backend: postgres
    database_url: postgres://console@localhost/fleet
  auth:
    jwt_secret: s3cret
    issuer: fleet-console
  observability:
    metrics_port: 9100
"#;

    #[test]
    fn test_parse_sample_config() {
        let config = ConsoleConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.metadata.name, "console-eu");
        assert_eq!(config.spec.server.port, 9443);
        assert_eq!(config.spec.server.host, "127.0.0.1");
        assert_eq!(config.spec.server.request_timeout_seconds, 30);
        assert_eq!(config.spec.storage.backend, StorageBackendKind::Postgres);
        assert_eq!(config.spec.storage.max_connections, 5);
        assert_eq!(config.spec.observability.metrics_port, Some(9100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_backend_selection() {
        let config = ConsoleConfig::from_yaml_str(SAMPLE).unwrap();
        match config.storage_backend().unwrap() {
            StorageBackend::PostgreSQL(pg) => {
                assert_eq!(pg.connection_string, "postgres://console@localhost/fleet");
            }
            StorageBackend::InMemory => panic!("Expected postgres backend"),
        }

        let default = ConsoleConfig::default();
        assert!(matches!(default.storage_backend().unwrap(), StorageBackend::InMemory));
    }

    #[test]
    fn test_validate_rejects_wrong_kind() {
        let mut config = ConsoleConfig::from_yaml_str(SAMPLE).unwrap();
        config.kind = "NodeConfig".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_secret() {
        let config = ConsoleConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_database_url_for_postgres() {
        let mut config = ConsoleConfig::from_yaml_str(SAMPLE).unwrap();
        config.spec.storage.database_url = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_env_value() {
        std::env::set_var("FLEET_CONSOLE_TEST_SECRET_VALUE", "from-env");
        assert_eq!(resolve_env_value("env:FLEET_CONSOLE_TEST_SECRET_VALUE").unwrap(), "from-env");
        assert_eq!(resolve_env_value("literal").unwrap(), "literal");
        assert!(resolve_env_value("env:FLEET_CONSOLE_TEST_UNSET_VARIABLE").is_err());
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet-console.yaml");
        let config = ConsoleConfig::from_yaml_str(SAMPLE).unwrap();
        config.to_yaml_file(&path).unwrap();

        let loaded = ConsoleConfig::load_or_default(Some(path)).unwrap();
        assert_eq!(loaded.metadata.name, "console-eu");
        assert_eq!(loaded.spec.auth.issuer.as_deref(), Some("fleet-console"));
    }

    #[test]
    fn test_load_or_default_fails_on_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(ConsoleConfig::load_or_default(Some(missing)).is_err());
    }
}
