// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Endpoint Aggregate
//!
//! An [`Endpoint`] is a managed remote target (Docker host, agent, Azure
//! subscription, edge device) that the console monitors. Endpoints belong to
//! exactly one [`EndpointGroup`](crate::domain::endpoint_group::EndpointGroup)
//! through `group_id`.
//!
//! Some attributes are connection secrets and must never leave the process:
//! see [`Endpoint::redact`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::access::AccessPolicies;
use crate::domain::endpoint_group::EndpointGroupId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointId(pub u32);

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    Docker,
    AgentOnDocker,
    Azure,
    EdgeAgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    Up,
    Down,
}

impl EndpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointStatus::Up => "up",
            EndpointStatus::Down => "down",
        }
    }
}

/// TLS settings used to reach the endpoint. File paths point at material
/// stored on the console host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfiguration {
    #[serde(default)]
    pub tls: bool,
    #[serde(default)]
    pub tls_skip_verify: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_cert_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_key_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureCredentials {
    pub application_id: String,
    pub tenant_id: String,
    pub authentication_key: String,
}

/// Point-in-time summary of the remote engine. `raw` holds the unfiltered
/// engine payload (containers, volumes, info) and is internal only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub docker_version: String,
    #[serde(default)]
    pub running_container_count: u32,
    #[serde(default)]
    pub stopped_container_count: u32,
    #[serde(default)]
    pub image_count: u32,
    #[serde(default)]
    pub volume_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: EndpointId,
    pub name: String,
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    pub url: String,
    #[serde(default)]
    pub public_url: String,
    pub group_id: EndpointGroupId,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: EndpointStatus,
    #[serde(default)]
    pub tls_config: TlsConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_credentials: Option<AzureCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_key: Option<String>,
    #[serde(default)]
    pub access_policies: AccessPolicies,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl Endpoint {
    pub fn new(
        id: EndpointId,
        name: impl Into<String>,
        url: impl Into<String>,
        group_id: EndpointGroupId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            endpoint_type: EndpointType::Docker,
            url: url.into(),
            public_url: String::new(),
            group_id,
            tags: Vec::new(),
            status: EndpointStatus::Up,
            tls_config: TlsConfiguration::default(),
            azure_credentials: None,
            edge_key: None,
            access_policies: AccessPolicies::default(),
            snapshots: Vec::new(),
        }
    }

    /// Whether the endpoint's own attributes match a lower-cased search
    /// term: name, URL or a tag containing it, or the literal status word.
    pub fn matches_search(&self, filter: &str) -> bool {
        if self.name.to_lowercase().contains(filter) || self.url.to_lowercase().contains(filter) {
            return true;
        }

        if filter == self.status.as_str() {
            return true;
        }

        self.tags.iter().any(|tag| tag.to_lowercase().contains(filter))
    }

    /// Strip connection secrets and internal payloads in place.
    ///
    /// Idempotent. Identity, naming, URLs, group reference, tags, status and
    /// snapshot summaries are left untouched.
    pub fn redact(&mut self) {
        self.azure_credentials = None;
        self.edge_key = None;
        self.tls_config.tls_ca_cert_path = None;
        self.tls_config.tls_cert_path = None;
        self.tls_config.tls_key_path = None;
        for snapshot in &mut self.snapshots {
            snapshot.raw = None;
        }
    }

    /// True when no sensitive attribute is present.
    pub fn is_redacted(&self) -> bool {
        self.azure_credentials.is_none()
            && self.edge_key.is_none()
            && self.tls_config.tls_ca_cert_path.is_none()
            && self.tls_config.tls_cert_path.is_none()
            && self.tls_config.tls_key_path.is_none()
            && self.snapshots.iter().all(|s| s.raw.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sensitive_endpoint() -> Endpoint {
        let mut endpoint = Endpoint::new(EndpointId(1), "prod-swarm", "tcp://10.0.0.4:2376", EndpointGroupId(2));
        endpoint.tags = vec!["Linux".to_string(), "east".to_string()];
        endpoint.tls_config = TlsConfiguration {
            tls: true,
            tls_skip_verify: false,
            tls_ca_cert_path: Some("/data/tls/1/ca.pem".to_string()),
            tls_cert_path: Some("/data/tls/1/cert.pem".to_string()),
            tls_key_path: Some("/data/tls/1/key.pem".to_string()),
        };
        endpoint.azure_credentials = Some(AzureCredentials {
            application_id: "app".to_string(),
            tenant_id: "tenant".to_string(),
            authentication_key: "secret".to_string(),
        });
        endpoint.edge_key = Some("edge-key".to_string());
        endpoint.snapshots = vec![Snapshot {
            time: Utc::now(),
            docker_version: "24.0.7".to_string(),
            running_container_count: 5,
            stopped_container_count: 1,
            image_count: 12,
            volume_count: 3,
            raw: Some(json!({"Containers": []})),
        }];
        endpoint
    }

    #[test]
    fn test_matches_search_on_name_url_and_tags() {
        let endpoint = sensitive_endpoint();
        assert!(endpoint.matches_search("prod"));
        assert!(endpoint.matches_search("10.0.0"));
        assert!(endpoint.matches_search("linux"));
        assert!(!endpoint.matches_search("staging"));
    }

    #[test]
    fn test_matches_search_on_status_word() {
        let mut endpoint = sensitive_endpoint();
        assert!(endpoint.matches_search("up"));
        assert!(!endpoint.matches_search("down"));

        endpoint.status = EndpointStatus::Down;
        assert!(endpoint.matches_search("down"));
    }

    #[test]
    fn test_redact_strips_secrets_and_keeps_public_fields() {
        let mut endpoint = sensitive_endpoint();
        endpoint.redact();

        assert!(endpoint.is_redacted());
        assert_eq!(endpoint.name, "prod-swarm");
        assert_eq!(endpoint.url, "tcp://10.0.0.4:2376");
        assert_eq!(endpoint.group_id, EndpointGroupId(2));
        assert_eq!(endpoint.status, EndpointStatus::Up);
        assert!(endpoint.tls_config.tls);
        assert_eq!(endpoint.snapshots[0].running_container_count, 5);
    }

    #[test]
    fn test_redact_is_idempotent() {
        let mut once = sensitive_endpoint();
        once.redact();
        let mut twice = once.clone();
        twice.redact();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_redacted_endpoint_serializes_without_secret_keys() {
        let mut endpoint = sensitive_endpoint();
        endpoint.redact();
        let value = serde_json::to_value(&endpoint).unwrap();

        assert!(value.get("azure_credentials").is_none());
        assert!(value.get("edge_key").is_none());
        assert!(value["tls_config"].get("tls_key_path").is_none());
        assert!(value["snapshots"][0].get("raw").is_none());
        assert_eq!(value["type"], "docker");
    }
}
