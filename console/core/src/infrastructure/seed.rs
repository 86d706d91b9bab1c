// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Fixture Seeding
//!
//! Loads a YAML fixture of groups, endpoints and team memberships into the
//! configured repositories. Used for development consoles running on the
//! in-memory backend, where nothing survives a restart.
//!
//! ```yaml
//! groups:
//!   - id: 1
//!     name: Production
//!     tags: [prod, east]
//! endpoints:
//!   - id: 1
//!     name: prod-swarm-01
//!     type: docker
//!     url: tcp://10.0.0.4:2376
//!     group_id: 1
//!     status: up
//! team_memberships: []
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::application::repository_factory::Repositories;
use crate::domain::access::TeamMembership;
use crate::domain::endpoint::Endpoint;
use crate::domain::endpoint_group::EndpointGroup;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSeed {
    #[serde(default)]
    pub groups: Vec<EndpointGroup>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub team_memberships: Vec<TeamMembership>,
}

impl FleetSeed {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {:?}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Failed to parse seed file {:?}", path))
    }

    /// Save every entity, groups first.
    pub async fn apply(&self, repositories: &Repositories) -> Result<()> {
        let group_ids: HashSet<_> = self.groups.iter().map(|g| g.id).collect();

        for group in &self.groups {
            repositories
                .groups
                .save(group)
                .await
                .with_context(|| format!("Failed to seed endpoint group {}", group.id))?;
        }

        for endpoint in &self.endpoints {
            if !group_ids.contains(&endpoint.group_id) {
                warn!(
                    endpoint_id = %endpoint.id,
                    group_id = %endpoint.group_id,
                    "Seeded endpoint references a group missing from the fixture"
                );
            }
            repositories
                .endpoints
                .save(endpoint)
                .await
                .with_context(|| format!("Failed to seed endpoint {}", endpoint.id))?;
        }

        for membership in &self.team_memberships {
            repositories
                .memberships
                .save(membership)
                .await
                .context("Failed to seed team membership")?;
        }

        info!(
            groups = self.groups.len(),
            endpoints = self.endpoints.len(),
            team_memberships = self.team_memberships.len(),
            "Seeded fleet fixture"
        );
        Ok(())
    }
}
