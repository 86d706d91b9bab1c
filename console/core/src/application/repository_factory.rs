// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates concrete repository implementations based on storage backend
//! configuration, keeping the domain layer free of infrastructure types.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Backend selection for the listing pipeline's store

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::repository::{
    EndpointGroupRepository, EndpointRepository, StorageBackend, TeamMembershipRepository,
};
use crate::infrastructure::db::Database;
use crate::infrastructure::repositories::postgres_endpoint::PostgresEndpointRepository;
use crate::infrastructure::repositories::postgres_endpoint_group::PostgresEndpointGroupRepository;
use crate::infrastructure::repositories::postgres_team_membership::PostgresTeamMembershipRepository;
use crate::infrastructure::repositories::{
    InMemoryEndpointGroupRepository, InMemoryEndpointRepository, InMemoryTeamMembershipRepository,
};

/// The three stores the console reads from.
#[derive(Clone)]
pub struct Repositories {
    pub endpoints: Arc<dyn EndpointRepository>,
    pub groups: Arc<dyn EndpointGroupRepository>,
    pub memberships: Arc<dyn TeamMembershipRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            endpoints: Arc::new(InMemoryEndpointRepository::new()),
            groups: Arc::new(InMemoryEndpointGroupRepository::new()),
            memberships: Arc::new(InMemoryTeamMembershipRepository::new()),
        }
    }

    pub fn postgres(database: &Database) -> Self {
        let pool = database.get_pool().clone();
        Self {
            endpoints: Arc::new(PostgresEndpointRepository::new(pool.clone())),
            groups: Arc::new(PostgresEndpointGroupRepository::new(pool.clone())),
            memberships: Arc::new(PostgresTeamMembershipRepository::new(pool)),
        }
    }
}

/// Creates the repositories for the configured backend, connecting to
/// PostgreSQL when required.
pub async fn create_repositories(backend: &StorageBackend) -> Result<Repositories> {
    match backend {
        StorageBackend::InMemory => Ok(Repositories::in_memory()),
        StorageBackend::PostgreSQL(config) => {
            let database = Database::new(&config.connection_string, config.max_connections)
                .await
                .context("Failed to connect to PostgreSQL")?;
            Ok(Repositories::postgres(&database))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_backend_starts_empty() {
        let repos = create_repositories(&StorageBackend::InMemory).await.unwrap();
        assert_eq!(repos.endpoints.endpoint_count().await.unwrap(), 0);
        assert!(repos.groups.list_all().await.unwrap().is_empty());
    }
}
