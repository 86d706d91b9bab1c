// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;

use fleet_core::application::repository_factory::Repositories;
use fleet_core::application::security_context_resolver::{
    RequestCredentials, SecurityContextError, SecurityContextResolver,
};
use fleet_core::domain::access::{AccessPolicies, UserId};
use fleet_core::domain::endpoint::{AzureCredentials, Endpoint, EndpointId};
use fleet_core::domain::endpoint_group::{EndpointGroup, EndpointGroupId};
use fleet_core::domain::repository::{EndpointGroupRepository, EndpointRepository, RepositoryError};
use fleet_core::domain::security_context::SecurityContext;

pub const PRODUCTION: EndpointGroupId = EndpointGroupId(1);
pub const STAGING: EndpointGroupId = EndpointGroupId(2);
pub const STAGING_USER: UserId = UserId(42);

pub fn groups() -> Vec<EndpointGroup> {
    vec![
        EndpointGroup::new(PRODUCTION, "Production").with_tags(["prod", "east"]),
        EndpointGroup::new(STAGING, "Staging")
            .with_tags(["dev"])
            .with_access_policies(AccessPolicies::default().grant_user(STAGING_USER)),
    ]
}

/// `n` endpoints alternating Production (odd ids) and Staging (even ids),
/// each carrying Azure credentials so redaction is observable.
pub fn fleet(n: u32) -> Vec<Endpoint> {
    (1..=n)
        .map(|i| {
            let group = if i % 2 == 1 { PRODUCTION } else { STAGING };
            let mut endpoint = Endpoint::new(EndpointId(i), format!("node-{i:02}"), format!("tcp://10.0.0.{i}:2376"), group);
            endpoint.azure_credentials = Some(AzureCredentials {
                application_id: format!("app-{i}"),
                tenant_id: "tenant".to_string(),
                authentication_key: "hunter2".to_string(),
            });
            endpoint
        })
        .collect()
}

pub async fn seeded_repositories(groups: &[EndpointGroup], endpoints: &[Endpoint]) -> Repositories {
    let repos = Repositories::in_memory();
    for group in groups {
        repos.groups.save(group).await.unwrap();
    }
    for endpoint in endpoints {
        repos.endpoints.save(endpoint).await.unwrap();
    }
    repos
}

pub fn ids(endpoints: &[Endpoint]) -> Vec<u32> {
    endpoints.iter().map(|e| e.id.0).collect()
}

/// Resolver returning a fixed context regardless of credentials.
pub struct StaticResolver(pub SecurityContext);

#[async_trait]
impl SecurityContextResolver for StaticResolver {
    async fn resolve(&self, _credentials: &RequestCredentials) -> Result<SecurityContext, SecurityContextError> {
        Ok(self.0.clone())
    }
}

pub struct RejectingResolver;

#[async_trait]
impl SecurityContextResolver for RejectingResolver {
    async fn resolve(&self, _credentials: &RequestCredentials) -> Result<SecurityContext, SecurityContextError> {
        Err(SecurityContextError::MissingCredentials)
    }
}

pub fn static_resolver(context: SecurityContext) -> Arc<dyn SecurityContextResolver> {
    Arc::new(StaticResolver(context))
}

/// Group store whose every read fails.
pub struct UnavailableGroupRepository;

#[async_trait]
impl EndpointGroupRepository for UnavailableGroupRepository {
    async fn save(&self, _group: &EndpointGroup) -> Result<(), RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: EndpointGroupId) -> Result<Option<EndpointGroup>, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<EndpointGroup>, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }
}

/// Endpoint store that serves pages but cannot count.
pub struct CountlessEndpointRepository {
    pub inner: Arc<dyn EndpointRepository>,
}

#[async_trait]
impl EndpointRepository for CountlessEndpointRepository {
    async fn save(&self, endpoint: &Endpoint) -> Result<(), RepositoryError> {
        self.inner.save(endpoint).await
    }

    async fn find_by_id(&self, id: EndpointId) -> Result<Option<Endpoint>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn endpoints_filtered(&self, filter: &str, groups: &[EndpointGroup]) -> Result<Vec<Endpoint>, RepositoryError> {
        self.inner.endpoints_filtered(filter, groups).await
    }

    async fn endpoints_paginated(&self, offset: usize, limit: usize) -> Result<Vec<Endpoint>, RepositoryError> {
        self.inner.endpoints_paginated(offset, limit).await
    }

    async fn endpoint_count(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Database("statement timeout".to_string()))
    }
}
