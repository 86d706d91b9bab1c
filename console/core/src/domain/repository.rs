// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts consumed by the listing pipeline, following the DDD
//! Repository pattern: interface defined in the domain layer, implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Entity | Implementations |
//! |-------|--------|----------------|
//! | `EndpointRepository` | `Endpoint` | `InMemoryEndpointRepository`, `PostgresEndpointRepository` |
//! | `EndpointGroupRepository` | `EndpointGroup` | `InMemoryEndpointGroupRepository`, `PostgresEndpointGroupRepository` |
//! | `TeamMembershipRepository` | `TeamMembership` | `InMemoryTeamMembershipRepository`, `PostgresTeamMembershipRepository` |
//!
//! All listing queries return entities in ascending id order so offsets are
//! stable between requests.

use async_trait::async_trait;

use crate::domain::access::{TeamMembership, UserId};
use crate::domain::endpoint::{Endpoint, EndpointId};
use crate::domain::endpoint_group::{EndpointGroup, EndpointGroupId};

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

#[async_trait]
pub trait EndpointRepository: Send + Sync {
    /// Save endpoint (create or update)
    async fn save(&self, endpoint: &Endpoint) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: EndpointId) -> Result<Option<Endpoint>, RepositoryError>;

    /// Every endpoint whose own attributes match the lower-cased `filter`
    /// (see [`Endpoint::matches_search`]) or whose group is in `groups`.
    /// No pagination is applied.
    async fn endpoints_filtered(
        &self,
        filter: &str,
        groups: &[EndpointGroup],
    ) -> Result<Vec<Endpoint>, RepositoryError>;

    /// One page of endpoints starting at zero-based `offset`. A `limit` of 0
    /// returns every endpoint and ignores `offset`.
    async fn endpoints_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Endpoint>, RepositoryError>;

    /// Total number of stored endpoints.
    async fn endpoint_count(&self) -> Result<usize, RepositoryError>;
}

#[async_trait]
pub trait EndpointGroupRepository: Send + Sync {
    async fn save(&self, group: &EndpointGroup) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: EndpointGroupId) -> Result<Option<EndpointGroup>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<EndpointGroup>, RepositoryError>;
}

#[async_trait]
pub trait TeamMembershipRepository: Send + Sync {
    async fn save(&self, membership: &TeamMembership) -> Result<(), RepositoryError>;

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<TeamMembership>, RepositoryError>;
}

/// Shared pagination rule: keep index `idx` when `limit == 0` or
/// `start <= idx < start + limit`.
pub fn in_page(idx: usize, start: usize, limit: usize) -> bool {
    limit == 0 || (idx >= start && idx < start.saturating_add(limit))
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_page_unlimited_keeps_everything() {
        assert!((0..50).all(|idx| in_page(idx, 30, 0)));
    }

    #[test]
    fn test_in_page_window() {
        let kept: Vec<usize> = (0..10).filter(|idx| in_page(*idx, 3, 4)).collect();
        assert_eq!(kept, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_in_page_does_not_overflow() {
        assert!(in_page(usize::MAX - 1, usize::MAX - 2, usize::MAX));
    }
}
