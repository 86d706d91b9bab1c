// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the repository abstractions defined in
//! `crate::domain::repository`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve endpoints, groups and memberships
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! ## PostgreSQL Repositories
//!
//! - **PostgresEndpointRepository** - Endpoints as JSONB documents
//! - **PostgresEndpointGroupRepository** - Endpoint group catalog
//! - **PostgresTeamMembershipRepository** - User to team links
//!
//! ## In-Memory Repositories
//!
//! Lightweight implementations for development and tests. Entities are kept
//! in `BTreeMap`s keyed by id, so iteration order matches the PostgreSQL
//! `ORDER BY id` queries.

pub mod postgres_endpoint;
pub mod postgres_endpoint_group;
pub mod postgres_team_membership;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::domain::access::{TeamMembership, TeamMembershipId, UserId};
use crate::domain::endpoint::{Endpoint, EndpointId};
use crate::domain::endpoint_group::{EndpointGroup, EndpointGroupId};
use crate::domain::repository::{
    in_page, EndpointGroupRepository, EndpointRepository, RepositoryError, TeamMembershipRepository,
};

#[derive(Clone, Default)]
pub struct InMemoryEndpointRepository {
    endpoints: Arc<RwLock<BTreeMap<EndpointId, Endpoint>>>,
}

impl InMemoryEndpointRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EndpointRepository for InMemoryEndpointRepository {
    async fn save(&self, endpoint: &Endpoint) -> Result<(), RepositoryError> {
        self.endpoints.write().insert(endpoint.id, endpoint.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EndpointId) -> Result<Option<Endpoint>, RepositoryError> {
        Ok(self.endpoints.read().get(&id).cloned())
    }

    async fn endpoints_filtered(
        &self,
        filter: &str,
        groups: &[EndpointGroup],
    ) -> Result<Vec<Endpoint>, RepositoryError> {
        let group_ids: HashSet<EndpointGroupId> = groups.iter().map(|g| g.id).collect();
        let endpoints = self.endpoints.read();
        Ok(endpoints
            .values()
            .filter(|e| e.matches_search(filter) || group_ids.contains(&e.group_id))
            .cloned()
            .collect())
    }

    async fn endpoints_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Endpoint>, RepositoryError> {
        let endpoints = self.endpoints.read();
        Ok(endpoints
            .values()
            .enumerate()
            .filter(|(idx, _)| in_page(*idx, offset, limit))
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn endpoint_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.endpoints.read().len())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryEndpointGroupRepository {
    groups: Arc<RwLock<BTreeMap<EndpointGroupId, EndpointGroup>>>,
}

impl InMemoryEndpointGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EndpointGroupRepository for InMemoryEndpointGroupRepository {
    async fn save(&self, group: &EndpointGroup) -> Result<(), RepositoryError> {
        self.groups.write().insert(group.id, group.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EndpointGroupId) -> Result<Option<EndpointGroup>, RepositoryError> {
        Ok(self.groups.read().get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<EndpointGroup>, RepositoryError> {
        Ok(self.groups.read().values().cloned().collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTeamMembershipRepository {
    memberships: Arc<RwLock<BTreeMap<TeamMembershipId, TeamMembership>>>,
}

impl InMemoryTeamMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamMembershipRepository for InMemoryTeamMembershipRepository {
    async fn save(&self, membership: &TeamMembership) -> Result<(), RepositoryError> {
        self.memberships.write().insert(membership.id, membership.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<TeamMembership>, RepositoryError> {
        Ok(self
            .memberships
            .read()
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::{MembershipRole, TeamId};

    async fn seeded(n: u32) -> InMemoryEndpointRepository {
        let repo = InMemoryEndpointRepository::new();
        // insert out of order to check id ordering
        for i in (1..=n).rev() {
            let group = if i <= 3 { EndpointGroupId(1) } else { EndpointGroupId(2) };
            let endpoint = Endpoint::new(EndpointId(i), format!("node-{i}"), format!("tcp://10.1.0.{i}:2375"), group);
            repo.save(&endpoint).await.unwrap();
        }
        repo
    }

    fn ids(endpoints: &[Endpoint]) -> Vec<u32> {
        endpoints.iter().map(|e| e.id.0).collect()
    }

    #[tokio::test]
    async fn test_paginated_is_ordered_by_id() {
        let repo = seeded(8).await;
        let page = repo.endpoints_paginated(2, 3).await.unwrap();
        assert_eq!(ids(&page), vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn test_paginated_zero_limit_ignores_offset() {
        let repo = seeded(8).await;
        let page = repo.endpoints_paginated(5, 0).await.unwrap();
        assert_eq!(page.len(), 8);
        assert_eq!(repo.endpoint_count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_filtered_matches_text_or_group() {
        let repo = seeded(8).await;
        let group = EndpointGroup::new(EndpointGroupId(1), "Production");

        let matched = repo.endpoints_filtered("node-7", &[group.clone()]).await.unwrap();
        assert_eq!(ids(&matched), vec![1, 2, 3, 7]);

        let matched = repo.endpoints_filtered("zzz", &[]).await.unwrap();
        assert!(matched.is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_and_find_by_id() {
        let repo = seeded(2).await;
        let mut endpoint = repo.find_by_id(EndpointId(2)).await.unwrap().unwrap();
        endpoint.name = "renamed".to_string();
        repo.save(&endpoint).await.unwrap();

        assert_eq!(repo.endpoint_count().await.unwrap(), 2);
        assert_eq!(repo.find_by_id(EndpointId(2)).await.unwrap().unwrap().name, "renamed");
        assert!(repo.find_by_id(EndpointId(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_groups_listed_in_id_order() {
        let repo = InMemoryEndpointGroupRepository::new();
        repo.save(&EndpointGroup::new(EndpointGroupId(3), "c")).await.unwrap();
        repo.save(&EndpointGroup::new(EndpointGroupId(1), "a")).await.unwrap();

        let names: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(repo.find_by_id(EndpointGroupId(1)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_memberships_by_user() {
        let repo = InMemoryTeamMembershipRepository::new();
        for (id, user, team) in [(1, 10, 1), (2, 10, 2), (3, 11, 1)] {
            repo.save(&TeamMembership {
                id: TeamMembershipId(id),
                user_id: UserId(user),
                team_id: TeamId(team),
                role: MembershipRole::Member,
            })
            .await
            .unwrap();
        }

        let teams: Vec<TeamId> = repo
            .find_by_user(UserId(10))
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.team_id)
            .collect();
        assert_eq!(teams, vec![TeamId(1), TeamId(2)]);
    }
}
