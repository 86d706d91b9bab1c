// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Access Policies
//!
//! Users and teams are granted access to endpoints by being listed in the
//! access policy maps carried by an [`crate::domain::endpoint_group::EndpointGroup`]
//! or an individual [`crate::domain::endpoint::Endpoint`]. Presence of a key is
//! what grants access; the policy value is reserved for finer-grained roles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamMembershipId(pub u32);

/// Access granted to a single user or team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<u32>,
}

/// User and team access policies attached to a group or an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicies {
    #[serde(default)]
    pub users: BTreeMap<UserId, AccessPolicy>,
    #[serde(default)]
    pub teams: BTreeMap<TeamId, AccessPolicy>,
}

impl AccessPolicies {
    pub fn grant_user(mut self, user_id: UserId) -> Self {
        self.users.insert(user_id, AccessPolicy::default());
        self
    }

    pub fn grant_team(mut self, team_id: TeamId) -> Self {
        self.teams.insert(team_id, AccessPolicy::default());
        self
    }

    /// True when the user is listed directly, or any of the given teams is.
    pub fn authorizes(&self, user_id: UserId, team_ids: &[TeamId]) -> bool {
        self.users.contains_key(&user_id)
            || team_ids.iter().any(|team| self.teams.contains_key(team))
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.teams.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    Leader,
    Member,
}

/// Links a user to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub id: TeamMembershipId,
    pub user_id: UserId,
    pub team_id: TeamId,
    pub role: MembershipRole,
}
