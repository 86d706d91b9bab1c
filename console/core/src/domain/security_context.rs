// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Security Context
//!
//! Request-scoped authorization data for the principal behind a request.
//! Administrators see every endpoint; everyone else is restricted to
//! endpoints whose group, or whose own access policies, name the user or one
//! of the user's teams.

use serde::{Deserialize, Serialize};

use crate::domain::access::{TeamId, UserId};
use crate::domain::endpoint::Endpoint;
use crate::domain::endpoint_group::EndpointGroup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictedContext {
    pub user_id: UserId,
    pub team_ids: Vec<TeamId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SecurityContext {
    Administrator { user_id: UserId },
    Restricted(RestrictedContext),
}

impl SecurityContext {
    pub fn administrator(user_id: UserId) -> Self {
        SecurityContext::Administrator { user_id }
    }

    pub fn restricted(user_id: UserId, team_ids: Vec<TeamId>) -> Self {
        SecurityContext::Restricted(RestrictedContext { user_id, team_ids })
    }

    pub fn user_id(&self) -> UserId {
        match self {
            SecurityContext::Administrator { user_id } => *user_id,
            SecurityContext::Restricted(ctx) => ctx.user_id,
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, SecurityContext::Administrator { .. })
    }

    /// Decide whether `endpoint` is visible. `group` is the endpoint's group
    /// when it exists in the catalog; an orphaned endpoint is judged on its
    /// own policies only.
    pub fn can_see(&self, endpoint: &Endpoint, group: Option<&EndpointGroup>) -> bool {
        match self {
            SecurityContext::Administrator { .. } => true,
            SecurityContext::Restricted(ctx) => {
                let group_access = group
                    .map(|g| g.access_policies.authorizes(ctx.user_id, &ctx.team_ids))
                    .unwrap_or(false);

                group_access || endpoint.access_policies.authorizes(ctx.user_id, &ctx.team_ids)
            }
        }
    }
}
