// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Endpoint Groups
//!
//! Named, tagged collections of endpoints. Groups carry the access policies
//! that scope which principals may see their members.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::access::AccessPolicies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointGroupId(pub u32);

impl fmt::Display for EndpointGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointGroup {
    pub id: EndpointGroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Stored as entered; compared case-insensitively when filtering.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub access_policies: AccessPolicies,
}

impl EndpointGroup {
    pub fn new(id: EndpointGroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            access_policies: AccessPolicies::default(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_access_policies(mut self, access_policies: AccessPolicies) -> Self {
        self.access_policies = access_policies;
        self
    }

    /// `filter` must already be lower-cased.
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(filter)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(filter))
    }
}
