// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Wire types for the console API.

use serde::{Deserialize, Serialize};

pub use fleet_core::domain::endpoint::Endpoint;

/// Query for `GET /api/endpoints`. Unset fields are left off the query
/// string and take the server defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl EndpointListRequest {
    pub fn page(start: usize, limit: usize) -> Self {
        Self {
            start: Some(start),
            limit: Some(limit),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointListResponse {
    pub endpoints: Vec<Endpoint>,
    /// Value of the `X-Total-Count` header
    pub total_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
