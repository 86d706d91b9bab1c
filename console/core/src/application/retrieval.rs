// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Retrieval Strategy
//!
//! Two mutually exclusive ways of fetching a page of endpoints, fixed once
//! per request by [`RetrievalStrategy::select`]:
//!
//! - **Filtered**: the store returns every endpoint matching the search term
//!   or belonging to a matching group; pagination happens here, and the total
//!   is the size of the full match set.
//! - **Paginated**: the store returns one page, and a second query returns
//!   the total endpoint count. The two reads are not transactional, so a
//!   concurrent write can make them disagree briefly.

use serde::Deserialize;
use tracing::debug;

use crate::application::group_filter::filter_groups;
use crate::application::list_endpoints::{ListEndpointsError, StoreOperation};
use crate::domain::endpoint::Endpoint;
use crate::domain::endpoint_group::EndpointGroup;
use crate::domain::repository::{in_page, EndpointRepository};

/// Raw query string of a listing request. Every field is kept as text so
/// that malformed numbers never reject the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEndpointsParams {
    pub start: Option<String>,
    pub limit: Option<String>,
    pub filter: Option<String>,
}

/// Listing parameters for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointQuery {
    /// 1-based position of the first endpoint; 0 behaves like 1
    pub start: usize,
    /// Page size; 0 means unlimited
    pub limit: usize,
    pub filter: String,
}

impl EndpointQuery {
    pub fn new(start: usize, limit: usize, filter: impl Into<String>) -> Self {
        Self {
            start,
            limit,
            filter: filter.into(),
        }
    }

    /// Absent, unparsable and negative numbers degrade to 0.
    pub fn from_params(params: &ListEndpointsParams) -> Self {
        Self {
            start: parse_or_zero(params.start.as_deref()),
            limit: parse_or_zero(params.limit.as_deref()),
            filter: params.filter.clone().unwrap_or_default(),
        }
    }

    /// Zero-based offset: any nonzero start is decremented once.
    pub fn offset(&self) -> usize {
        if self.start != 0 {
            self.start - 1
        } else {
            0
        }
    }
}

fn parse_or_zero(value: Option<&str>) -> usize {
    value.and_then(|v| v.parse::<usize>().ok()).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalStrategy {
    /// Holds the lower-cased search term
    Filtered { filter: String },
    Paginated,
}

impl RetrievalStrategy {
    pub fn select(query: &EndpointQuery) -> Self {
        if query.filter.is_empty() {
            RetrievalStrategy::Paginated
        } else {
            RetrievalStrategy::Filtered {
                filter: query.filter.to_lowercase(),
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RetrievalStrategy::Filtered { .. } => "filtered",
            RetrievalStrategy::Paginated => "paginated",
        }
    }

    /// Fetch one page and the total count for this strategy.
    pub async fn retrieve(
        &self,
        repository: &dyn EndpointRepository,
        groups: &[EndpointGroup],
        offset: usize,
        limit: usize,
    ) -> Result<RetrievedEndpoints, ListEndpointsError> {
        match self {
            RetrievalStrategy::Filtered { filter } => {
                let matching_groups = filter_groups(groups, filter);
                debug!(
                    filter = %filter,
                    matching_groups = matching_groups.len(),
                    "Resolved groups for endpoint filter"
                );

                let matched = repository
                    .endpoints_filtered(filter, &matching_groups)
                    .await
                    .map_err(|source| ListEndpointsError::store(StoreOperation::Endpoints, source))?;

                Ok(paginate(matched, offset, limit))
            }
            RetrievalStrategy::Paginated => {
                let endpoints = repository
                    .endpoints_paginated(offset, limit)
                    .await
                    .map_err(|source| ListEndpointsError::store(StoreOperation::Endpoints, source))?;

                let total_count = repository
                    .endpoint_count()
                    .await
                    .map_err(|source| ListEndpointsError::store(StoreOperation::EndpointCount, source))?;

                Ok(RetrievedEndpoints {
                    endpoints,
                    total_count,
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedEndpoints {
    pub endpoints: Vec<Endpoint>,
    /// Size of the unpaginated result set
    pub total_count: usize,
}

/// In-memory pagination of a full match set.
pub fn paginate(matched: Vec<Endpoint>, offset: usize, limit: usize) -> RetrievedEndpoints {
    let total_count = matched.len();
    let endpoints = matched
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| in_page(*idx, offset, limit))
        .map(|(_, endpoint)| endpoint)
        .collect();

    RetrievedEndpoints {
        endpoints,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::endpoint::EndpointId;
    use crate::domain::endpoint_group::EndpointGroupId;

    fn endpoints(n: u32) -> Vec<Endpoint> {
        (1..=n)
            .map(|i| Endpoint::new(EndpointId(i), format!("node-{i}"), format!("tcp://10.0.0.{i}:2375"), EndpointGroupId(1)))
            .collect()
    }

    fn params(start: Option<&str>, limit: Option<&str>, filter: Option<&str>) -> ListEndpointsParams {
        ListEndpointsParams {
            start: start.map(str::to_string),
            limit: limit.map(str::to_string),
            filter: filter.map(str::to_string),
        }
    }

    #[test]
    fn test_offset_decrements_nonzero_start_only() {
        assert_eq!(EndpointQuery::new(0, 10, "").offset(), 0);
        assert_eq!(EndpointQuery::new(1, 10, "").offset(), 0);
        assert_eq!(EndpointQuery::new(11, 10, "").offset(), 10);
    }

    #[test]
    fn test_malformed_params_degrade_to_zero() {
        let query = EndpointQuery::from_params(&params(Some("abc"), Some("-4"), None));
        assert_eq!(query, EndpointQuery::new(0, 0, ""));

        let query = EndpointQuery::from_params(&params(Some("3"), Some("+5"), Some("Prod")));
        assert_eq!(query, EndpointQuery::new(3, 5, "Prod"));
    }

    #[test]
    fn test_strategy_selection_lowercases_filter() {
        assert_eq!(RetrievalStrategy::select(&EndpointQuery::new(0, 0, "")), RetrievalStrategy::Paginated);
        assert_eq!(
            RetrievalStrategy::select(&EndpointQuery::new(0, 0, "PrOd")),
            RetrievalStrategy::Filtered { filter: "prod".to_string() }
        );
        assert_eq!(RetrievalStrategy::Paginated.name(), "paginated");
    }

    #[test]
    fn test_paginate_unlimited_returns_everything() {
        let page = paginate(endpoints(7), 5, 0);
        assert_eq!(page.endpoints.len(), 7);
        assert_eq!(page.total_count, 7);
    }

    #[test]
    fn test_paginate_window_and_total() {
        let page = paginate(endpoints(25), 10, 10);
        let ids: Vec<u32> = page.endpoints.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn test_paginate_past_the_end() {
        let page = paginate(endpoints(5), 10, 10);
        assert!(page.endpoints.is_empty());
        assert_eq!(page.total_count, 5);
    }
}
