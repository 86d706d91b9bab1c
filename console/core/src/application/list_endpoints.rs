// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! List Endpoints Use Case
//!
//! Application service answering "which endpoints can this principal see?".
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Run the listing pipeline for one request
//! - **Collaborators:**
//!   - Domain: Endpoint, EndpointGroup, SecurityContext
//!   - Infrastructure: EndpointRepository, EndpointGroupRepository, SecurityContextResolver
//!
//! Stages run sequentially: group catalog -> retrieval (filtered or
//! paginated) -> security context -> visibility -> redaction. Any store or
//! context failure ends the request; nothing is retried here.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::redaction::redact_endpoints;
use crate::application::retrieval::{EndpointQuery, RetrievalStrategy};
use crate::application::security_context_resolver::{
    RequestCredentials, SecurityContextError, SecurityContextResolver,
};
use crate::application::visibility::filter_visible_endpoints;
use crate::domain::endpoint::Endpoint;
use crate::domain::repository::{EndpointGroupRepository, EndpointRepository, RepositoryError};

/// Result of a listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointPage {
    /// Visible, redacted endpoints of the requested page
    pub endpoints: Vec<Endpoint>,
    /// Count computed by the retrieval strategy, before visibility filtering
    pub total_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    EndpointGroups,
    Endpoints,
    EndpointCount,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StoreOperation::EndpointGroups => "endpoint groups",
            StoreOperation::Endpoints => "endpoints",
            StoreOperation::EndpointCount => "endpoint count",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListEndpointsError {
    #[error("Unable to retrieve {operation} from the store")]
    StoreUnavailable {
        operation: StoreOperation,
        #[source]
        source: RepositoryError,
    },

    #[error("Unable to retrieve info from request context")]
    SecurityContextUnavailable(#[from] SecurityContextError),
}

impl ListEndpointsError {
    pub fn store(operation: StoreOperation, source: RepositoryError) -> Self {
        ListEndpointsError::StoreUnavailable { operation, source }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ListEndpointsError::StoreUnavailable { .. } => "store_unavailable",
            ListEndpointsError::SecurityContextUnavailable(_) => "security_context_unavailable",
        }
    }

    /// Underlying cause, for logs and error details
    pub fn cause(&self) -> String {
        match self {
            ListEndpointsError::StoreUnavailable { source, .. } => source.to_string(),
            ListEndpointsError::SecurityContextUnavailable(source) => source.to_string(),
        }
    }
}

/// List Endpoints Use Case
#[async_trait]
pub trait ListEndpointsUseCase: Send + Sync {
    /// List the endpoints visible to the principal behind `credentials`.
    ///
    /// # Errors
    ///
    /// - StoreUnavailable: groups, endpoints or count could not be read
    /// - SecurityContextUnavailable: the principal could not be resolved
    async fn list_endpoints(
        &self,
        query: EndpointQuery,
        credentials: &RequestCredentials,
    ) -> Result<EndpointPage, ListEndpointsError>;
}

/// Standard implementation of ListEndpointsUseCase
pub struct StandardListEndpointsUseCase {
    endpoint_repository: Arc<dyn EndpointRepository>,
    group_repository: Arc<dyn EndpointGroupRepository>,
    context_resolver: Arc<dyn SecurityContextResolver>,
}

impl StandardListEndpointsUseCase {
    pub fn new(
        endpoint_repository: Arc<dyn EndpointRepository>,
        group_repository: Arc<dyn EndpointGroupRepository>,
        context_resolver: Arc<dyn SecurityContextResolver>,
    ) -> Self {
        Self {
            endpoint_repository,
            group_repository,
            context_resolver,
        }
    }
}

#[async_trait]
impl ListEndpointsUseCase for StandardListEndpointsUseCase {
    async fn list_endpoints(
        &self,
        query: EndpointQuery,
        credentials: &RequestCredentials,
    ) -> Result<EndpointPage, ListEndpointsError> {
        let strategy = RetrievalStrategy::select(&query);
        metrics::counter!("fleet_console_endpoint_list_requests_total", "strategy" => strategy.name())
            .increment(1);

        let result = self.run(&strategy, &query, credentials).await;
        if let Err(ref e) = result {
            metrics::counter!("fleet_console_endpoint_list_errors_total", "kind" => e.kind()).increment(1);
        }
        result
    }
}

impl StandardListEndpointsUseCase {
    async fn run(
        &self,
        strategy: &RetrievalStrategy,
        query: &EndpointQuery,
        credentials: &RequestCredentials,
    ) -> Result<EndpointPage, ListEndpointsError> {
        let groups = self
            .group_repository
            .list_all()
            .await
            .map_err(|source| ListEndpointsError::store(StoreOperation::EndpointGroups, source))?;

        let offset = query.offset();
        debug!(
            strategy = strategy.name(),
            offset,
            limit = query.limit,
            "Retrieving endpoints"
        );

        let retrieved = strategy
            .retrieve(self.endpoint_repository.as_ref(), &groups, offset, query.limit)
            .await?;

        let context = self.context_resolver.resolve(credentials).await?;

        let retrieved_count = retrieved.endpoints.len();
        let mut endpoints = filter_visible_endpoints(retrieved.endpoints, &groups, &context);
        redact_endpoints(&mut endpoints);

        metrics::histogram!("fleet_console_endpoint_list_returned").record(endpoints.len() as f64);
        info!(
            user_id = %context.user_id(),
            administrator = context.is_administrator(),
            strategy = strategy.name(),
            retrieved = retrieved_count,
            visible = endpoints.len(),
            total_count = retrieved.total_count,
            "Listed endpoints"
        );

        Ok(EndpointPage {
            endpoints,
            total_count: retrieved.total_count,
        })
    }
}
