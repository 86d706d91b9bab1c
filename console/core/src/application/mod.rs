// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Application Layer
//!
//! The endpoint listing pipeline and the seams it depends on.
//!
//! | Module | Stage |
//! |--------|-------|
//! | [`group_filter`] | Group Filter Resolver |
//! | [`retrieval`] | Retrieval Strategy (filtered vs. paginated) |
//! | [`visibility`] | Visibility Filter |
//! | [`redaction`] | Field Redactor |
//! | [`list_endpoints`] | Use case wiring the stages together |
//! | [`security_context_resolver`] | Principal resolution seam |
//! | [`repository_factory`] | Backend selection for the store adapters |

pub mod group_filter;
pub mod list_endpoints;
pub mod redaction;
pub mod repository_factory;
pub mod retrieval;
pub mod security_context_resolver;
pub mod visibility;

pub use list_endpoints::{
    EndpointPage, ListEndpointsError, ListEndpointsUseCase, StandardListEndpointsUseCase,
    StoreOperation,
};
pub use retrieval::{EndpointQuery, RetrievalStrategy};
pub use security_context_resolver::{RequestCredentials, SecurityContextError, SecurityContextResolver};
