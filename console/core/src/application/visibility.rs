// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Visibility Filter
//!
//! Applied to an already paginated page, so a restricted caller may receive
//! fewer endpoints than requested while the advertised total is unchanged.

use std::collections::HashMap;

use crate::domain::endpoint::Endpoint;
use crate::domain::endpoint_group::{EndpointGroup, EndpointGroupId};
use crate::domain::security_context::SecurityContext;

/// Endpoints of `endpoints` the principal may see, in input order.
pub fn filter_visible_endpoints(
    endpoints: Vec<Endpoint>,
    groups: &[EndpointGroup],
    context: &SecurityContext,
) -> Vec<Endpoint> {
    if context.is_administrator() {
        return endpoints;
    }

    let catalog: HashMap<EndpointGroupId, &EndpointGroup> =
        groups.iter().map(|group| (group.id, group)).collect();

    endpoints
        .into_iter()
        .filter(|endpoint| context.can_see(endpoint, catalog.get(&endpoint.group_id).copied()))
        .collect()
}
