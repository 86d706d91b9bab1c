// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Field Redactor

use crate::domain::endpoint::Endpoint;

/// Strip sensitive attributes from every endpoint in place.
pub fn redact_endpoints(endpoints: &mut [Endpoint]) {
    for endpoint in endpoints.iter_mut() {
        endpoint.redact();
    }
}
