// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Layer
//!
//! Entities owned by the store (endpoints, endpoint groups, team
//! memberships), the request-scoped [`security_context::SecurityContext`],
//! persistence contracts and node configuration.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure types and invariants, no I/O

pub mod access;
pub mod config;
pub mod endpoint;
pub mod endpoint_group;
pub mod repository;
pub mod security_context;
