// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer
//!
//! HTTP surface that translates requests into application service calls.
//! **No business logic lives here**; listing is delegated to
//! [`crate::application::ListEndpointsUseCase`].
//!
//! | Module | Transport | Description |
//! |--------|-----------|-------------|
//! | [`api`] | HTTP (Axum) | `GET /api/endpoints`, `GET /health` |

pub mod api;
