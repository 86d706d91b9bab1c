// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Fleet Console Core
//!
//! Domain model, endpoint listing pipeline, store adapters and HTTP surface
//! for the fleet console.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Answers "which endpoints can this principal see?"

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
