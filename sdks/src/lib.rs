// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

/// Fleet Console Rust SDK
///
/// Typed access to the console's endpoint listing API.

pub mod client;
pub mod types;

pub use client::{ClientError, FleetConsoleClient};
pub use types::*;
