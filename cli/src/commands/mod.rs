// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the fleet console CLI

pub mod config;
pub mod endpoints;
pub mod token;
pub mod update;

pub use self::config::ConfigCommand;
pub use self::endpoints::EndpointsCommand;
pub use self::token::TokenCommand;
pub use self::update::UpdateCommand;
