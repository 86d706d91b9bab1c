// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Security Context Resolution
//!
//! Turns the credentials presented with a request into a
//! [`SecurityContext`]. The listing pipeline only depends on this trait; the
//! JWT-backed implementation lives in `crate::infrastructure::auth`.

use async_trait::async_trait;

use crate::domain::repository::RepositoryError;
use crate::domain::security_context::SecurityContext;

/// Credentials extracted from the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCredentials {
    pub bearer_token: Option<String>,
}

impl RequestCredentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Parse an `Authorization` header value of the form `Bearer <token>`.
    pub fn from_authorization_header(value: Option<&str>) -> Self {
        let bearer_token = value
            .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self { bearer_token }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SecurityContextError {
    #[error("No credentials were presented with the request")]
    MissingCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unable to load team memberships: {0}")]
    MembershipLookup(#[from] RepositoryError),
}

#[async_trait]
pub trait SecurityContextResolver: Send + Sync {
    async fn resolve(&self, credentials: &RequestCredentials) -> Result<SecurityContext, SecurityContextError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_header() {
        assert_eq!(
            RequestCredentials::from_authorization_header(Some("Bearer abc.def.ghi")),
            RequestCredentials::bearer("abc.def.ghi")
        );
        assert_eq!(
            RequestCredentials::from_authorization_header(Some("Basic dXNlcjpwYXNz")),
            RequestCredentials::anonymous()
        );
        assert_eq!(
            RequestCredentials::from_authorization_header(Some("Bearer   ")),
            RequestCredentials::anonymous()
        );
        assert_eq!(RequestCredentials::from_authorization_header(None), RequestCredentials::anonymous());
    }
}
