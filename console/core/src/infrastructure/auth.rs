// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # JWT Security Context Resolution
//!
//! Bearer tokens are HS256 JWTs signed with the console secret
//! (`spec.auth.jwt_secret`). Administrators resolve directly; standard
//! users are expanded with their team memberships so that team access
//! policies apply.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::security_context_resolver::{
    RequestCredentials, SecurityContextError, SecurityContextResolver,
};
use crate::domain::access::UserId;
use crate::domain::repository::TeamMembershipRepository;
use crate::domain::security_context::SecurityContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenRole {
    Administrator,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: u32,
    pub username: String,
    pub role: TokenRole,
    pub exp: i64,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Mints console tokens. Used by the CLI and by tests.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: Option<String>,
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: Option<String>) -> Result<Self> {
        if secret.is_empty() {
            return Err(anyhow::anyhow!("token secret must not be empty"));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            issuer,
        })
    }

    pub fn issue(&self, user_id: UserId, username: &str, role: TokenRole, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            id: user_id.0,
            username: username.to_string(),
            role,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }
}

pub struct JwtSecurityContextResolver {
    decoding_key: DecodingKey,
    validation: Validation,
    memberships: Arc<dyn TeamMembershipRepository>,
}

impl JwtSecurityContextResolver {
    pub fn new(
        secret: &str,
        issuer: Option<&str>,
        memberships: Arc<dyn TeamMembershipRepository>,
    ) -> Result<Self> {
        if secret.is_empty() {
            return Err(anyhow::anyhow!("token secret must not be empty"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        match issuer {
            Some(iss) => {
                validation.set_required_spec_claims(&["exp", "iss"]);
                validation.set_issuer(&[iss]);
            }
            None => validation.set_required_spec_claims(&["exp"]),
        }

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            memberships,
        })
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, SecurityContextError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("Rejected bearer token: {}", e);
                SecurityContextError::InvalidToken(e.to_string())
            })
    }
}

#[async_trait]
impl SecurityContextResolver for JwtSecurityContextResolver {
    async fn resolve(&self, credentials: &RequestCredentials) -> Result<SecurityContext, SecurityContextError> {
        let token = credentials
            .bearer_token
            .as_deref()
            .ok_or(SecurityContextError::MissingCredentials)?;

        let claims = self.verify(token)?;
        let user_id = UserId(claims.id);

        match claims.role {
            TokenRole::Administrator => Ok(SecurityContext::administrator(user_id)),
            TokenRole::Standard => {
                let team_ids = self
                    .memberships
                    .find_by_user(user_id)
                    .await?
                    .into_iter()
                    .map(|m| m.team_id)
                    .collect::<Vec<_>>();

                debug!(user_id = %user_id, teams = team_ids.len(), "Resolved restricted security context");
                Ok(SecurityContext::restricted(user_id, team_ids))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::{MembershipRole, TeamId, TeamMembership, TeamMembershipId};
    use crate::infrastructure::repositories::InMemoryTeamMembershipRepository;

    const SECRET: &str = "test-secret-do-not-use";

    async fn memberships() -> Arc<dyn TeamMembershipRepository> {
        let repo = InMemoryTeamMembershipRepository::new();
        repo.save(&TeamMembership {
            id: TeamMembershipId(1),
            user_id: UserId(5),
            team_id: TeamId(2),
            role: MembershipRole::Member,
        })
        .await
        .unwrap();
        Arc::new(repo)
    }

    #[tokio::test]
    async fn test_administrator_token() {
        let issuer = TokenIssuer::new(SECRET, None).unwrap();
        let token = issuer.issue(UserId(1), "admin", TokenRole::Administrator, Duration::hours(1)).unwrap();
        let resolver = JwtSecurityContextResolver::new(SECRET, None, memberships().await).unwrap();

        let ctx = resolver.resolve(&RequestCredentials::bearer(token)).await.unwrap();
        assert_eq!(ctx, SecurityContext::administrator(UserId(1)));
    }

    #[tokio::test]
    async fn test_standard_token_loads_teams() {
        let issuer = TokenIssuer::new(SECRET, None).unwrap();
        let token = issuer.issue(UserId(5), "alex", TokenRole::Standard, Duration::hours(1)).unwrap();
        let resolver = JwtSecurityContextResolver::new(SECRET, None, memberships().await).unwrap();

        let ctx = resolver.resolve(&RequestCredentials::bearer(token)).await.unwrap();
        assert_eq!(ctx, SecurityContext::restricted(UserId(5), vec![TeamId(2)]));
    }

    #[tokio::test]
    async fn test_missing_token() {
        let resolver = JwtSecurityContextResolver::new(SECRET, None, memberships().await).unwrap();
        let err = resolver.resolve(&RequestCredentials::anonymous()).await.unwrap_err();
        assert!(matches!(err, SecurityContextError::MissingCredentials));
    }

    #[tokio::test]
    async fn test_rejects_wrong_secret() {
        let issuer = TokenIssuer::new("another-secret", None).unwrap();
        let token = issuer.issue(UserId(1), "admin", TokenRole::Administrator, Duration::hours(1)).unwrap();
        let resolver = JwtSecurityContextResolver::new(SECRET, None, memberships().await).unwrap();

        let err = resolver.resolve(&RequestCredentials::bearer(token)).await.unwrap_err();
        assert!(matches!(err, SecurityContextError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_rejects_expired_token() {
        let issuer = TokenIssuer::new(SECRET, None).unwrap();
        let token = issuer.issue(UserId(1), "admin", TokenRole::Administrator, Duration::hours(-2)).unwrap();
        let resolver = JwtSecurityContextResolver::new(SECRET, None, memberships().await).unwrap();

        assert!(resolver.resolve(&RequestCredentials::bearer(token)).await.is_err());
    }

    #[tokio::test]
    async fn test_issuer_is_enforced_when_configured() {
        let resolver = JwtSecurityContextResolver::new(SECRET, Some("fleet-console"), memberships().await).unwrap();

        let untagged = TokenIssuer::new(SECRET, None).unwrap();
        let token = untagged.issue(UserId(1), "admin", TokenRole::Administrator, Duration::hours(1)).unwrap();
        assert!(resolver.resolve(&RequestCredentials::bearer(token)).await.is_err());

        let tagged = TokenIssuer::new(SECRET, Some("fleet-console".to_string())).unwrap();
        let token = tagged.issue(UserId(1), "admin", TokenRole::Administrator, Duration::hours(1)).unwrap();
        assert!(resolver.resolve(&RequestCredentials::bearer(token)).await.is_ok());
    }

    #[test]
    fn test_rejects_empty_secret() {
        assert!(TokenIssuer::new("", None).is_err());
    }
}
