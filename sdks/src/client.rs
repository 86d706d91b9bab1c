// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::types::{EndpointListRequest, EndpointListResponse, ErrorBody, HealthStatus};

const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("console returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Client for the fleet console HTTP API.
pub struct FleetConsoleClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl FleetConsoleClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            token: None,
        }
    }

    /// Set the bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// List endpoints visible to the token's principal.
    pub async fn list_endpoints(&self, request: &EndpointListRequest) -> Result<EndpointListResponse, ClientError> {
        let url = format!("{}/api/endpoints", self.base_url);
        let req = self.authorized(self.client.get(&url).query(request));

        let response = check(req.send().await?).await?;

        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .ok_or_else(|| ClientError::InvalidResponse("missing X-Total-Count header".to_string()))?
            .to_str()
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .ok_or_else(|| ClientError::InvalidResponse("malformed X-Total-Count header".to_string()))?;

        let endpoints = response.json().await?;
        debug!(total_count, "Listed endpoints");

        Ok(EndpointListResponse { endpoints, total_count })
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = format!("{}/health", self.base_url);
        let response = check(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Map non-success statuses to `ClientError::Api`, keeping the server's
/// message when the body carries one.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    Err(ClientError::Api { status, message })
}
