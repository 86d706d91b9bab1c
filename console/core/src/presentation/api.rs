// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # HTTP API
//!
//! axum router exposing `GET /health` and `GET /api/endpoints`. Query
//! parameters are read as raw text and handed to the listing use case; the
//! total count travels in the `X-Total-Count` header. Every listing failure
//! maps to HTTP 500 with a `{"message": ...}` body, with the cause logged.

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::application::list_endpoints::{ListEndpointsError, ListEndpointsUseCase};
use crate::application::retrieval::{EndpointQuery, ListEndpointsParams};
use crate::application::security_context_resolver::RequestCredentials;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

pub struct AppState {
    pub list_endpoints: Arc<dyn ListEndpointsUseCase>,
    pub start_time: Instant,
}

pub fn app(list_endpoints: Arc<dyn ListEndpointsUseCase>, request_timeout: Duration) -> Router {
    let state = Arc::new(AppState {
        list_endpoints,
        start_time: Instant::now(),
    });

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/endpoints", get(list_endpoints_handler))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

/// GET /api/endpoints?start=&limit=&filter=
///
/// The total count travels in the `X-Total-Count` header.
async fn list_endpoints_handler(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let params = ListEndpointsParams {
        start: raw.get("start").cloned(),
        limit: raw.get("limit").cloned(),
        filter: raw.get("filter").cloned(),
    };
    let query = EndpointQuery::from_params(&params);

    let credentials = RequestCredentials::from_authorization_header(
        headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
    );

    let page = state.list_endpoints.list_endpoints(query, &credentials).await?;

    let mut response = Json(page.endpoints).into_response();
    response.headers_mut().insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(page.total_count),
    );
    Ok(response)
}

/// Error body returned to HTTP clients. The underlying cause is logged, not
/// sent.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<ListEndpointsError> for ApiError {
    fn from(err: ListEndpointsError) -> Self {
        error!(kind = err.kind(), cause = %err.cause(), "{}", err);
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}
