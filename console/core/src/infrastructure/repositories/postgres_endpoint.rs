// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Endpoint Repository
//!
//! Production `EndpointRepository` backed by the `endpoints` table. The full
//! aggregate is stored as JSONB in `data`; `name`, `url`, `status` and
//! `group_id` are duplicated into columns so search and pagination run in
//! SQL.
//!
//! Search uses `strpos` rather than `LIKE` so that `%` and `_` in a search
//! term are matched literally. `LOWER()` follows the database's locale, while
//! the in-memory store lowercases with Rust's Unicode rules; the two agree on
//! ASCII and may differ on other scripts depending on the server collation.
//!
//! Offsets and limits past `i64::MAX` are clamped, which yields an empty page
//! rather than an error.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::endpoint::{Endpoint, EndpointId};
use crate::domain::endpoint_group::EndpointGroup;
use crate::domain::repository::{EndpointRepository, RepositoryError};

pub struct PostgresEndpointRepository {
    pool: PgPool,
}

impl PostgresEndpointRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn endpoint_from_row(row: &PgRow) -> Result<Endpoint, RepositoryError> {
    let data: serde_json::Value = row.try_get("data")?;
    serde_json::from_value(data)
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize endpoint: {}", e)))
}

#[async_trait]
impl EndpointRepository for PostgresEndpointRepository {
    async fn save(&self, endpoint: &Endpoint) -> Result<(), RepositoryError> {
        let data = serde_json::to_value(endpoint)?;

        sqlx::query(
            r#"
            INSERT INTO endpoints (id, name, url, status, group_id, data, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                url = EXCLUDED.url,
                status = EXCLUDED.status,
                group_id = EXCLUDED.group_id,
                data = EXCLUDED.data,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(i64::from(endpoint.id.0))
        .bind(&endpoint.name)
        .bind(&endpoint.url)
        .bind(endpoint.status.as_str())
        .bind(i64::from(endpoint.group_id.0))
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save endpoint: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: EndpointId) -> Result<Option<Endpoint>, RepositoryError> {
        let row = sqlx::query("SELECT data FROM endpoints WHERE id = $1")
            .bind(i64::from(id.0))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(endpoint_from_row).transpose()
    }

    async fn endpoints_filtered(
        &self,
        filter: &str,
        groups: &[EndpointGroup],
    ) -> Result<Vec<Endpoint>, RepositoryError> {
        let group_ids: Vec<i64> = groups.iter().map(|g| i64::from(g.id.0)).collect();

        let rows = sqlx::query(
            r#"
            SELECT data
            FROM endpoints
            WHERE strpos(LOWER(name), $1) > 0
               OR strpos(LOWER(url), $1) > 0
               OR status = $1
               OR EXISTS (
                    SELECT 1
                    FROM jsonb_array_elements_text(COALESCE(data->'tags', '[]'::jsonb)) AS tag
                    WHERE strpos(LOWER(tag), $1) > 0
               )
               OR group_id = ANY($2)
            ORDER BY id
            "#,
        )
        .bind(filter)
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(endpoint_from_row).collect()
    }

    async fn endpoints_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Endpoint>, RepositoryError> {
        let rows = if limit == 0 {
            sqlx::query("SELECT data FROM endpoints ORDER BY id")
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query("SELECT data FROM endpoints ORDER BY id OFFSET $1 LIMIT $2")
                .bind(clamp_to_sql_int(offset))
                .bind(clamp_to_sql_int(limit))
                .fetch_all(&self.pool)
                .await?
        };

        rows.iter().map(endpoint_from_row).collect()
    }

    async fn endpoint_count(&self) -> Result<usize, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM endpoints")
            .fetch_one(&self.pool)
            .await?;

        usize::try_from(count).map_err(|e| RepositoryError::Unknown(format!("Invalid endpoint count {}: {}", count, e)))
    }
}

fn clamp_to_sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
