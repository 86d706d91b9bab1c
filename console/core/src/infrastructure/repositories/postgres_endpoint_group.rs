// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Endpoint Group Repository
//!
//! `EndpointGroupRepository` backed by the `endpoint_groups` table, one JSONB
//! document per group.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::endpoint_group::{EndpointGroup, EndpointGroupId};
use crate::domain::repository::{EndpointGroupRepository, RepositoryError};

pub struct PostgresEndpointGroupRepository {
    pool: PgPool,
}

impl PostgresEndpointGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn group_from_row(row: &PgRow) -> Result<EndpointGroup, RepositoryError> {
    let data: serde_json::Value = row.try_get("data")?;
    serde_json::from_value(data)
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize endpoint group: {}", e)))
}

#[async_trait]
impl EndpointGroupRepository for PostgresEndpointGroupRepository {
    async fn save(&self, group: &EndpointGroup) -> Result<(), RepositoryError> {
        let data = serde_json::to_value(group)?;

        sqlx::query(
            r#"
            INSERT INTO endpoint_groups (id, name, data, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                data = EXCLUDED.data,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(i64::from(group.id.0))
        .bind(&group.name)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save endpoint group: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: EndpointGroupId) -> Result<Option<EndpointGroup>, RepositoryError> {
        let row = sqlx::query("SELECT data FROM endpoint_groups WHERE id = $1")
            .bind(i64::from(id.0))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(group_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<EndpointGroup>, RepositoryError> {
        let rows = sqlx::query("SELECT data FROM endpoint_groups ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(group_from_row).collect()
    }
}
