// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::access::{MembershipRole, TeamId, TeamMembership, TeamMembershipId, UserId};
use crate::domain::repository::{RepositoryError, TeamMembershipRepository};

pub struct PostgresTeamMembershipRepository {
    pool: PgPool,
}

impl PostgresTeamMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn id_from_column(value: i64, column: &str) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::Serialization(format!("{} out of range: {}", column, value)))
}

#[async_trait]
impl TeamMembershipRepository for PostgresTeamMembershipRepository {
    async fn save(&self, membership: &TeamMembership) -> Result<(), RepositoryError> {
        let role = match membership.role {
            MembershipRole::Leader => "leader",
            MembershipRole::Member => "member",
        };

        sqlx::query(
            r#"
            INSERT INTO team_memberships (id, user_id, team_id, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                team_id = EXCLUDED.team_id,
                role = EXCLUDED.role
            "#,
        )
        .bind(i64::from(membership.id.0))
        .bind(i64::from(membership.user_id.0))
        .bind(i64::from(membership.team_id.0))
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save team membership: {}", e)))?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<TeamMembership>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, user_id, team_id, role FROM team_memberships WHERE user_id = $1 ORDER BY id",
        )
        .bind(i64::from(user_id.0))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<TeamMembership, RepositoryError> {
                let role: String = row.try_get("role")?;
                let role = match role.as_str() {
                    "leader" => MembershipRole::Leader,
                    _ => MembershipRole::Member,
                };

                Ok(TeamMembership {
                    id: TeamMembershipId(id_from_column(row.try_get("id")?, "id")?),
                    user_id: UserId(id_from_column(row.try_get("user_id")?, "user_id")?),
                    team_id: TeamId(id_from_column(row.try_get("team_id")?, "team_id")?),
                    role,
                })
            })
            .collect()
    }
}
