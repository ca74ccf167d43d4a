use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    Email, PersonName, Phone, Role, TeamMember, TeamMemberId,
    TeamMemberStore, TeamMemberStoreError, ValidationError,
};

pub struct PostgresTeamMemberStore {
    pool: PgPool,
}

impl PostgresTeamMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TeamMemberRow> for TeamMember {
    type Error = ValidationError;

    fn try_from(row: TeamMemberRow) -> Result<Self, Self::Error> {
        Ok(TeamMember {
            id: TeamMemberId::new(row.id),
            first_name: PersonName::parse(row.first_name)?,
            last_name: PersonName::parse(row.last_name)?,
            email: Email::parse(row.email)?,
            phone: Phone::parse(row.phone)?,
            role: row.role.parse::<Role>()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_team_member(
    row: TeamMemberRow,
) -> Result<TeamMember, TeamMemberStoreError> {
    TeamMember::try_from(row)
        .map_err(|e| TeamMemberStoreError::UnexpectedError(eyre!(e)))
}

#[async_trait::async_trait]
impl TeamMemberStore for PostgresTeamMemberStore {
    #[tracing::instrument(name = "Adding team member to PostgreSQL", skip_all)]
    async fn add_team_member(
        &mut self,
        team_member: &TeamMember,
    ) -> Result<(), TeamMemberStoreError> {
        sqlx::query(
            r#"
            INSERT INTO team_members
                (id, first_name, last_name, email, phone, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(team_member.id.as_ref())
        .bind(team_member.first_name.as_ref())
        .bind(team_member.last_name.as_ref())
        .bind(team_member.email.as_ref())
        .bind(team_member.phone.as_ref())
        .bind(team_member.role.as_str())
        .bind(team_member.created_at)
        .bind(team_member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                TeamMemberStoreError::TeamMemberIDExists
            }
            err => TeamMemberStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Retrieving team member from PostgreSQL",
        skip_all
    )]
    async fn get_team_member(
        &self,
        id: &TeamMemberId,
    ) -> Result<TeamMember, TeamMemberStoreError> {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT id, first_name, last_name, email, phone, role, created_at, updated_at
            FROM team_members
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                TeamMemberStoreError::TeamMemberIDNotFound
            }
            err => TeamMemberStoreError::UnexpectedError(eyre!(err)),
        })?;

        into_team_member(row)
    }

    #[tracing::instrument(name = "Listing team members from PostgreSQL", skip_all)]
    async fn list_team_members(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<TeamMember>, TeamMemberStoreError> {
        let offset = i64::try_from(offset)
            .map_err(|e| TeamMemberStoreError::UnexpectedError(eyre!(e)))?;
        // LIMIT NULL is LIMIT ALL
        let limit = limit
            .map(i64::try_from)
            .transpose()
            .map_err(|e| TeamMemberStoreError::UnexpectedError(eyre!(e)))?;

        let rows = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT id, first_name, last_name, email, phone, role, created_at, updated_at
            FROM team_members
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TeamMemberStoreError::UnexpectedError(eyre!(e)))?;

        rows.into_iter().map(into_team_member).collect()
    }

    #[tracing::instrument(name = "Counting team members in PostgreSQL", skip_all)]
    async fn count_team_members(&self) -> Result<usize, TeamMemberStoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM team_members")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| TeamMemberStoreError::UnexpectedError(eyre!(e)))?;

        usize::try_from(count)
            .map_err(|e| TeamMemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Updating team member in PostgreSQL", skip_all)]
    async fn update_team_member(
        &mut self,
        team_member: &TeamMember,
    ) -> Result<(), TeamMemberStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE team_members
            SET first_name = $2, last_name = $3, email = $4, phone = $5,
                role = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(team_member.id.as_ref())
        .bind(team_member.first_name.as_ref())
        .bind(team_member.last_name.as_ref())
        .bind(team_member.email.as_ref())
        .bind(team_member.phone.as_ref())
        .bind(team_member.role.as_str())
        .bind(team_member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TeamMemberStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(TeamMemberStoreError::TeamMemberIDNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting team member from PostgreSQL", skip_all)]
    async fn delete_team_member(
        &mut self,
        id: &TeamMemberId,
    ) -> Result<(), TeamMemberStoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM team_members WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| TeamMemberStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(TeamMemberStoreError::TeamMemberIDNotFound);
        }

        Ok(())
    }
}
