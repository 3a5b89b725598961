//! PostgreSQL implementation of CreationRequestRepository
//!
//! Approval provisions the whole club in one transaction: the guarded
//! request flip, the club row, the three system roles with their full
//! permission sets, the founding president membership, and the general
//! chat room. Any failure rolls everything back and the request stays
//! pending.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use club_core::entities::{ChatRoom, Club, ClubCreationRequest, Membership, Role};
use club_core::error::DomainError;
use club_core::traits::{CreationRequestRepository, RepoResult};
use club_core::value_objects::{Snowflake, PERMISSION_KEYS};

use crate::models::CreationRequestModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CreationRequestRepository
#[derive(Clone)]
pub struct PgCreationRequestRepository {
    pool: PgPool,
}

impl PgCreationRequestRepository {
    /// Create a new PgCreationRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_role(
        tx: &mut Transaction<'_, Postgres>,
        role: &Role,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO roles (id, club_id, name, description, is_system_role,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(role.id.into_inner())
        .bind(role.club_id.into_inner())
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.is_system_role)
        .bind(role.created_at)
        .bind(role.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        for (flag, key) in PERMISSION_KEYS {
            sqlx::query(
                r#"
                INSERT INTO role_permissions (role_id, permission_key, is_granted)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(role.id.into_inner())
            .bind(key)
            .bind(role.permissions.has(flag))
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl CreationRequestRepository for PgCreationRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClubCreationRequest>> {
        let result = sqlx::query_as::<_, CreationRequestModel>(
            r#"
            SELECT id, requested_by, club_name, description, staff_advisor, president_name,
                   requester_comment, status, rejection_reason, reviewed_at, created_at
            FROM club_creation_requests
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ClubCreationRequest::from))
    }

    #[instrument(skip(self))]
    async fn find_pending(&self) -> RepoResult<Vec<ClubCreationRequest>> {
        let results = sqlx::query_as::<_, CreationRequestModel>(
            r#"
            SELECT id, requested_by, club_name, description, staff_advisor, president_name,
                   requester_comment, status, rejection_reason, reviewed_at, created_at
            FROM club_creation_requests
            WHERE status = 'pending'
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ClubCreationRequest::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_requester(&self, user_id: Snowflake) -> RepoResult<Vec<ClubCreationRequest>> {
        let results = sqlx::query_as::<_, CreationRequestModel>(
            r#"
            SELECT id, requested_by, club_name, description, staff_advisor, president_name,
                   requester_comment, status, rejection_reason, reviewed_at, created_at
            FROM club_creation_requests
            WHERE requested_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ClubCreationRequest::from).collect())
    }

    #[instrument(skip(self))]
    async fn has_pending(&self, user_id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM club_creation_requests
                WHERE requested_by = $1 AND status = 'pending'
            )
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, request))]
    async fn create(&self, request: &ClubCreationRequest) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO club_creation_requests (id, requested_by, club_name, description,
                                                staff_advisor, president_name,
                                                requester_comment, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(request.id.into_inner())
        .bind(request.requested_by.into_inner())
        .bind(&request.club_name)
        .bind(&request.description)
        .bind(&request.staff_advisor)
        .bind(&request.president_name)
        .bind(&request.requester_comment)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, club, roles, president, general_room))]
    async fn approve(
        &self,
        request_id: Snowflake,
        club: &Club,
        roles: &[Role],
        president: &Membership,
        general_room: &ChatRoom,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Guarded flip first; losing the race writes nothing
        let result = sqlx::query(
            r#"
            UPDATE club_creation_requests
            SET status = 'approved', reviewed_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(request_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RequestAlreadyProcessed);
        }

        sqlx::query(
            r#"
            INSERT INTO clubs (id, name, description, staff_advisor, access_code,
                               current_president_id, created_from_request_id, is_active,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(club.id.into_inner())
        .bind(&club.name)
        .bind(&club.description)
        .bind(&club.staff_advisor)
        .bind(&club.access_code)
        .bind(club.current_president_id.into_inner())
        .bind(club.created_from_request_id.into_inner())
        .bind(club.is_active)
        .bind(club.created_at)
        .bind(club.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| super::error::map_unique_violation(e, || DomainError::AccessCodeExists))?;

        for role in roles {
            Self::insert_role(&mut tx, role).await?;
        }

        sqlx::query(
            r#"
            INSERT INTO club_members (club_id, user_id, role_id, is_president, status,
                                      joined_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(president.club_id.into_inner())
        .bind(president.user_id.into_inner())
        .bind(president.role_id.into_inner())
        .bind(president.is_president)
        .bind(president.status.as_str())
        .bind(president.joined_at)
        .bind(president.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO chat_rooms (id, club_id, name, description, created_by,
                                    is_general, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(general_room.id.into_inner())
        .bind(general_room.club_id.into_inner())
        .bind(&general_room.name)
        .bind(&general_room.description)
        .bind(general_room.created_by.into_inner())
        .bind(general_room.is_general)
        .bind(general_room.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO chat_room_members (room_id, user_id, joined_at)
            VALUES ($1, $2, NOW())
            "#,
        )
        .bind(general_room.id.into_inner())
        .bind(president.user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject(&self, request_id: Snowflake, reason: Option<&str>) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE club_creation_requests
            SET status = 'rejected', reviewed_at = NOW(), rejection_reason = $2
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(request_id.into_inner())
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RequestAlreadyProcessed);
        }

        Ok(())
    }
}
