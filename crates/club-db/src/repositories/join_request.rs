//! PostgreSQL implementation of JoinRequestRepository
//!
//! Approval and rejection are guarded transitions: the UPDATE matches only
//! rows still pending, and zero affected rows means another reviewer won
//! the race.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::{JoinRequest, Membership};
use club_core::error::DomainError;
use club_core::traits::{JoinRequestRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::models::JoinRequestModel;

use super::error::map_db_error;

/// PostgreSQL implementation of JoinRequestRepository
#[derive(Clone)]
pub struct PgJoinRequestRepository {
    pool: PgPool,
}

impl PgJoinRequestRepository {
    /// Create a new PgJoinRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JoinRequestRepository for PgJoinRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<JoinRequest>> {
        let result = sqlx::query_as::<_, JoinRequestModel>(
            r#"
            SELECT id, club_id, user_id, access_code_used, message, status,
                   reviewed_by, reviewed_at, assigned_role_id, rejection_reason, created_at
            FROM join_requests
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(JoinRequest::from))
    }

    #[instrument(skip(self))]
    async fn find_pending_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<JoinRequest>> {
        let results = sqlx::query_as::<_, JoinRequestModel>(
            r#"
            SELECT id, club_id, user_id, access_code_used, message, status,
                   reviewed_by, reviewed_at, assigned_role_id, rejection_reason, created_at
            FROM join_requests
            WHERE club_id = $1 AND status = 'pending'
            ORDER BY created_at ASC
            "#,
        )
        .bind(club_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(JoinRequest::from).collect())
    }

    #[instrument(skip(self))]
    async fn has_pending(&self, club_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM join_requests
                WHERE club_id = $1 AND user_id = $2 AND status = 'pending'
            )
            "#,
        )
        .bind(club_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, request))]
    async fn create(&self, request: &JoinRequest) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO join_requests (id, club_id, user_id, access_code_used, message,
                                       status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(request.id.into_inner())
        .bind(request.club_id.into_inner())
        .bind(request.user_id.into_inner())
        .bind(&request.access_code_used)
        .bind(&request.message)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, membership))]
    async fn approve(
        &self,
        request_id: Snowflake,
        reviewer_id: Snowflake,
        membership: &Membership,
        general_room_id: Option<Snowflake>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Guarded flip first; losing the race writes nothing
        let result = sqlx::query(
            r#"
            UPDATE join_requests
            SET status = 'approved', reviewed_by = $2, reviewed_at = NOW(),
                assigned_role_id = $3
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(request_id.into_inner())
        .bind(reviewer_id.into_inner())
        .bind(membership.role_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RequestAlreadyProcessed);
        }

        sqlx::query(
            r#"
            INSERT INTO club_members (club_id, user_id, role_id, is_president, status,
                                      joined_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(membership.club_id.into_inner())
        .bind(membership.user_id.into_inner())
        .bind(membership.role_id.into_inner())
        .bind(membership.is_president)
        .bind(membership.status.as_str())
        .bind(membership.joined_at)
        .bind(membership.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if let Some(room_id) = general_room_id {
            sqlx::query(
                r#"
                INSERT INTO chat_room_members (room_id, user_id, joined_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (room_id, user_id) DO NOTHING
                "#,
            )
            .bind(room_id.into_inner())
            .bind(membership.user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject(
        &self,
        request_id: Snowflake,
        reviewer_id: Snowflake,
        reason: Option<&str>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE join_requests
            SET status = 'rejected', reviewed_by = $2, reviewed_at = NOW(),
                rejection_reason = $3
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(request_id.into_inner())
        .bind(reviewer_id.into_inner())
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
