//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::{Membership, MembershipStatus};
use club_core::traits::{MemberRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::models::ClubMemberModel;

use super::error::{map_db_error, membership_not_found};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Membership>> {
        let result = sqlx::query_as::<_, ClubMemberModel>(
            r#"
            SELECT club_id, user_id, role_id, is_president, status, joined_at, updated_at
            FROM club_members
            WHERE club_id = $1 AND user_id = $2
            "#,
        )
        .bind(club_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Membership::from))
    }

    #[instrument(skip(self))]
    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Membership>> {
        let results = sqlx::query_as::<_, ClubMemberModel>(
            r#"
            SELECT club_id, user_id, role_id, is_president, status, joined_at, updated_at
            FROM club_members
            WHERE club_id = $1 AND status = 'active'
            ORDER BY is_president DESC, joined_at ASC
            "#,
        )
        .bind(club_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Membership::from).collect())
    }

    #[instrument(skip(self, membership))]
    async fn create(&self, membership: &Membership) -> RepoResult<()> {
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
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_role(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE club_members
            SET role_id = $3, updated_at = NOW()
            WHERE club_id = $1 AND user_id = $2 AND status = 'active'
            "#,
        )
        .bind(club_id.into_inner())
        .bind(user_id.into_inner())
        .bind(role_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(membership_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        status: MembershipStatus,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE club_members
            SET status = $3, updated_at = NOW()
            WHERE club_id = $1 AND user_id = $2
            "#,
        )
        .bind(club_id.into_inner())
        .bind(user_id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(membership_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_president(&self, club_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        // Clearing first keeps exactly one flag set even if the transfer
        // targets the current president
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            UPDATE club_members
            SET is_president = FALSE, updated_at = NOW()
            WHERE club_id = $1 AND is_president = TRUE
            "#,
        )
        .bind(club_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE club_members
            SET is_president = TRUE, updated_at = NOW()
            WHERE club_id = $1 AND user_id = $2 AND status = 'active'
            "#,
        )
        .bind(club_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(membership_not_found());
        }

        sqlx::query(
            r#"
            UPDATE clubs
            SET current_president_id = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(club_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
