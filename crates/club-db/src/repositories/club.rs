//! PostgreSQL implementation of ClubRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::Club;
use club_core::traits::{ClubRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::models::ClubModel;

use super::error::{club_not_found, map_db_error};

/// PostgreSQL implementation of ClubRepository
#[derive(Clone)]
pub struct PgClubRepository {
    pool: PgPool,
}

impl PgClubRepository {
    /// Create a new PgClubRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubRepository for PgClubRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Club>> {
        let result = sqlx::query_as::<_, ClubModel>(
            r#"
            SELECT id, name, description, staff_advisor, access_code,
                   current_president_id, created_from_request_id, is_active,
                   created_at, updated_at
            FROM clubs
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Club::from))
    }

    #[instrument(skip(self))]
    async fn find_by_access_code(&self, code: &str) -> RepoResult<Option<Club>> {
        let result = sqlx::query_as::<_, ClubModel>(
            r#"
            SELECT id, name, description, staff_advisor, access_code,
                   current_president_id, created_from_request_id, is_active,
                   created_at, updated_at
            FROM clubs
            WHERE access_code = $1 AND is_active = TRUE
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Club::from))
    }

    #[instrument(skip(self))]
    async fn access_code_exists(&self, code: &str) -> RepoResult<bool> {
        // Retired codes stay reserved so an old code never resolves to a new club
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM clubs WHERE access_code = $1)
            "#,
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Club>> {
        let results = sqlx::query_as::<_, ClubModel>(
            r#"
            SELECT id, name, description, staff_advisor, access_code,
                   current_president_id, created_from_request_id, is_active,
                   created_at, updated_at
            FROM clubs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Club::from).collect())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, club_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM club_members
            WHERE club_id = $1 AND status = 'active'
            "#,
        )
        .bind(club_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE clubs
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(club_not_found(id));
        }

        Ok(())
    }
}
