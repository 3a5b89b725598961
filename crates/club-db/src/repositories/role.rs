//! PostgreSQL implementation of RoleRepository
//!
//! Role rows and their per-key permission rows are written together;
//! creating a role materializes one `role_permissions` row for every
//! registered key so the stored set is never sparse.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::Role;
use club_core::error::DomainError;
use club_core::traits::{RepoResult, RoleRepository};
use club_core::value_objects::{Permissions, Snowflake, PERMISSION_KEYS};

use crate::mappers::role_from_parts;
use crate::models::{RoleModel, RolePermissionModel};

use super::error::{map_db_error, role_not_found};

/// PostgreSQL implementation of RoleRepository
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new PgRoleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_permission_rows(
        &self,
        role_ids: &[i64],
    ) -> Result<Vec<RolePermissionModel>, DomainError> {
        sqlx::query_as::<_, RolePermissionModel>(
            r#"
            SELECT role_id, permission_key, is_granted
            FROM role_permissions
            WHERE role_id = ANY($1)
            "#,
        )
        .bind(role_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            SELECT id, club_id, name, description, is_system_role, created_at, updated_at
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = result else {
            return Ok(None);
        };

        let perms = self.load_permission_rows(&[model.id]).await?;
        Ok(Some(role_from_parts(model, &perms)))
    }

    #[instrument(skip(self))]
    async fn find_by_club(&self, club_id: Snowflake) -> RepoResult<Vec<Role>> {
        let models = sqlx::query_as::<_, RoleModel>(
            r#"
            SELECT id, club_id, name, description, is_system_role, created_at, updated_at
            FROM roles
            WHERE club_id = $1
            ORDER BY is_system_role DESC, name ASC
            "#,
        )
        .bind(club_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let perms = self.load_permission_rows(&ids).await?;

        Ok(models
            .into_iter()
            .map(|m| role_from_parts(m, &perms))
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, club_id: Snowflake, name: &str) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            SELECT id, club_id, name, description, is_system_role, created_at, updated_at
            FROM roles
            WHERE club_id = $1 AND LOWER(name) = LOWER($2)
            "#,
        )
        .bind(club_id.into_inner())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = result else {
            return Ok(None);
        };

        let perms = self.load_permission_rows(&[model.id]).await?;
        Ok(Some(role_from_parts(model, &perms)))
    }

    #[instrument(skip(self, role))]
    async fn create(&self, role: &Role) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

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
        .execute(&mut *tx)
        .await
        .map_err(|e| super::error::map_unique_violation(e, || DomainError::DuplicateRoleName))?;

        // One explicit row per registered key
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
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, role))]
    async fn update_details(&self, role: &Role) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE roles
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(role.id.into_inner())
        .bind(&role.name)
        .bind(&role.description)
        .execute(&self.pool)
        .await
        .map_err(|e| super::error::map_unique_violation(e, || DomainError::DuplicateRoleName))?;

        if result.rows_affected() == 0 {
            return Err(role_not_found(role.id));
        }

        Ok(())
    }

    #[instrument(skip(self, changes))]
    async fn update_permissions(
        &self,
        role_id: Snowflake,
        changes: &[(Permissions, bool)],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for (flag, granted) in changes {
            let key = flag
                .key()
                .ok_or_else(|| DomainError::UnknownPermissionKey(format!("{flag:?}")))?;

            sqlx::query(
                r#"
                INSERT INTO role_permissions (role_id, permission_key, is_granted)
                VALUES ($1, $2, $3)
                ON CONFLICT (role_id, permission_key)
                DO UPDATE SET is_granted = EXCLUDED.is_granted
                "#,
            )
            .bind(role_id.into_inner())
            .bind(key)
            .bind(granted)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        sqlx::query(
            r#"
            UPDATE roles SET updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(role_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let is_system = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT is_system_role FROM roles WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match is_system {
            None => return Err(role_not_found(id)),
            Some(true) => return Err(DomainError::SystemRoleProtected),
            Some(false) => {}
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM role_permissions WHERE role_id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM roles WHERE id = $1 AND is_system_role = FALSE
            "#,
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(role_not_found(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn active_member_count(&self, role_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM club_members
            WHERE role_id = $1 AND status = 'active'
            "#,
        )
        .bind(role_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
