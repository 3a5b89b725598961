//! Permission service
//!
//! The authorization gate for every club-scoped operation. Resolves the
//! caller's active membership, loads the stored permission set of its role,
//! and answers with the stored boolean. Absence of membership, role, or key
//! is a plain `false`, never an error; only store failures propagate.

use club_core::error::DomainError;
use club_core::{Permissions, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check if a user holds a capability in a club
    ///
    /// Closed world: no membership, a removed membership, or a vanished
    /// role all answer `false`.
    #[instrument(skip(self))]
    pub async fn check_permission(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        permission: Permissions,
    ) -> ServiceResult<bool> {
        let permissions = self.member_permissions(club_id, user_id).await?;
        Ok(permissions.has(permission))
    }

    /// Check a capability by its string key
    ///
    /// Unknown keys are a validation error, not a silent deny; callers
    /// probing for a typo'd key should hear about it.
    #[instrument(skip(self))]
    pub async fn check_permission_key(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        key: &str,
    ) -> ServiceResult<bool> {
        let permission = Permissions::from_key(key)
            .ok_or_else(|| DomainError::UnknownPermissionKey(key.to_string()))?;
        self.check_permission(club_id, user_id, permission).await
    }

    /// Check a capability and fail with `MissingPermission` if denied
    #[instrument(skip(self))]
    pub async fn require_permission(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
        permission: Permissions,
    ) -> ServiceResult<()> {
        if !self.check_permission(club_id, user_id, permission).await? {
            let name = permission.key().unwrap_or("unknown");
            return Err(ServiceError::permission_denied(name));
        }
        Ok(())
    }

    /// Compute the full capability set of a user in a club
    ///
    /// Empty for non-members and removed members.
    #[instrument(skip(self))]
    pub async fn member_permissions(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Permissions> {
        let Some(membership) = self.ctx.member_repo().find(club_id, user_id).await? else {
            return Ok(Permissions::empty());
        };

        if !membership.is_active() {
            return Ok(Permissions::empty());
        }

        let Some(role) = self.ctx.role_repo().find_by_id(membership.role_id).await? else {
            return Ok(Permissions::empty());
        };

        debug!(
            user_id = %user_id,
            club_id = %club_id,
            role = %role.name,
            permissions = %role.permissions,
            "Resolved member permissions"
        );

        Ok(role.permissions)
    }

    /// Check whether a user is the club's current president
    #[instrument(skip(self))]
    pub async fn is_president(
        &self,
        club_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<bool> {
        let club = self
            .ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Club", club_id.to_string()))?;

        Ok(club.current_president_id == user_id)
    }
}
