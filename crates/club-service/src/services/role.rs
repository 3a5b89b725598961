//! Role service
//!
//! Handles role listing, creation, updates, deletion, and the permission
//! preview used by the role editor. System roles (President, Vice
//! President, Member) are seeded at club provisioning and can never be
//! deleted or renamed.

use club_core::entities::Role;
use club_core::error::DomainError;
use club_core::value_objects::Identity;
use club_core::{Permissions, Snowflake};
use std::collections::BTreeMap;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::mappers::role_response;
use crate::dto::{CreateRoleRequest, RolePreviewResponse, RoleResponse, UpdateRoleRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List a club's roles with full permission maps and usage counts
    ///
    /// System roles first, then custom roles by name.
    #[instrument(skip(self))]
    pub async fn list_roles(
        &self,
        actor: Identity,
        club_id: Snowflake,
    ) -> ServiceResult<Vec<RoleResponse>> {
        self.ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Club", club_id.to_string()))?;

        let roles = self.ctx.role_repo().find_by_club(club_id).await?;

        let mut responses = Vec::with_capacity(roles.len());
        for role in &roles {
            let count = self.ctx.role_repo().active_member_count(role.id).await?;
            responses.push(role_response(role, count));
        }

        Ok(responses)
    }

    /// Create a custom role
    ///
    /// Requires `create_roles`. Keys absent from the request map stay
    /// denied; unknown keys are rejected outright.
    #[instrument(skip(self, request))]
    pub async fn create_role(
        &self,
        actor: Identity,
        club_id: Snowflake,
        request: CreateRoleRequest,
    ) -> ServiceResult<RoleResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        PermissionService::new(self.ctx)
            .require_permission(club_id, actor.user_id, Permissions::CREATE_ROLES)
            .await?;

        self.ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Club", club_id.to_string()))?;

        let permissions = permissions_from_map(&request.permissions)?;

        // Names are unique per club, case-insensitively
        if self
            .ctx
            .role_repo()
            .find_by_name(club_id, &request.name)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateRoleName.into());
        }

        let role = Role::custom(
            self.ctx.generate_id(),
            club_id,
            request.name,
            request.description,
            permissions,
        );

        self.ctx.role_repo().create(&role).await?;

        info!(role_id = %role.id, club_id = %club_id, name = %role.name, "Role created");

        Ok(role_response(&role, 0))
    }

    /// Update a role's details and/or permissions
    ///
    /// Requires `manage_roles`. Sparse: only supplied fields change, only
    /// supplied permission keys are overwritten. System role names and
    /// descriptions are fixed; their permissions can still be tuned.
    #[instrument(skip(self, request))]
    pub async fn update_role(
        &self,
        actor: Identity,
        role_id: Snowflake,
        request: UpdateRoleRequest,
    ) -> ServiceResult<RoleResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let mut role = self
            .ctx
            .role_repo()
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Role", role_id.to_string()))?;

        PermissionService::new(self.ctx)
            .require_permission(role.club_id, actor.user_id, Permissions::MANAGE_ROLES)
            .await?;

        let changes = permission_changes_from_map(&request.permissions)?;

        if request.name.is_some() || request.description.is_some() {
            if role.is_system_role {
                return Err(DomainError::SystemRoleProtected.into());
            }

            if let Some(name) = request.name {
                if !name.eq_ignore_ascii_case(&role.name) {
                    if self
                        .ctx
                        .role_repo()
                        .find_by_name(role.club_id, &name)
                        .await?
                        .is_some()
                    {
                        return Err(DomainError::DuplicateRoleName.into());
                    }
                }
                role.name = name;
            }
            if let Some(description) = request.description {
                role.description = description;
            }

            self.ctx.role_repo().update_details(&role).await?;
        }

        if !changes.is_empty() {
            self.ctx
                .role_repo()
                .update_permissions(role_id, &changes)
                .await?;

            for (flag, granted) in &changes {
                role.permissions.set(*flag, *granted);
            }
        }

        info!(role_id = %role_id, "Role updated");

        let count = self.ctx.role_repo().active_member_count(role_id).await?;
        Ok(role_response(&role, count))
    }

    /// Delete a custom role
    ///
    /// System roles are never deletable, and that answer does not depend
    /// on the caller's permissions. Roles still held by an active member
    /// fail with `RoleInUse`.
    #[instrument(skip(self))]
    pub async fn delete_role(&self, actor: Identity, role_id: Snowflake) -> ServiceResult<()> {
        let role = self
            .ctx
            .role_repo()
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Role", role_id.to_string()))?;

        if role.is_system_role {
            return Err(DomainError::SystemRoleProtected.into());
        }

        PermissionService::new(self.ctx)
            .require_permission(role.club_id, actor.user_id, Permissions::MANAGE_ROLES)
            .await?;

        let holders = self.ctx.role_repo().active_member_count(role_id).await?;
        if holders > 0 {
            return Err(DomainError::RoleInUse.into());
        }

        self.ctx.role_repo().delete(role_id).await?;

        info!(role_id = %role_id, club_id = %role.club_id, "Role deleted");

        Ok(())
    }

    /// Preview what a permission map unlocks, without persisting anything
    pub fn preview(&self, permissions: &BTreeMap<String, bool>) -> ServiceResult<RolePreviewResponse> {
        let perms = permissions_from_map(permissions)?;
        Ok(preview_permissions(perms))
    }
}

/// Collapse a key map into a permission set, rejecting unknown keys
fn permissions_from_map(map: &BTreeMap<String, bool>) -> ServiceResult<Permissions> {
    let mut permissions = Permissions::empty();
    for (key, granted) in map {
        let flag = Permissions::from_key(key)
            .ok_or_else(|| DomainError::UnknownPermissionKey(key.clone()))?;
        if *granted {
            permissions |= flag;
        }
    }
    Ok(permissions)
}

/// Turn a key map into explicit per-key changes, rejecting unknown keys
fn permission_changes_from_map(
    map: &BTreeMap<String, bool>,
) -> ServiceResult<Vec<(Permissions, bool)>> {
    let mut changes = Vec::with_capacity(map.len());
    for (key, granted) in map {
        let flag = Permissions::from_key(key)
            .ok_or_else(|| DomainError::UnknownPermissionKey(key.clone()))?;
        changes.push((flag, *granted));
    }
    Ok(changes)
}

/// Human-readable feature strings for the role editor preview
///
/// Covers the action capabilities only; the `view_*` keys surface as
/// navigation entries instead.
const CAPABILITY_DESCRIPTIONS: [(Permissions, &str); 13] = [
    (Permissions::CREATE_ANNOUNCEMENTS, "Can create announcements"),
    (Permissions::EDIT_ANNOUNCEMENTS, "Can edit announcements"),
    (Permissions::DELETE_ANNOUNCEMENTS, "Can delete announcements"),
    (Permissions::CREATE_EVENTS, "Can create events"),
    (Permissions::EDIT_EVENTS, "Can edit events"),
    (Permissions::DELETE_EVENTS, "Can delete events"),
    (Permissions::MANAGE_MEMBERS, "Can approve/manage members"),
    (Permissions::REMOVE_MEMBERS, "Can remove members"),
    (Permissions::EXPORT_ATTENDANCE, "Can export attendance data"),
    (Permissions::VIEW_STATS, "Can view club statistics"),
    (Permissions::CREATE_ROLES, "Can create new roles"),
    (Permissions::ASSIGN_ROLES, "Can assign roles to members"),
    (Permissions::MANAGE_ROLES, "Can edit/delete roles"),
];

/// Map a permission set onto the navigation entries and capabilities it
/// unlocks
///
/// Dashboard, Sign-In, and Personal Settings are visible to every member
/// regardless of role.
pub fn preview_permissions(permissions: Permissions) -> RolePreviewResponse {
    let mut navigation = vec!["Dashboard"];
    if permissions.has(Permissions::VIEW_ANNOUNCEMENTS) {
        navigation.push("Announcements");
    }
    if permissions.has(Permissions::VIEW_EVENTS) {
        navigation.push("Events");
    }
    if permissions.has(Permissions::VIEW_MEMBERS) {
        navigation.push("Members");
    }
    navigation.push("Sign-In");
    if permissions.has(Permissions::VIEW_ATTENDANCE) {
        navigation.push("Attendance");
    }
    if permissions.has(Permissions::ACCESS_CHAT) {
        navigation.push("Chat");
    }
    navigation.push("Personal Settings");
    if permissions.has(Permissions::MODIFY_CLUB_SETTINGS) {
        navigation.push("Club Settings");
    }

    let capabilities = CAPABILITY_DESCRIPTIONS
        .iter()
        .filter(|(flag, _)| permissions.has(*flag))
        .map(|(_, description)| *description)
        .collect();

    RolePreviewResponse {
        navigation,
        capabilities,
    }
}
