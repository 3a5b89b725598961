//! Member service
//!
//! Join requests, membership review, role assignment, president transfer,
//! and the club roster. Memberships are never hard-deleted; removal flips
//! the status to `removed`.

use club_core::entities::{JoinRequest, Membership, MembershipStatus};
use club_core::error::DomainError;
use club_core::value_objects::Identity;
use club_core::{Permissions, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::mappers::member_response;
use crate::dto::{JoinClubRequest, JoinRequestResponse, MemberResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ask to join a club by access code
    ///
    /// The code is canonicalized to uppercase before lookup and must
    /// resolve to an active club.
    #[instrument(skip(self, request))]
    pub async fn request_join(
        &self,
        actor: Identity,
        request: JoinClubRequest,
    ) -> ServiceResult<JoinRequestResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let code = request.access_code.trim().to_uppercase();

        let club = self
            .ctx
            .club_repo()
            .find_by_access_code(&code)
            .await?
            .ok_or(DomainError::InvalidAccessCode)?;

        if let Some(membership) = self.ctx.member_repo().find(club.id, actor.user_id).await? {
            return Err(match membership.status {
                MembershipStatus::Active => DomainError::AlreadyMember.into(),
                MembershipStatus::Removed => DomainError::MembershipRemoved.into(),
            });
        }

        if self
            .ctx
            .join_request_repo()
            .has_pending(club.id, actor.user_id)
            .await?
        {
            return Err(DomainError::DuplicatePendingRequest.into());
        }

        let join_request = JoinRequest::new(
            self.ctx.generate_id(),
            club.id,
            actor.user_id,
            code,
            request.message,
        );

        self.ctx.join_request_repo().create(&join_request).await?;

        info!(
            request_id = %join_request.id,
            club_id = %club.id,
            "Join request submitted"
        );

        Ok(JoinRequestResponse::from(&join_request))
    }

    /// Pending join requests for a club, oldest first
    ///
    /// Requires `manage_members`.
    #[instrument(skip(self))]
    pub async fn pending_requests(
        &self,
        actor: Identity,
        club_id: Snowflake,
    ) -> ServiceResult<Vec<JoinRequestResponse>> {
        PermissionService::new(self.ctx)
            .require_permission(club_id, actor.user_id, Permissions::MANAGE_MEMBERS)
            .await?;

        let requests = self
            .ctx
            .join_request_repo()
            .find_pending_by_club(club_id)
            .await?;

        Ok(requests.iter().map(JoinRequestResponse::from).collect())
    }

    /// Approve a join request, enrolling the applicant with the given role
    ///
    /// Requires `manage_members`. The role must belong to the request's
    /// club. Concurrent approvals of the same request: exactly one wins.
    #[instrument(skip(self))]
    pub async fn approve_join(
        &self,
        actor: Identity,
        request_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<()> {
        let request = self
            .ctx
            .join_request_repo()
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::JoinRequestNotFound(request_id))?;

        PermissionService::new(self.ctx)
            .require_permission(request.club_id, actor.user_id, Permissions::MANAGE_MEMBERS)
            .await?;

        let role = self
            .ctx
            .role_repo()
            .find_by_id(role_id)
            .await?
            .ok_or(DomainError::RoleNotFound(role_id))?;

        if role.club_id != request.club_id {
            return Err(DomainError::RoleClubMismatch.into());
        }

        if let Some(existing) = self
            .ctx
            .member_repo()
            .find(request.club_id, request.user_id)
            .await?
        {
            return Err(match existing.status {
                MembershipStatus::Active => DomainError::AlreadyMember.into(),
                MembershipStatus::Removed => DomainError::MembershipRemoved.into(),
            });
        }

        let membership = Membership::new(request.club_id, request.user_id, role_id);
        let general_room = self
            .ctx
            .chat_room_repo()
            .find_general(request.club_id)
            .await?;

        self.ctx
            .join_request_repo()
            .approve(
                request_id,
                actor.user_id,
                &membership,
                general_room.map(|room| room.id),
            )
            .await?;

        info!(
            request_id = %request_id,
            club_id = %request.club_id,
            user_id = %request.user_id,
            role = %role.name,
            "Join request approved"
        );

        Ok(())
    }

    /// Reject a join request
    ///
    /// Requires `manage_members`.
    #[instrument(skip(self))]
    pub async fn reject_join(
        &self,
        actor: Identity,
        request_id: Snowflake,
        reason: Option<&str>,
    ) -> ServiceResult<()> {
        let request = self
            .ctx
            .join_request_repo()
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::JoinRequestNotFound(request_id))?;

        PermissionService::new(self.ctx)
            .require_permission(request.club_id, actor.user_id, Permissions::MANAGE_MEMBERS)
            .await?;

        self.ctx
            .join_request_repo()
            .reject(request_id, actor.user_id, reason)
            .await?;

        info!(request_id = %request_id, "Join request rejected");

        Ok(())
    }

    /// Point an active member at a different role
    ///
    /// Requires `assign_roles`; the role must belong to the club.
    #[instrument(skip(self))]
    pub async fn assign_role(
        &self,
        actor: Identity,
        club_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<()> {
        PermissionService::new(self.ctx)
            .require_permission(club_id, actor.user_id, Permissions::ASSIGN_ROLES)
            .await?;

        let role = self
            .ctx
            .role_repo()
            .find_by_id(role_id)
            .await?
            .ok_or(DomainError::RoleNotFound(role_id))?;

        if role.club_id != club_id {
            return Err(DomainError::RoleClubMismatch.into());
        }

        self.ctx
            .member_repo()
            .update_role(club_id, user_id, role_id)
            .await?;

        info!(club_id = %club_id, user_id = %user_id, role = %role.name, "Role assigned");

        Ok(())
    }

    /// Transfer the presidency to another active member
    ///
    /// Only the current president or a superuser may do this. The club
    /// ends up with exactly one president.
    #[instrument(skip(self))]
    pub async fn set_president(
        &self,
        actor: Identity,
        club_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let club = self
            .ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or(DomainError::ClubNotFound(club_id))?;

        if !actor.superuser && club.current_president_id != actor.user_id {
            return Err(DomainError::NotPresident.into());
        }

        let target = self
            .ctx
            .member_repo()
            .find(club_id, user_id)
            .await?
            .ok_or(DomainError::MembershipNotFound)?;

        if !target.is_active() {
            return Err(DomainError::MembershipNotFound.into());
        }

        self.ctx.member_repo().set_president(club_id, user_id).await?;

        info!(club_id = %club_id, new_president = %user_id, "Presidency transferred");

        Ok(())
    }

    /// The club's active roster with user info and role names
    ///
    /// Requires `view_members`; president first.
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        actor: Identity,
        club_id: Snowflake,
    ) -> ServiceResult<Vec<MemberResponse>> {
        PermissionService::new(self.ctx)
            .require_permission(club_id, actor.user_id, Permissions::VIEW_MEMBERS)
            .await?;

        let memberships = self.ctx.member_repo().find_by_club(club_id).await?;

        let mut roster = Vec::with_capacity(memberships.len());
        for membership in &memberships {
            let user = self
                .ctx
                .user_repo()
                .find_by_id(membership.user_id)
                .await?
                .ok_or(DomainError::UserNotFound(membership.user_id))?;
            let role = self
                .ctx
                .role_repo()
                .find_by_id(membership.role_id)
                .await?
                .ok_or(DomainError::RoleNotFound(membership.role_id))?;

            roster.push(member_response(membership, &user, &role));
        }

        Ok(roster)
    }

    /// Remove a member from the club
    ///
    /// Requires `remove_members`. The current president can never be
    /// removed; transfer the presidency first.
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        actor: Identity,
        club_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        PermissionService::new(self.ctx)
            .require_permission(club_id, actor.user_id, Permissions::REMOVE_MEMBERS)
            .await?;

        let club = self
            .ctx
            .club_repo()
            .find_by_id(club_id)
            .await?
            .ok_or(DomainError::ClubNotFound(club_id))?;

        if club.current_president_id == user_id {
            return Err(DomainError::CannotRemovePresident.into());
        }

        self.ctx
            .member_repo()
            .set_status(club_id, user_id, MembershipStatus::Removed)
            .await?;

        info!(club_id = %club_id, user_id = %user_id, "Member removed");

        Ok(())
    }
}
