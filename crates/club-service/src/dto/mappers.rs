//! Entity to response DTO mappers

use club_core::entities::{Club, ClubCreationRequest, JoinRequest, Membership, Role, User};

use super::responses::{
    ClubResponse, CreationRequestResponse, JoinRequestResponse, MemberResponse, RoleResponse,
    UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_superuser: user.is_superuser,
            created_at: user.created_at,
        }
    }
}

impl From<&Club> for ClubResponse {
    fn from(club: &Club) -> Self {
        Self {
            id: club.id.to_string(),
            name: club.name.clone(),
            description: club.description.clone(),
            staff_advisor: club.staff_advisor.clone(),
            access_code: club.access_code.clone(),
            current_president_id: club.current_president_id.to_string(),
            is_active: club.is_active,
            created_at: club.created_at,
        }
    }
}

impl From<&ClubCreationRequest> for CreationRequestResponse {
    fn from(request: &ClubCreationRequest) -> Self {
        Self {
            id: request.id.to_string(),
            requested_by: request.requested_by.to_string(),
            club_name: request.club_name.clone(),
            description: request.description.clone(),
            staff_advisor: request.staff_advisor.clone(),
            president_name: request.president_name.clone(),
            requester_comment: request.requester_comment.clone(),
            status: request.status.as_str(),
            rejection_reason: request.rejection_reason.clone(),
            reviewed_at: request.reviewed_at,
            created_at: request.created_at,
        }
    }
}

impl From<&JoinRequest> for JoinRequestResponse {
    fn from(request: &JoinRequest) -> Self {
        Self {
            id: request.id.to_string(),
            club_id: request.club_id.to_string(),
            user_id: request.user_id.to_string(),
            message: request.message.clone(),
            status: request.status.as_str(),
            rejection_reason: request.rejection_reason.clone(),
            created_at: request.created_at,
        }
    }
}

/// Build a RoleResponse from a role and its active member count
pub fn role_response(role: &Role, active_member_count: i64) -> RoleResponse {
    RoleResponse {
        id: role.id.to_string(),
        club_id: role.club_id.to_string(),
        name: role.name.clone(),
        description: role.description.clone(),
        is_system_role: role.is_system_role,
        permissions: role.permissions.to_map(),
        active_member_count,
    }
}

/// Build a roster entry from a membership plus its user and role
pub fn member_response(membership: &Membership, user: &User, role: &Role) -> MemberResponse {
    MemberResponse {
        user_id: membership.user_id.to_string(),
        display_name: user.display_name(),
        email: user.email.clone(),
        role_id: membership.role_id.to_string(),
        role_name: role.name.clone(),
        is_president: membership.is_president,
        joined_at: membership.joined_at,
    }
}
