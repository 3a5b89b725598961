//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Club not found: {0}")]
    ClubNotFound(Snowflake),

    #[error("Role not found: {0}")]
    RoleNotFound(Snowflake),

    #[error("Membership not found in club")]
    MembershipNotFound,

    #[error("Join request not found: {0}")]
    JoinRequestNotFound(Snowflake),

    #[error("Club creation request not found: {0}")]
    CreationRequestNotFound(Snowflake),

    #[error("Invalid access code")]
    InvalidAccessCode,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown permission key: {0}")]
    UnknownPermissionKey(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Only the club president may do this")]
    NotPresident,

    #[error("System owner only")]
    NotSuperuser,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Role name already exists in this club")]
    DuplicateRoleName,

    #[error("Already a member of this club")]
    AlreadyMember,

    #[error("Removed from this club")]
    MembershipRemoved,

    #[error("A pending request already exists")]
    DuplicatePendingRequest,

    #[error("Request not found or already processed")]
    RequestAlreadyProcessed,

    #[error("Access code already in use")]
    AccessCodeExists,

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Cannot delete role with active members")]
    RoleInUse,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot delete system roles")]
    SystemRoleProtected,

    #[error("Role does not belong to this club")]
    RoleClubMismatch,

    #[error("Cannot remove the current president")]
    CannotRemovePresident,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ClubNotFound(_) => "UNKNOWN_CLUB",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::MembershipNotFound => "UNKNOWN_MEMBER",
            Self::JoinRequestNotFound(_) => "UNKNOWN_JOIN_REQUEST",
            Self::CreationRequestNotFound(_) => "UNKNOWN_CREATION_REQUEST",
            Self::InvalidAccessCode => "INVALID_ACCESS_CODE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnknownPermissionKey(_) => "UNKNOWN_PERMISSION_KEY",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::NotPresident => "NOT_PRESIDENT",
            Self::NotSuperuser => "NOT_SUPERUSER",

            // Conflict
            Self::DuplicateRoleName => "DUPLICATE_ROLE_NAME",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::MembershipRemoved => "MEMBERSHIP_REMOVED",
            Self::DuplicatePendingRequest => "DUPLICATE_PENDING_REQUEST",
            Self::RequestAlreadyProcessed => "REQUEST_ALREADY_PROCESSED",
            Self::AccessCodeExists => "ACCESS_CODE_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::RoleInUse => "ROLE_IN_USE",

            // Business Rules
            Self::SystemRoleProtected => "SYSTEM_ROLE_PROTECTED",
            Self::RoleClubMismatch => "ROLE_CLUB_MISMATCH",
            Self::CannotRemovePresident => "CANNOT_REMOVE_PRESIDENT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ClubNotFound(_)
                | Self::RoleNotFound(_)
                | Self::MembershipNotFound
                | Self::JoinRequestNotFound(_)
                | Self::CreationRequestNotFound(_)
                | Self::InvalidAccessCode
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::UnknownPermissionKey(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MissingPermission(_) | Self::NotPresident | Self::NotSuperuser
        )
    }

    /// Check if this is a business rule violation
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::SystemRoleProtected | Self::RoleClubMismatch | Self::CannotRemovePresident
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRoleName
                | Self::AlreadyMember
                | Self::MembershipRemoved
                | Self::DuplicatePendingRequest
                | Self::RequestAlreadyProcessed
                | Self::AccessCodeExists
                | Self::EmailAlreadyExists
                | Self::RoleInUse
        )
    }
}
