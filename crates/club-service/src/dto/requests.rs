//! Request DTOs for workflow operations
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use std::collections::BTreeMap;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// Role Requests
// ============================================================================

/// Create role request
///
/// `permissions` maps capability keys to booleans; keys left out default to
/// denied, unknown keys are rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "Role name must be 1-50 characters"))]
    pub name: String,

    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub permissions: BTreeMap<String, bool>,
}

/// Update role request
///
/// Sparse: only supplied fields change, only supplied permission keys are
/// overwritten.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "Role name must be 1-50 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub permissions: BTreeMap<String, bool>,
}

// ============================================================================
// Club Requests
// ============================================================================

/// Submit a club creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitClubRequest {
    #[validate(length(min = 1, max = 100, message = "Club name must be 1-100 characters"))]
    pub club_name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 100, message = "Staff advisor must be at most 100 characters"))]
    pub staff_advisor: Option<String>,

    #[validate(length(min = 1, max = 100, message = "President name must be 1-100 characters"))]
    pub president_name: String,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub requester_comment: Option<String>,
}

// ============================================================================
// Membership Requests
// ============================================================================

/// Request to join a club by access code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinClubRequest {
    #[validate(length(min = 4, max = 16, message = "Access code must be 4-16 characters"))]
    pub access_code: String,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}
