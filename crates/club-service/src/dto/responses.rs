//! Response DTOs for workflow operations
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::services::ServiceError;

// ============================================================================
// Common Response Types
// ============================================================================

/// Uniform workflow result envelope
///
/// Every operation resolves to `{ok, data, message}`; errors never escape
/// as faults past this boundary.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful result carrying data
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            message: None,
        }
    }

    /// Successful result with a human-readable note
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Failed result carrying the error message
    pub fn err(error: &ServiceError) -> Self {
        Self {
            ok: false,
            data: None,
            message: Some(error.to_string()),
        }
    }
}

impl<T> From<crate::services::ServiceResult<T>> for Envelope<T> {
    fn from(result: crate::services::ServiceResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(&e),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// User info response
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Role Responses
// ============================================================================

/// Role with its full permission map and usage count
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub id: String,
    pub club_id: String,
    pub name: String,
    pub description: String,
    pub is_system_role: bool,
    /// One entry per capability key, never sparse
    pub permissions: BTreeMap<&'static str, bool>,
    pub active_member_count: i64,
}

/// What a permission set unlocks, for the role editor preview
#[derive(Debug, Clone, Serialize)]
pub struct RolePreviewResponse {
    /// Navigation entries visible to a holder, in display order
    pub navigation: Vec<&'static str>,
    /// Human-readable descriptions of the granted action capabilities
    pub capabilities: Vec<&'static str>,
}

// ============================================================================
// Club Responses
// ============================================================================

/// Club info response
#[derive(Debug, Clone, Serialize)]
pub struct ClubResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub staff_advisor: Option<String>,
    pub access_code: String,
    pub current_president_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Club listing entry with its active member count
#[derive(Debug, Clone, Serialize)]
pub struct ClubSummaryResponse {
    #[serde(flatten)]
    pub club: ClubResponse,
    pub member_count: i64,
}

/// Result of approving a creation request
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedClubResponse {
    pub club_id: String,
    pub access_code: String,
}

/// Club creation request response
#[derive(Debug, Clone, Serialize)]
pub struct CreationRequestResponse {
    pub id: String,
    pub requested_by: String,
    pub club_name: String,
    pub description: Option<String>,
    pub staff_advisor: Option<String>,
    pub president_name: String,
    pub requester_comment: Option<String>,
    pub status: &'static str,
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Membership Responses
// ============================================================================

/// Join request response
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequestResponse {
    pub id: String,
    pub club_id: String,
    pub user_id: String,
    pub message: Option<String>,
    pub status: &'static str,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Club roster entry
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub role_id: String,
    pub role_name: String,
    pub is_president: bool,
    pub joined_at: DateTime<Utc>,
}
