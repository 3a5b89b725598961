//! Join request entity and the shared review-state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// Review state for join and club-creation requests
///
/// `Pending` is the only state a request can be processed from; approval and
/// rejection are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Canonical storage string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse the canonical storage string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's request to join a club via its access code
///
/// At most one pending request may exist per (club, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub id: Snowflake,
    pub club_id: Snowflake,
    pub user_id: Snowflake,
    /// The canonicalized (uppercase) code the requester supplied
    pub access_code_used: String,
    pub message: Option<String>,
    pub status: RequestStatus,
    pub reviewed_by: Option<Snowflake>,
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Set on approval: the role the reviewer chose
    pub assigned_role_id: Option<Snowflake>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JoinRequest {
    /// Create a pending join request
    pub fn new(
        id: Snowflake,
        club_id: Snowflake,
        user_id: Snowflake,
        access_code_used: String,
        message: Option<String>,
    ) -> Self {
        Self {
            id,
            club_id,
            user_id,
            access_code_used,
            message,
            status: RequestStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            assigned_role_id: None,
            rejection_reason: None,
            created_at: Utc::now(),
        }
    }
}
