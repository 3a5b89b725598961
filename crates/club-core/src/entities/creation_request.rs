//! Club creation request entity

use chrono::{DateTime, Utc};

use super::join_request::RequestStatus;
use crate::value_objects::Snowflake;

/// A user's request for a brand-new club
///
/// At most one pending creation request may exist per requester. Approval
/// consumes the request exactly once, provisioning the club atomically;
/// rejection is terminal with no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubCreationRequest {
    pub id: Snowflake,
    pub requested_by: Snowflake,
    pub club_name: String,
    pub description: Option<String>,
    pub staff_advisor: Option<String>,
    pub president_name: String,
    pub requester_comment: Option<String>,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ClubCreationRequest {
    /// Create a pending creation request
    pub fn new(
        id: Snowflake,
        requested_by: Snowflake,
        club_name: String,
        description: Option<String>,
        staff_advisor: Option<String>,
        president_name: String,
        requester_comment: Option<String>,
    ) -> Self {
        Self {
            id,
            requested_by,
            club_name,
            description,
            staff_advisor,
            president_name,
            requester_comment,
            status: RequestStatus::Pending,
            rejection_reason: None,
            reviewed_at: None,
            created_at: Utc::now(),
        }
    }
}
