//! Club creation request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for club_creation_requests table
#[derive(Debug, Clone, FromRow)]
pub struct CreationRequestModel {
    pub id: i64,
    pub requested_by: i64,
    pub club_name: String,
    pub description: Option<String>,
    pub staff_advisor: Option<String>,
    pub president_name: String,
    pub requester_comment: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
