//! Join request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for join_requests table
#[derive(Debug, Clone, FromRow)]
pub struct JoinRequestModel {
    pub id: i64,
    pub club_id: i64,
    pub user_id: i64,
    pub access_code_used: String,
    pub message: Option<String>,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub assigned_role_id: Option<i64>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
