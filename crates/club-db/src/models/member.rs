//! Membership database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for club_members table
#[derive(Debug, Clone, FromRow)]
pub struct ClubMemberModel {
    pub club_id: i64,
    pub user_id: i64,
    pub role_id: i64,
    pub is_president: bool,
    pub status: String,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
