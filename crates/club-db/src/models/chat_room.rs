//! Chat room database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for chat_rooms table
#[derive(Debug, Clone, FromRow)]
pub struct ChatRoomModel {
    pub id: i64,
    pub club_id: i64,
    pub name: String,
    pub description: String,
    pub created_by: i64,
    pub is_general: bool,
    pub created_at: DateTime<Utc>,
}
