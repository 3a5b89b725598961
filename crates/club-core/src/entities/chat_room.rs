//! Chat room entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Chat room within a club
///
/// Every club owns exactly one room flagged `is_general`; new members are
/// auto-enrolled into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: Snowflake,
    pub club_id: Snowflake,
    pub name: String,
    pub description: String,
    pub created_by: Snowflake,
    pub is_general: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatRoom {
    /// The default general room created with every club
    pub fn general(id: Snowflake, club_id: Snowflake, created_by: Snowflake) -> Self {
        Self {
            id,
            club_id,
            name: "General".to_string(),
            description: "Main chat room for all members".to_string(),
            created_by,
            is_general: true,
            created_at: Utc::now(),
        }
    }
}
