//! Club database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for clubs table
#[derive(Debug, Clone, FromRow)]
pub struct ClubModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub staff_advisor: Option<String>,
    pub access_code: String,
    pub current_president_id: i64,
    pub created_from_request_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
