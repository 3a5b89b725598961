//! User entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// System owner flag; distinct from any per-club role
    pub is_superuser: bool,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new active, non-superuser account
    pub fn new(id: Snowflake, email: String, first_name: String, last_name: String) -> Self {
        Self {
            id,
            email,
            first_name,
            last_name,
            is_superuser: false,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    /// Full display name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
