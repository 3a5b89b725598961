//! Role entity - a named permission set within a club

use chrono::{DateTime, Utc};

use crate::value_objects::{Permissions, Snowflake};

/// Role entity
///
/// Every club carries exactly three system roles (President, Vice President,
/// Member) created at provisioning time. System roles can never be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    pub club_id: Snowflake,
    /// Unique within the club, compared case-insensitively
    pub name: String,
    pub description: String,
    pub is_system_role: bool,
    pub permissions: Permissions,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Create a custom (user-defined) role
    pub fn custom(
        id: Snowflake,
        club_id: Snowflake,
        name: String,
        description: String,
        permissions: Permissions,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            club_id,
            name,
            description,
            is_system_role: false,
            permissions,
            created_at: now,
            updated_at: now,
        }
    }

    /// The President system role with its seeded profile
    pub fn president(id: Snowflake, club_id: Snowflake) -> Self {
        Self::system(
            id,
            club_id,
            "President",
            "Club president with full permissions",
            Permissions::PRESIDENT,
        )
    }

    /// The Vice President system role with its seeded profile
    pub fn vice_president(id: Snowflake, club_id: Snowflake) -> Self {
        Self::system(
            id,
            club_id,
            "Vice President",
            "Assists president and manages operations",
            Permissions::VICE_PRESIDENT,
        )
    }

    /// The Member system role with its seeded profile
    pub fn member(id: Snowflake, club_id: Snowflake) -> Self {
        Self::system(id, club_id, "Member", "Regular club member", Permissions::MEMBER)
    }

    fn system(
        id: Snowflake,
        club_id: Snowflake,
        name: &str,
        description: &str,
        permissions: Permissions,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            club_id,
            name: name.to_string(),
            description: description.to_string(),
            is_system_role: true,
            permissions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this role grants a specific permission
    #[inline]
    pub fn has_permission(&self, permission: Permissions) -> bool {
        self.permissions.has(permission)
    }
}
