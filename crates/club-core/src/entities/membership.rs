//! Membership entity - a user's standing within a club

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// Membership status
///
/// Memberships are never hard-deleted; removal flips the status instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Removed,
}

impl MembershipStatus {
    /// Canonical storage string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Removed => "removed",
        }
    }

    /// Parse the canonical storage string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "removed" => Some(Self::Removed),
            _ => None,
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership entity, unique per (club, user) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub club_id: Snowflake,
    pub user_id: Snowflake,
    /// Exactly one role per membership
    pub role_id: Snowflake,
    /// At most one true per club, maintained by the president transfer
    /// workflow rather than a database constraint
    pub is_president: bool,
    pub status: MembershipStatus,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    /// Create an active membership with the given role
    pub fn new(club_id: Snowflake, user_id: Snowflake, role_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            club_id,
            user_id,
            role_id,
            is_president: false,
            status: MembershipStatus::Active,
            joined_at: now,
            updated_at: now,
        }
    }

    /// Create the founding president membership for a freshly provisioned club
    pub fn founding_president(club_id: Snowflake, user_id: Snowflake, role_id: Snowflake) -> Self {
        Self {
            is_president: true,
            ..Self::new(club_id, user_id, role_id)
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}
