//! Club entity - the root of roles, memberships, and chat rooms

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::value_objects::Snowflake;

/// How many characters of the club name seed the access code
const ACCESS_CODE_PREFIX_LEN: usize = 6;

/// Club entity
///
/// Clubs are only ever created by approving a creation request, and are
/// soft-deleted (`is_active = false`), never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub staff_advisor: Option<String>,
    /// Uppercase self-service join code, unique across clubs
    pub access_code: String,
    pub current_president_id: Snowflake,
    pub created_from_request_id: Snowflake,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    /// Create a new Club provisioned from an approved creation request
    pub fn from_request(
        id: Snowflake,
        request_id: Snowflake,
        president_id: Snowflake,
        name: String,
        description: Option<String>,
        staff_advisor: Option<String>,
        access_code: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description,
            staff_advisor,
            access_code,
            current_president_id: president_id,
            created_from_request_id: request_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Generate a candidate access code for a club name
///
/// Uppercase of the first six characters of the name (whitespace and
/// punctuation dropped) followed by a 4-digit random suffix. Not guaranteed
/// unique; callers retry against the store until the code is unused.
pub fn generate_access_code(club_name: &str) -> String {
    let prefix: String = club_name
        .chars()
        .take(ACCESS_CODE_PREFIX_LEN)
        .filter(|c| c.is_ascii_alphanumeric())
        .flat_map(|c| c.to_uppercase())
        .collect();
    let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);
    format!("{prefix}{suffix}")
}
