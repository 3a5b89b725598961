//! Request-scoped caller identity
//!
//! Workflows never read ambient session state; the dispatcher resolves the
//! session once and passes this context into every call.

use serde::{Deserialize, Serialize};

use super::Snowflake;

/// The authenticated caller of a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Snowflake,
    /// System owner: may review club creation requests and bypass the
    /// president check in president transfer. Never bypasses role
    /// permissions inside a club.
    pub superuser: bool,
}

impl Identity {
    /// Regular authenticated user
    pub fn user(user_id: Snowflake) -> Self {
        Self {
            user_id,
            superuser: false,
        }
    }

    /// System owner identity
    pub fn superuser(user_id: Snowflake) -> Self {
        Self {
            user_id,
            superuser: true,
        }
    }
}
