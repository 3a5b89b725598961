//! Role database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for roles table
///
/// Permissions are not stored on this row; they live in `role_permissions`
/// as one boolean per key and are joined in by the repository.
#[derive(Debug, Clone, FromRow)]
pub struct RoleModel {
    pub id: i64,
    pub club_id: i64,
    pub name: String,
    pub description: String,
    pub is_system_role: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for role_permissions table
#[derive(Debug, Clone, FromRow)]
pub struct RolePermissionModel {
    pub role_id: i64,
    pub permission_key: String,
    pub is_granted: bool,
}
