//! Role model -> entity mapper
//!
//! A role entity carries its full permission set, assembled from the
//! per-key rows in `role_permissions`.

use club_core::entities::Role;
use club_core::value_objects::{Permissions, Snowflake};

use crate::models::{RoleModel, RolePermissionModel};

/// Assemble a Role entity from its row and its permission rows
///
/// Keys the permission table does not mention stay denied; keys no longer
/// in the registry are ignored.
pub fn role_from_parts(model: RoleModel, permission_rows: &[RolePermissionModel]) -> Role {
    let mut permissions = Permissions::empty();
    for row in permission_rows {
        if row.role_id != model.id || !row.is_granted {
            continue;
        }
        if let Some(flag) = Permissions::from_key(&row.permission_key) {
            permissions |= flag;
        }
    }

    Role {
        id: Snowflake::new(model.id),
        club_id: Snowflake::new(model.club_id),
        name: model.name,
        description: model.description,
        is_system_role: model.is_system_role,
        permissions,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
