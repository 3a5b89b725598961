//! User model -> entity mapper

use club_core::entities::User;
use club_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            is_superuser: model.is_superuser,
            is_active: model.is_active,
            last_login: model.last_login,
            created_at: model.created_at,
        }
    }
}
