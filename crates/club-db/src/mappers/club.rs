//! Club model -> entity mapper

use club_core::entities::Club;
use club_core::value_objects::Snowflake;

use crate::models::ClubModel;

impl From<ClubModel> for Club {
    fn from(model: ClubModel) -> Self {
        Club {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            staff_advisor: model.staff_advisor,
            access_code: model.access_code,
            current_president_id: Snowflake::new(model.current_president_id),
            created_from_request_id: Snowflake::new(model.created_from_request_id),
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
