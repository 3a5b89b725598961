//! Chat room model -> entity mapper

use club_core::entities::ChatRoom;
use club_core::value_objects::Snowflake;

use crate::models::ChatRoomModel;

impl From<ChatRoomModel> for ChatRoom {
    fn from(model: ChatRoomModel) -> Self {
        ChatRoom {
            id: Snowflake::new(model.id),
            club_id: Snowflake::new(model.club_id),
            name: model.name,
            description: model.description,
            created_by: Snowflake::new(model.created_by),
            is_general: model.is_general,
            created_at: model.created_at,
        }
    }
}
