//! Join request model -> entity mapper

use club_core::entities::{JoinRequest, RequestStatus};
use club_core::value_objects::Snowflake;

use crate::models::JoinRequestModel;

impl From<JoinRequestModel> for JoinRequest {
    fn from(model: JoinRequestModel) -> Self {
        JoinRequest {
            id: Snowflake::new(model.id),
            club_id: Snowflake::new(model.club_id),
            user_id: Snowflake::new(model.user_id),
            access_code_used: model.access_code_used,
            message: model.message,
            // status column is CHECK-constrained to known values
            status: RequestStatus::parse(&model.status).unwrap_or(RequestStatus::Rejected),
            reviewed_by: model.reviewed_by.map(Snowflake::new),
            reviewed_at: model.reviewed_at,
            assigned_role_id: model.assigned_role_id.map(Snowflake::new),
            rejection_reason: model.rejection_reason,
            created_at: model.created_at,
        }
    }
}
