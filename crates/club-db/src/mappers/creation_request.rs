//! Creation request model -> entity mapper

use club_core::entities::{ClubCreationRequest, RequestStatus};
use club_core::value_objects::Snowflake;

use crate::models::CreationRequestModel;

impl From<CreationRequestModel> for ClubCreationRequest {
    fn from(model: CreationRequestModel) -> Self {
        ClubCreationRequest {
            id: Snowflake::new(model.id),
            requested_by: Snowflake::new(model.requested_by),
            club_name: model.club_name,
            description: model.description,
            staff_advisor: model.staff_advisor,
            president_name: model.president_name,
            requester_comment: model.requester_comment,
            // status column is CHECK-constrained to known values
            status: RequestStatus::parse(&model.status).unwrap_or(RequestStatus::Rejected),
            rejection_reason: model.rejection_reason,
            reviewed_at: model.reviewed_at,
            created_at: model.created_at,
        }
    }
}
