//! Membership model -> entity mapper

use club_core::entities::{Membership, MembershipStatus};
use club_core::value_objects::Snowflake;

use crate::models::ClubMemberModel;

impl From<ClubMemberModel> for Membership {
    fn from(model: ClubMemberModel) -> Self {
        Membership {
            club_id: Snowflake::new(model.club_id),
            user_id: Snowflake::new(model.user_id),
            role_id: Snowflake::new(model.role_id),
            is_president: model.is_president,
            // status column is CHECK-constrained to known values
            status: MembershipStatus::parse(&model.status).unwrap_or(MembershipStatus::Removed),
            joined_at: model.joined_at,
            updated_at: model.updated_at,
        }
    }
}
