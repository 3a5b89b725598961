//! Domain entities

mod chat_room;
mod club;
mod creation_request;
mod join_request;
mod membership;
mod role;
mod user;

pub use chat_room::ChatRoom;
pub use club::{generate_access_code, Club};
pub use creation_request::ClubCreationRequest;
pub use join_request::{JoinRequest, RequestStatus};
pub use membership::{Membership, MembershipStatus};
pub use role::Role;
pub use user::User;
