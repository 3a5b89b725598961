//! Database models - SQLx-compatible structs for PostgreSQL tables

mod chat_room;
mod club;
mod creation_request;
mod join_request;
mod member;
mod role;
mod user;

pub use chat_room::ChatRoomModel;
pub use club::ClubModel;
pub use creation_request::CreationRequestModel;
pub use join_request::JoinRequestModel;
pub use member::ClubMemberModel;
pub use role::{RoleModel, RolePermissionModel};
pub use user::UserModel;
