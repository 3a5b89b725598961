//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in club-core.
//! Each repository handles database operations for a specific domain entity.
//! Workflow transitions that touch several tables (join approval, club
//! provisioning, president transfer) run inside a single transaction here.

mod chat_room;
mod club;
mod creation_request;
mod error;
mod join_request;
mod member;
mod role;
mod user;

pub use chat_room::PgChatRoomRepository;
pub use club::PgClubRepository;
pub use creation_request::PgCreationRequestRepository;
pub use join_request::PgJoinRequestRepository;
pub use member::PgMemberRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
