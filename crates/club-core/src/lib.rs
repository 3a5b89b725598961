//! # club-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ChatRoom, Club, ClubCreationRequest, JoinRequest, Membership, MembershipStatus, RequestStatus,
    Role, User, generate_access_code,
};
pub use error::DomainError;
pub use traits::{
    ChatRoomRepository, ClubRepository, CreationRequestRepository, JoinRequestRepository,
    MemberRepository, RepoResult, RoleRepository, UserRepository,
};
pub use value_objects::{
    Identity, Permissions, Snowflake, SnowflakeGenerator, SnowflakeParseError, PERMISSION_KEYS,
};
